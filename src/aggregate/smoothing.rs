//! Trailing moving averages over the year table.

use crate::types::{SmoothedTable, YearTable};

/// Trailing simple moving average of every numeric column.
///
/// A value is missing for the first `window - 1` years and wherever the
/// window contains a missing value. A window of 0 is treated as 1.
pub fn smooth(table: &YearTable, window: usize) -> SmoothedTable {
    let window = window.max(1);
    let columns = table.numeric_names();
    let series: Vec<Vec<Option<f64>>> = (0..columns.len()).map(|c| table.column(c)).collect();

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let values = series.iter().map(|s| trailing_mean(s, i, window)).collect();
            (row.year, values)
        })
        .collect();

    SmoothedTable { window, columns, rows }
}

/// Mean of `series[end + 1 - window..=end]`, if every value is known.
fn trailing_mean(series: &[Option<f64>], end: usize, window: usize) -> Option<f64> {
    if end + 1 < window {
        return None;
    }
    let slice = &series[end + 1 - window..=end];
    let sum = slice.iter().try_fold(0.0, |acc, v| v.map(|x| acc + x))?;
    Some(sum / window as f64)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::YearAggregate;

    fn table(densities: &[Option<f64>]) -> YearTable {
        let rows = densities
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let mut row = YearAggregate::empty(2000 + i as i32, 0);
                row.lexical_density = *d;
                row.song_count = i;
                row
            })
            .collect();
        YearTable { lexicon_names: Vec::new(), rows }
    }

    #[test]
    fn trailing_window_of_three() {
        let t = table(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
        let smoothed = smooth(&t, 3);
        let density: Vec<Option<f64>> = smoothed.rows.iter().map(|(_, v)| v[0]).collect();
        assert_eq!(density, vec![None, None, Some(2.0), Some(3.0)]);

        let songs = smoothed.columns.iter().position(|c| c == "Number of songs").unwrap();
        assert_eq!(smoothed.rows[3].1[songs], Some(2.0));
        assert_eq!(smoothed.rows[3].0, 2003);
    }

    #[test]
    fn missing_value_poisons_its_windows() {
        let t = table(&[Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)]);
        let smoothed = smooth(&t, 2);
        let density: Vec<Option<f64>> = smoothed.rows.iter().map(|(_, v)| v[0]).collect();
        assert_eq!(density, vec![None, None, None, Some(3.5), Some(4.5)]);
    }

    #[test]
    fn source_table_is_untouched() {
        let t = table(&[Some(1.0), Some(2.0)]);
        let before = t.clone();
        let _ = smooth(&t, 2);
        assert_eq!(t, before);
    }
}
