//! Pearson correlation between year-table columns.

use crate::types::{CorrelationMatrix, SmoothedTable, YearTable};

/// Pearson correlation over the positions where both series are known.
///
/// `None` with fewer than two shared values or when either side is constant.
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

fn matrix(columns: Vec<String>, series: &[Vec<Option<f64>>]) -> CorrelationMatrix {
    let values = series
        .iter()
        .map(|a| series.iter().map(|b| pearson(a, b)).collect())
        .collect();
    CorrelationMatrix { columns, values }
}

/// Correlations between every numeric column of a year table.
pub fn correlation_matrix(table: &YearTable) -> CorrelationMatrix {
    let columns = table.numeric_names();
    let series: Vec<Vec<Option<f64>>> = (0..columns.len()).map(|c| table.column(c)).collect();
    matrix(columns, &series)
}

/// Correlations between every column of a smoothed table.
pub fn smoothed_correlation_matrix(table: &SmoothedTable) -> CorrelationMatrix {
    let series: Vec<Vec<Option<f64>>> = (0..table.columns.len())
        .map(|c| table.rows.iter().map(|(_, v)| v.get(c).copied().flatten()).collect())
        .collect();
    matrix(table.columns.clone(), &series)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn perfect_positive_and_negative() {
        let a = [Some(1.0), Some(2.0), Some(3.0)];
        let up = [Some(2.0), Some(4.0), Some(6.0)];
        let down = [Some(3.0), Some(2.0), Some(1.0)];
        assert!((pearson(&a, &up).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&a, &down).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_pairs_are_skipped() {
        let a = [Some(1.0), None, Some(3.0), Some(4.0)];
        let b = [Some(1.0), Some(100.0), Some(3.0), Some(4.0)];
        assert!((pearson(&a, &b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_series_has_no_correlation() {
        let a = [Some(1.0), Some(1.0), Some(1.0)];
        let b = [Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(pearson(&a, &b), None);
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), None);
    }

    #[test]
    fn smoothed_matrix_is_square() {
        let table = SmoothedTable {
            window: 1,
            columns: vec!["a".into(), "b".into()],
            rows: vec![
                (2000, vec![Some(1.0), Some(3.0)]),
                (2001, vec![Some(2.0), Some(2.0)]),
                (2002, vec![Some(3.0), Some(1.0)]),
            ],
        };
        let m = smoothed_correlation_matrix(&table);
        assert_eq!(m.values.len(), 2);
        assert!((m.get("a", "b").unwrap() + 1.0).abs() < 1e-12);
        assert!((m.get("a", "a").unwrap() - 1.0).abs() < 1e-12);
    }
}
