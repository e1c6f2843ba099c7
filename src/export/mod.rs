//! Write pipeline tables to CSV and the run summary to JSON.
//!
//! Missing values become empty CSV fields and JSON `null`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::output;
use crate::error::{Error, Result};
use crate::types::{CorpusEntry, CorrelationMatrix, FeatureTable, SmoothedTable, YearTable};

/// Metadata and results of one analysis run, written as `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct Summary<'a> {
    /// Crate version that produced the outputs
    pub version: &'static str,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
    /// Corpus directory or scraped table the documents came from
    pub source: String,
    /// Documents analyzed
    pub document_count: usize,
    /// Lexicon names, in column order
    pub lexicons: &'a [String],
    /// Whether tokens were stemmed
    pub stemmed: bool,
    /// Smoothing window in years
    pub smoothing_window: usize,
    /// Edge gap policy
    pub edge_fill: String,
    /// Per-year aggregates
    pub years: &'a YearTable,
}

/// Writes output files into one directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    /// Create the output directory if needed.
    pub fn new(dir: &Path) -> Result<Self> {
        fs_err::create_dir_all(dir).map_err(|e| Error::io(e, dir.to_path_buf()))?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn writer(&self, name: &str) -> Result<(PathBuf, csv::Writer<fs_err::File>)> {
        let path = self.dir.join(name);
        let file = fs_err::File::create(&path).map_err(|e| Error::io(e, path.clone()))?;
        Ok((path, csv::Writer::from_writer(file)))
    }

    fn finish(path: &Path, mut writer: csv::Writer<fs_err::File>, rows: usize) -> Result<PathBuf> {
        writer.flush().map_err(|e| Error::io(e, path.to_path_buf()))?;
        tracing::info!("Wrote {rows} rows to {}", path.display());
        Ok(path.to_path_buf())
    }

    /// `corpus_index.csv`: one row per indexed file.
    pub fn corpus_index(&self, entries: &[CorpusEntry]) -> Result<PathBuf> {
        let (path, mut w) = self.writer(output::CORPUS_INDEX)?;
        w.write_record(["Path", "Year", "File", "Song", "Length"])?;
        for e in entries {
            w.write_record([
                e.path.to_string_lossy().to_string(),
                e.year.map(|y| y.to_string()).unwrap_or_default(),
                e.file_name.clone(),
                e.song_name.clone(),
                e.length.to_string(),
            ])?;
        }
        Self::finish(&path, w, entries.len())
    }

    /// `document_features.csv`: one row per document.
    pub fn document_features(&self, table: &FeatureTable) -> Result<PathBuf> {
        let (path, mut w) = self.writer(output::DOCUMENT_FEATURES)?;
        let mut header = vec!["Document".to_string(), "Year".to_string()];
        header.extend(table.lexicon_names.iter().cloned());
        header.extend(["Total words", "Lexical density", "Sentiment"].map(String::from));
        w.write_record(&header)?;

        for row in &table.rows {
            let mut record = vec![
                row.identifier.clone(),
                row.year.map(|y| y.to_string()).unwrap_or_default(),
            ];
            record.extend(row.lexicon_counts.iter().map(u64::to_string));
            record.push(row.total_words.to_string());
            record.push(row.lexical_density.to_string());
            record.push(row.sentiment.to_string());
            w.write_record(&record)?;
        }
        Self::finish(&path, w, table.len())
    }

    /// `year_aggregates.csv`: one row per year of the range.
    pub fn year_table(&self, table: &YearTable) -> Result<PathBuf> {
        let (path, mut w) = self.writer(output::YEAR_AGGREGATES)?;
        let mut header = vec!["Year".to_string()];
        header.extend(table.numeric_names());
        w.write_record(&header)?;

        for row in &table.rows {
            let mut record = vec![row.year.to_string()];
            record.extend(table.numeric_values(row).into_iter().map(cell));
            w.write_record(&record)?;
        }
        Self::finish(&path, w, table.rows.len())
    }

    /// `year_aggregates_smoothed.csv`: the trailing moving average view.
    pub fn smoothed(&self, table: &SmoothedTable) -> Result<PathBuf> {
        let (path, mut w) = self.writer(output::YEAR_AGGREGATES_SMOOTHED)?;
        let mut header = vec!["Year".to_string()];
        header.extend(table.columns.iter().cloned());
        w.write_record(&header)?;

        for (year, values) in &table.rows {
            let mut record = vec![year.to_string()];
            record.extend(values.iter().copied().map(cell));
            w.write_record(&record)?;
        }
        Self::finish(&path, w, table.rows.len())
    }

    /// A correlation matrix with column names on both axes.
    pub fn correlations(&self, name: &str, matrix: &CorrelationMatrix) -> Result<PathBuf> {
        let (path, mut w) = self.writer(name)?;
        let mut header = vec![String::new()];
        header.extend(matrix.columns.iter().cloned());
        w.write_record(&header)?;

        for (column, values) in matrix.columns.iter().zip(&matrix.values) {
            let mut record = vec![column.clone()];
            record.extend(values.iter().copied().map(cell));
            w.write_record(&record)?;
        }
        Self::finish(&path, w, matrix.columns.len())
    }

    /// `top_terms.csv`: term and count, most frequent first.
    pub fn top_terms(&self, terms: &[(String, u64)]) -> Result<PathBuf> {
        let (path, mut w) = self.writer(output::TOP_TERMS)?;
        w.write_record(["Term", "Count"])?;
        for (term, count) in terms {
            w.write_record([term.as_str(), count.to_string().as_str()])?;
        }
        Self::finish(&path, w, terms.len())
    }

    /// `summary.json`: run metadata and the year table.
    pub fn summary(&self, summary: &Summary<'_>) -> Result<PathBuf> {
        let path = self.dir.join(output::SUMMARY);
        let json = serde_json::to_string_pretty(summary)?;
        fs_err::write(&path, json).map_err(|e| Error::io(e, path.clone()))?;
        tracing::info!("Wrote run summary to {}", path.display());
        Ok(path)
    }
}

/// CSV cell for an optional value.
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::YearAggregate;

    fn year_table() -> YearTable {
        let mut a = YearAggregate::empty(2009, 1);
        a.set_metrics(&[Some(1.5), Some(50.0), Some(0.2), Some(10.0), Some(0.5), Some(20.0)]);
        a.song_count = 2;
        let b = YearAggregate::empty(2010, 1);
        YearTable { lexicon_names: vec!["I-words".into()], rows: vec![a, b] }
    }

    #[test]
    fn year_table_csv_leaves_missing_cells_empty() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(&dir.path().join("out")).unwrap();
        let path = exporter.year_table(&year_table()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Year,I-words,Lexical density,Sentiment,Vocabulary size,Lexical diversity,Total words,Number of songs"
        );
        assert_eq!(lines[1], "2009,1.5,50,0.2,10,0.5,20,2");
        assert_eq!(lines[2], "2010,,,,,,,0");
    }

    #[test]
    fn summary_is_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let table = year_table();
        let summary = Summary {
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now(),
            source: "Lyrics".into(),
            document_count: 2,
            lexicons: &table.lexicon_names,
            stemmed: false,
            smoothing_window: 3,
            edge_fill: "hold".into(),
            years: &table,
        };
        let path = exporter.summary(&summary).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["document_count"], 2);
        assert_eq!(value["years"]["rows"][0]["year"], 2009);
        assert!(value["years"]["rows"][1]["lexical_density"].is_null());
    }

    #[test]
    fn top_terms_csv() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let path = exporter.top_terms(&[("power".into(), 3), ("money".into(), 2)]).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Term,Count\npower,3\nmoney,2\n");
    }
}
