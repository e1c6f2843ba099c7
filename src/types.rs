//! Core data types shared across the pipeline.

use std::path::PathBuf;

use serde::Serialize;

/// One row of the corpus index built from a directory of per-year folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusEntry {
    /// Path of the lyric file
    pub path: PathBuf,
    /// Release year taken from the parent folder name
    pub year: Option<i32>,
    /// File name including extension
    pub file_name: String,
    /// File name with the text extension removed
    pub song_name: String,
    /// Length in characters, newlines excluded
    pub length: usize,
}

/// One song ready for feature extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Path or song title
    pub identifier: String,
    /// Release year, if known
    pub year: Option<i32>,
    /// Normalized text: single line, bracketed tags removed
    pub text: String,
}

impl Document {
    /// Create a document from already-normalized text.
    pub fn new(identifier: impl Into<String>, year: Option<i32>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            year,
            text: text.into(),
        }
    }
}

/// Features of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentFeatures {
    /// Identifier of the source document
    pub identifier: String,
    /// Release year of the source document
    pub year: Option<i32>,
    /// Total pattern matches per lexicon, in lexicon order
    pub lexicon_counts: Vec<u64>,
    /// Number of tokens in the document
    pub total_words: u64,
    /// Percentage of tokens that are not stopwords (0-100)
    pub lexical_density: f64,
    /// Polarity in [-1, 1]
    pub sentiment: f64,
}

/// Per-document features with their lexicon column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureTable {
    /// Lexicon names, one per entry of `DocumentFeatures::lexicon_counts`
    pub lexicon_names: Vec<String>,
    /// Rows in document input order
    pub rows: Vec<DocumentFeatures>,
}

impl FeatureTable {
    /// Number of documents in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no documents
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Aggregated metrics for one calendar year. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAggregate {
    /// Calendar year
    pub year: i32,
    /// Mean lexicon counts, in lexicon order
    pub lexicon_means: Vec<Option<f64>>,
    /// Mean lexical density
    pub lexical_density: Option<f64>,
    /// Mean sentiment
    pub sentiment: Option<f64>,
    /// Distinct non-stopword tokens across the year's text
    pub vocabulary_size: Option<f64>,
    /// `vocabulary_size / total_words`
    pub lexical_diversity: Option<f64>,
    /// All tokens across the year's text, stopwords included
    pub total_words: Option<f64>,
    /// Number of documents released that year
    pub song_count: usize,
}

impl YearAggregate {
    /// A row for a year without documents.
    pub fn empty(year: i32, lexicon_count: usize) -> Self {
        Self {
            year,
            lexicon_means: vec![None; lexicon_count],
            lexical_density: None,
            sentiment: None,
            vocabulary_size: None,
            lexical_diversity: None,
            total_words: None,
            song_count: 0,
        }
    }

    /// Interpolatable metrics in column order (see [`YearTable::metric_names`]).
    pub fn metrics(&self) -> Vec<Option<f64>> {
        let mut values = self.lexicon_means.clone();
        values.extend([
            self.lexical_density,
            self.sentiment,
            self.vocabulary_size,
            self.lexical_diversity,
            self.total_words,
        ]);
        values
    }

    /// Overwrite the metrics from a vector laid out like [`Self::metrics`].
    pub fn set_metrics(&mut self, values: &[Option<f64>]) {
        let n = self.lexicon_means.len();
        if values.len() != n + 5 {
            return;
        }
        self.lexicon_means.copy_from_slice(&values[..n]);
        self.lexical_density = values[n];
        self.sentiment = values[n + 1];
        self.vocabulary_size = values[n + 2];
        self.lexical_diversity = values[n + 3];
        self.total_words = values[n + 4];
    }
}

/// One row per year, ascending, with lexicon column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearTable {
    /// Lexicon names, one per entry of `YearAggregate::lexicon_means`
    pub lexicon_names: Vec<String>,
    /// Rows sorted by year
    pub rows: Vec<YearAggregate>,
}

impl YearTable {
    /// Names of the interpolatable metric columns.
    pub fn metric_names(&self) -> Vec<String> {
        let mut names = self.lexicon_names.clone();
        names.extend(
            ["Lexical density", "Sentiment", "Vocabulary size", "Lexical diversity", "Total words"]
                .map(String::from),
        );
        names
    }

    /// Names of every numeric column: the metrics plus the song count.
    pub fn numeric_names(&self) -> Vec<String> {
        let mut names = self.metric_names();
        names.push("Number of songs".to_string());
        names
    }

    /// Every numeric column for one row, laid out like [`Self::numeric_names`].
    #[allow(clippy::unused_self)]
    pub fn numeric_values(&self, row: &YearAggregate) -> Vec<Option<f64>> {
        let mut values = row.metrics();
        values.push(Some(row.song_count as f64));
        values
    }

    /// Values of one numeric column across all years.
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row| self.numeric_values(row).get(index).copied().flatten())
            .collect()
    }

    /// Look up the row for a year
    pub fn get(&self, year: i32) -> Option<&YearAggregate> {
        self.rows
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .and_then(|idx| self.rows.get(idx))
    }
}

/// Trailing moving average of every numeric year column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SmoothedTable {
    /// Window size in years
    pub window: usize,
    /// Column names, same as [`YearTable::numeric_names`]
    pub columns: Vec<String>,
    /// `(year, values)` rows; a value is `None` until a full window of known values exists
    pub rows: Vec<(i32, Vec<Option<f64>>)>,
}

/// Pearson correlations between the numeric columns of a year table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Column names (both axes)
    pub columns: Vec<String>,
    /// Square matrix; `None` where a column has no variance
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation between two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values.get(i)?.get(j).copied().flatten()
    }
}
