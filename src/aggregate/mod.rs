//! Year-level aggregation of document features.
//!
//! Features are grouped by release year into one immutable [`YearTable`]
//! covering every year of a [`YearRange`]. Years without songs are filled
//! by linear interpolation.

pub mod correlation;
pub mod interpolate;
pub mod smoothing;

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::text::tokenizer::{tokenize, BagOfWords};
use crate::text::StopWords;
use crate::types::{Document, DocumentFeatures, FeatureTable, YearAggregate, YearTable};

pub use correlation::{correlation_matrix, pearson, smoothed_correlation_matrix};
pub use interpolate::{interpolate, EdgeFill};
pub use smoothing::smooth;

/// Inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Create a range; fails if `min > max`.
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(Error::config(
                format!("year range {min}..={max} is inverted"),
                "MIN_YEAR must not exceed MAX_YEAR",
            ));
        }
        Ok(Self { min, max })
    }

    /// Smallest and largest year present in the features.
    pub fn observed(features: &FeatureTable) -> Result<Self> {
        let mut years = features.rows.iter().filter_map(|r| r.year);
        let first = years
            .next()
            .ok_or_else(|| Error::EmptyInput("no document has a release year".into()))?;
        let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Ok(Self { min, max })
    }

    /// Use configured bounds where given and observed bounds otherwise.
    pub fn resolve(min: Option<i32>, max: Option<i32>, features: &FeatureTable) -> Result<Self> {
        match (min, max) {
            (Some(lo), Some(hi)) => Self::new(lo, hi),
            (lo, hi) => {
                let observed = Self::observed(features)?;
                Self::new(lo.unwrap_or(observed.min), hi.unwrap_or(observed.max))
            }
        }
    }

    /// First year
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Last year
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Whether `year` falls inside the range
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Every year of the range, ascending
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.min..=self.max
    }
}

/// Groups document features into a per-year table.
#[derive(Debug, Clone, Copy)]
pub struct YearAggregator<'a> {
    stopwords: &'a StopWords,
    edge_fill: EdgeFill,
}

impl<'a> YearAggregator<'a> {
    /// Create an aggregator with the default edge policy.
    pub fn new(stopwords: &'a StopWords) -> Self {
        Self { stopwords, edge_fill: EdgeFill::default() }
    }

    /// Set the policy for leading and trailing gaps.
    #[must_use]
    pub const fn edge_fill(mut self, edge_fill: EdgeFill) -> Self {
        self.edge_fill = edge_fill;
        self
    }

    /// Build the year table.
    ///
    /// `documents` must be the documents `features` was extracted from, in
    /// the same order; their text feeds the yearly vocabulary measures.
    pub fn aggregate(&self, features: &FeatureTable, documents: &[Document], range: YearRange) -> Result<YearTable> {
        if features.is_empty() {
            return Err(Error::EmptyInput("feature table has no rows".into()));
        }
        if features.len() != documents.len() {
            return Err(Error::Msg(format!(
                "{} feature rows for {} documents",
                features.len(),
                documents.len()
            )));
        }
        let range = YearRange::new(range.min, range.max)?;
        let start = Instant::now();

        let mut groups: BTreeMap<i32, Vec<(&DocumentFeatures, &Document)>> = BTreeMap::new();
        let mut skipped = 0usize;
        for (row, doc) in features.rows.iter().zip(documents) {
            match row.year {
                Some(year) if range.contains(year) => groups.entry(year).or_default().push((row, doc)),
                Some(year) => {
                    tracing::debug!("Skipping {} ({year} is outside {}..={})", row.identifier, range.min, range.max);
                    skipped += 1;
                }
                None => {
                    tracing::debug!("Skipping {} (no release year)", row.identifier);
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            tracing::warn!("Skipped {skipped} documents without a year in {}..={}", range.min, range.max);
        }

        let lexicon_count = features.lexicon_names.len();
        let mut rows: Vec<YearAggregate> = range
            .years()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|year| match groups.get(&year) {
                Some(members) => self.year_row(year, members, lexicon_count),
                None => YearAggregate::empty(year, lexicon_count),
            })
            .collect();

        let filled_years = rows.iter().filter(|r| r.song_count == 0).count();
        self.fill_gaps(&mut rows);

        let elapsed = start.elapsed();
        tracing::info!(
            "Aggregated {} documents into {} years ({filled_years} without songs) in {elapsed:?}",
            features.len() - skipped,
            rows.len()
        );

        Ok(YearTable {
            lexicon_names: features.lexicon_names.clone(),
            rows,
        })
    }

    /// Means and vocabulary measures for one year with at least one document.
    fn year_row(&self, year: i32, members: &[(&DocumentFeatures, &Document)], lexicon_count: usize) -> YearAggregate {
        let n = members.len() as f64;
        let mean = |f: &dyn Fn(&DocumentFeatures) -> f64| members.iter().map(|(r, _)| f(*r)).sum::<f64>() / n;

        let lexicon_means = (0..lexicon_count)
            .map(|i| Some(mean(&|r| r.lexicon_counts.get(i).copied().unwrap_or(0) as f64)))
            .collect();

        let text = members
            .iter()
            .map(|(_, d)| d.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let bow = BagOfWords::from_tokens(tokenize(&text));
        let total_words = bow.total();
        let vocabulary_size = bow.distinct_excluding(self.stopwords);
        let lexical_diversity = if total_words == 0 {
            0.0
        } else {
            vocabulary_size as f64 / total_words as f64
        };

        YearAggregate {
            year,
            lexicon_means,
            lexical_density: Some(mean(&|r| r.lexical_density)),
            sentiment: Some(mean(&|r| r.sentiment)),
            vocabulary_size: Some(vocabulary_size as f64),
            lexical_diversity: Some(lexical_diversity),
            total_words: Some(total_words as f64),
            song_count: members.len(),
        }
    }

    /// Interpolate every metric column across the year axis.
    fn fill_gaps(&self, rows: &mut [YearAggregate]) {
        let Some(width) = rows.first().map(|r| r.metrics().len()) else {
            return;
        };
        let mut columns: Vec<Vec<Option<f64>>> = (0..width)
            .map(|c| rows.iter().map(|r| r.metrics()[c]).collect())
            .collect();
        for column in &mut columns {
            interpolate(column, self.edge_fill);
        }
        for (i, row) in rows.iter_mut().enumerate() {
            let values: Vec<Option<f64>> = columns.iter().map(|c| c[i]).collect();
            row.set_metrics(&values);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn features(rows: &[(Option<i32>, f64, u64)]) -> FeatureTable {
        FeatureTable {
            lexicon_names: vec!["I-words".into()],
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, &(year, density, count))| DocumentFeatures {
                    identifier: format!("doc{i}"),
                    year,
                    lexicon_counts: vec![count],
                    total_words: 4,
                    lexical_density: density,
                    sentiment: 0.0,
                })
                .collect(),
        }
    }

    fn documents(table: &FeatureTable, text: &str) -> Vec<Document> {
        table
            .rows
            .iter()
            .map(|r| Document::new(r.identifier.clone(), r.year, text))
            .collect()
    }

    #[test]
    fn interpolates_empty_interior_year() {
        let table = features(&[(Some(2009), 50.0, 1), (Some(2011), 70.0, 3)]);
        let docs = documents(&table, "money on my mind");
        let stops = StopWords::english();
        let years = YearAggregator::new(&stops)
            .aggregate(&table, &docs, YearRange::new(2009, 2011).unwrap())
            .unwrap();

        assert_eq!(years.rows.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2009, 2010, 2011]);
        let gap = years.get(2010).unwrap();
        assert_eq!(gap.song_count, 0);
        assert!((gap.lexical_density.unwrap() - 60.0).abs() < 1e-9);
        assert!((gap.lexicon_means[0].unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn means_and_vocabulary_per_year() {
        let table = features(&[(Some(2010), 40.0, 2), (Some(2010), 60.0, 4)]);
        let docs = vec![
            Document::new("a", Some(2010), "the power the power"),
            Document::new("b", Some(2010), "no one man"),
        ];
        let stops = StopWords::english();
        let years = YearAggregator::new(&stops)
            .aggregate(&table, &docs, YearRange::new(2010, 2010).unwrap())
            .unwrap();

        let row = &years.rows[0];
        assert_eq!(row.song_count, 2);
        assert_eq!(row.lexicon_means, vec![Some(3.0)]);
        assert_eq!(row.lexical_density, Some(50.0));
        assert_eq!(row.total_words, Some(7.0));
        // "power", "one", "man"; "the" and "no" are stopwords
        assert_eq!(row.vocabulary_size, Some(3.0));
        assert!((row.lexical_diversity.unwrap() - 3.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_and_undated_documents_are_skipped() {
        let table = features(&[(Some(1999), 10.0, 0), (None, 20.0, 0), (Some(2001), 30.0, 0)]);
        let docs = documents(&table, "words");
        let stops = StopWords::english();
        let years = YearAggregator::new(&stops)
            .aggregate(&table, &docs, YearRange::new(2000, 2002).unwrap())
            .unwrap();

        assert_eq!(years.rows.len(), 3);
        assert_eq!(years.rows.iter().map(|r| r.song_count).sum::<usize>(), 1);
        // held outward from 2001
        assert_eq!(years.get(2000).unwrap().lexical_density, Some(30.0));
        assert_eq!(years.get(2002).unwrap().lexical_density, Some(30.0));
    }

    #[test]
    fn missing_edge_fill_leaves_edges_empty() {
        let table = features(&[(Some(2001), 30.0, 0)]);
        let docs = documents(&table, "words");
        let stops = StopWords::english();
        let years = YearAggregator::new(&stops)
            .edge_fill(EdgeFill::Missing)
            .aggregate(&table, &docs, YearRange::new(2000, 2002).unwrap())
            .unwrap();
        assert_eq!(years.get(2000).unwrap().lexical_density, None);
        assert_eq!(years.get(2001).unwrap().lexical_density, Some(30.0));
        assert_eq!(years.get(2002).unwrap().sentiment, None);
    }

    #[test]
    fn empty_table_is_empty_input() {
        let stops = StopWords::english();
        let err = YearAggregator::new(&stops)
            .aggregate(&FeatureTable::default(), &[], YearRange::new(2000, 2001).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn year_range_validation_and_resolution() {
        assert!(matches!(YearRange::new(2011, 2009), Err(Error::Config { .. })));

        let table = features(&[(Some(2004), 0.0, 0), (None, 0.0, 0), (Some(2016), 0.0, 0)]);
        let observed = YearRange::observed(&table).unwrap();
        assert_eq!((observed.min(), observed.max()), (2004, 2016));

        let partial = YearRange::resolve(Some(2008), None, &table).unwrap();
        assert_eq!((partial.min(), partial.max()), (2008, 2016));
        assert_eq!(partial.years().count(), 9);

        let undated = features(&[(None, 0.0, 0)]);
        assert!(matches!(YearRange::observed(&undated), Err(Error::EmptyInput(_))));
    }
}
