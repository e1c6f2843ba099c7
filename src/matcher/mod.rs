//! Lexicon pattern counting.

use rayon::prelude::*;
use regex::Regex;

use crate::lexicon::LexiconSet;
use crate::types::Document;

/// Count non-overlapping matches of each pattern in `text`, in pattern order.
pub fn count_matches(patterns: &[&Regex], text: &str) -> Vec<u64> {
    if text.is_empty() {
        return vec![0; patterns.len()];
    }
    patterns
        .iter()
        .map(|p| p.find_iter(text).count() as u64)
        .collect()
}

/// Count matches for every document. Rows follow document input order.
pub fn count_matches_batch(patterns: &[&Regex], documents: &[Document]) -> Vec<Vec<u64>> {
    documents
        .par_iter()
        .map(|doc| count_matches(patterns, &doc.text))
        .collect()
}

/// Per-lexicon match counting over a [`LexiconSet`].
#[derive(Debug)]
pub struct PatternMatcher<'a> {
    lexicons: &'a LexiconSet,
    patterns: Vec<Vec<&'a Regex>>,
}

impl<'a> PatternMatcher<'a> {
    /// Prepare the pattern lists of every lexicon.
    pub fn new(lexicons: &'a LexiconSet) -> Self {
        let patterns = lexicons.lexicons().iter().map(|l| l.patterns()).collect();
        Self { lexicons, patterns }
    }

    /// Sum of all label matches, one total per lexicon.
    pub fn lexicon_totals(&self, text: &str) -> Vec<u64> {
        self.patterns
            .iter()
            .map(|p| count_matches(p, text).iter().sum())
            .collect()
    }

    /// `(lexicon, label, count)` for every entry of every lexicon.
    pub fn label_counts(&self, text: &str) -> Vec<(&'a str, &'a str, u64)> {
        self.lexicons
            .lexicons()
            .iter()
            .zip(&self.patterns)
            .flat_map(|(lexicon, patterns)| {
                lexicon
                    .labels()
                    .zip(count_matches(patterns, text))
                    .map(|(label, count)| (lexicon.name.as_str(), label, count))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
