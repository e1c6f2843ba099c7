//! Per-document features: lexicon counts, lexical density and sentiment.

use std::time::Instant;

use rayon::prelude::*;

use crate::lexicon::LexiconSet;
use crate::matcher::PatternMatcher;
use crate::text::{BagOfWords, BowBuilder, SentimentScorer, StopWords};
use crate::types::{Document, DocumentFeatures, FeatureTable};

/// Computes [`DocumentFeatures`] for documents against a lexicon set.
#[derive(Debug)]
pub struct FeatureExtractor<'a> {
    lexicons: &'a LexiconSet,
    matcher: PatternMatcher<'a>,
    stopwords: &'a StopWords,
    bow: BowBuilder<'a>,
    scorer: SentimentScorer,
}

impl<'a> FeatureExtractor<'a> {
    /// Create an extractor; `stem` enables Snowball stemming of the bag of words.
    pub fn new(lexicons: &'a LexiconSet, stopwords: &'a StopWords, stem: bool) -> Self {
        let bow = if stem {
            BowBuilder::stemmed().ignore_stopwords(stopwords)
        } else {
            BowBuilder::plain()
        };
        Self {
            lexicons,
            matcher: PatternMatcher::new(lexicons),
            stopwords,
            bow,
            scorer: SentimentScorer::new(),
        }
    }

    /// Replace the polarity scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Bag of words for `text` as this extractor builds it
    pub fn bag_of_words(&self, text: &str) -> BagOfWords {
        self.bow.build(text)
    }

    /// Most frequent non-stopword terms across all documents.
    pub fn top_terms(&self, documents: &[Document], n: usize) -> Vec<(String, u64)> {
        let corpus = documents
            .par_iter()
            .map(|doc| self.bow.build(&doc.text))
            .reduce(BagOfWords::default, |mut acc, bow| {
                acc.merge(bow);
                acc
            });
        corpus.top(n, self.stopwords)
    }

    /// Features of one document.
    pub fn extract(&self, document: &Document) -> DocumentFeatures {
        let lexicon_counts = self.matcher.lexicon_totals(&document.text);

        let bow = self.bow.build(&document.text);
        let total_words = bow.total();
        let lexical_density = lexical_density(bow.count_excluding(self.stopwords), total_words);

        let sentiment = if document.text.trim().is_empty() {
            0.0
        } else {
            self.scorer.score(&document.text)
        };

        DocumentFeatures {
            identifier: document.identifier.clone(),
            year: document.year,
            lexicon_counts,
            total_words,
            lexical_density,
            sentiment,
        }
    }

    /// Features of every document, in input order.
    pub fn extract_all(&self, documents: &[Document]) -> FeatureTable {
        let start = Instant::now();
        let rows: Vec<DocumentFeatures> = documents.par_iter().map(|doc| self.extract(doc)).collect();

        let elapsed = start.elapsed();
        tracing::info!(
            "Extracted features for {} documents across {} lexicons in {elapsed:?}",
            rows.len(),
            self.lexicons.len()
        );

        FeatureTable {
            lexicon_names: self.lexicons.names(),
            rows,
        }
    }
}

/// Percentage of tokens that are content words; 0 for an empty document.
fn lexical_density(content_words: u64, total_words: u64) -> f64 {
    if total_words == 0 {
        return 0.0;
    }
    100.0 * content_words as f64 / total_words as f64
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::lexicon::Lexicon;

    fn lexicons() -> LexiconSet {
        LexiconSet::new(vec![
            Lexicon::from_pairs("I-words", [("I", r"\bI\b")]).unwrap(),
            Lexicon::from_pairs("Greatness", [("greatest", r"\bgreatest\b"), ("best", r"\bbest\b")]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn extracts_counts_density_and_sentiment() {
        let set = lexicons();
        let stops = StopWords::english();
        let extractor = FeatureExtractor::new(&set, &stops, false);
        let doc = Document::new("Stronger", Some(2007), "I am the greatest, I am the best");

        let features = extractor.extract(&doc);
        assert_eq!(features.lexicon_counts, vec![2, 2]);
        assert_eq!(features.total_words, 8);
        // "greatest" and "best" are the only content words
        assert!((features.lexical_density - 25.0).abs() < 1e-9);
        assert!(features.sentiment > 0.0 && features.sentiment <= 1.0);
        assert_eq!(features.year, Some(2007));
    }

    #[test]
    fn empty_document_has_zero_features() {
        let set = lexicons();
        let stops = StopWords::english();
        let extractor = FeatureExtractor::new(&set, &stops, false);

        let features = extractor.extract(&Document::new("Empty", Some(2010), ""));
        assert_eq!(features.lexicon_counts, vec![0, 0]);
        assert_eq!(features.total_words, 0);
        assert!(features.lexical_density.abs() < f64::EPSILON);
        assert!(features.sentiment.abs() < f64::EPSILON);
    }

    #[test]
    fn extract_all_preserves_input_order() {
        let set = lexicons();
        let stops = StopWords::english();
        let extractor = FeatureExtractor::new(&set, &stops, true);
        let docs: Vec<Document> = (0..50)
            .map(|i| Document::new(format!("song-{i}"), Some(2000 + i % 5), "I I best".repeat(i as usize % 3)))
            .collect();

        let table = extractor.extract_all(&docs);
        assert_eq!(table.lexicon_names, vec!["I-words", "Greatness"]);
        assert_eq!(table.len(), 50);
        for (i, row) in table.rows.iter().enumerate() {
            assert_eq!(row.identifier, format!("song-{i}"));
            assert!((0.0..=100.0).contains(&row.lexical_density));
            assert!((-1.0..=1.0).contains(&row.sentiment));
        }
    }

    #[test]
    fn top_terms_span_the_corpus() {
        let set = lexicons();
        let stops = StopWords::english();
        let extractor = FeatureExtractor::new(&set, &stops, false);
        let docs = vec![
            Document::new("a", Some(2010), "power power the money"),
            Document::new("b", Some(2011), "money power fame"),
        ];
        assert_eq!(
            extractor.top_terms(&docs, 2),
            vec![("power".to_string(), 3), ("money".to_string(), 2)]
        );
    }

    #[test]
    fn stemming_keeps_stopwords_recognizable() {
        let set = lexicons();
        let stops = StopWords::english();
        let extractor = FeatureExtractor::new(&set, &stops, true);
        let bow = extractor.bag_of_words("was running was");
        assert_eq!(bow.get("was"), 2);
        assert_eq!(bow.get("run"), 1);
    }
}
