//! Word tokenization and bags of words.
//!
//! A token is a maximal run of `[a-z'\-&*]` between word boundaries, taken
//! from the lowercased text. The character class keeps contractions
//! (`don't`), hyphenated words and censored words (`f**k`) whole, and drops
//! numbers. Zero-length tokens are never returned.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::text::stopwords::StopWords;

/// Regex matching one conventional word in lowercased text.
#[allow(clippy::expect_used)]
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-z'&*-]+\b").expect("valid regex: RE_WORD")
});

/// Split text into lowercase tokens, left to right.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    RE_WORD
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Token → occurrence count for one span of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BagOfWords {
    counts: HashMap<String, u64>,
}

impl BagOfWords {
    /// Count tokens. Empty tokens are dropped.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = HashMap::new();
        for token in tokens {
            let token = token.into();
            if token.is_empty() {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrences of one token
    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct tokens
    pub fn vocabulary_size(&self) -> usize {
        self.counts.len()
    }

    /// Total number of tokens that are not stopwords
    pub fn count_excluding(&self, stopwords: &StopWords) -> u64 {
        self.counts
            .iter()
            .filter(|(token, _)| !stopwords.contains(token))
            .map(|(_, count)| count)
            .sum()
    }

    /// Number of distinct tokens that are not stopwords
    pub fn distinct_excluding(&self, stopwords: &StopWords) -> usize {
        self.counts.keys().filter(|t| !stopwords.contains(t)).count()
    }

    /// Most frequent non-stopword tokens, ties broken alphabetically.
    pub fn top(&self, n: usize, stopwords: &StopWords) -> Vec<(String, u64)> {
        let mut terms: Vec<(String, u64)> = self
            .counts
            .iter()
            .filter(|(t, _)| !stopwords.contains(t))
            .map(|(t, c)| (t.clone(), *c))
            .collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(n);
        terms
    }

    /// Add every count of `other` into this bag.
    pub fn merge(&mut self, other: Self) {
        for (token, count) in other.counts {
            *self.counts.entry(token).or_insert(0) += count;
        }
    }

    /// Iterate `(token, count)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(t, c)| (t.as_str(), *c))
    }
}

/// Builds bags of words, optionally stemming each token.
pub struct BowBuilder<'a> {
    stemmer: Option<Stemmer>,
    keep_unstemmed: Option<&'a StopWords>,
}

impl std::fmt::Debug for BowBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BowBuilder")
            .field("stem", &self.stemmer.is_some())
            .field("ignore_stopwords", &self.keep_unstemmed.is_some())
            .finish()
    }
}

impl<'a> BowBuilder<'a> {
    /// A builder that counts tokens as they are.
    pub const fn plain() -> Self {
        Self { stemmer: None, keep_unstemmed: None }
    }

    /// A builder that reduces tokens with the English Snowball stemmer.
    pub fn stemmed() -> Self {
        Self {
            stemmer: Some(Stemmer::create(Algorithm::English)),
            keep_unstemmed: None,
        }
    }

    /// Leave stopwords unstemmed so they still match the stopword list.
    #[must_use]
    pub fn ignore_stopwords(mut self, stopwords: &'a StopWords) -> Self {
        self.keep_unstemmed = Some(stopwords);
        self
    }

    /// Whether tokens are stemmed
    pub const fn is_stemming(&self) -> bool {
        self.stemmer.is_some()
    }

    /// Tokenize, stem if enabled, and count.
    pub fn build(&self, text: &str) -> BagOfWords {
        let tokens = tokenize(text);
        match &self.stemmer {
            None => BagOfWords::from_tokens(tokens),
            Some(stemmer) => BagOfWords::from_tokens(tokens.into_iter().map(|t| {
                if self.keep_unstemmed.is_some_and(|s| s.contains(&t)) {
                    t
                } else {
                    stemmer.stem(&t).into_owned()
                }
            })),
        }
    }
}

/// Bag of words for `text`, stemmed with the English Snowball stemmer if `stem` is set.
pub fn build_bow(text: &str, stem: bool) -> BagOfWords {
    if stem {
        BowBuilder::stemmed().build(text)
    } else {
        BowBuilder::plain().build(text)
    }
}
