//! Lexicon-based polarity scoring.
//!
//! Each polar word carries a score in [-1, 1]. An intensifier directly before
//! a polar word scales it, a negation flips it at half strength. The text's
//! polarity is the mean over its polar words, clamped to [-1, 1]; text with no
//! polar words scores 0.0.

use std::collections::{HashMap, HashSet};

use crate::text::tokenizer::tokenize;

/// Polar words and their scores.
const POLARITY: &[(&str, f64)] = &[
    // positive
    ("love", 0.5), ("loved", 0.7), ("lovely", 0.5), ("loving", 0.6),
    ("good", 0.7), ("great", 0.8), ("greatest", 1.0), ("best", 1.0),
    ("better", 0.5), ("amazing", 0.6), ("awesome", 1.0), ("beautiful", 0.85),
    ("perfect", 1.0), ("wonderful", 1.0), ("excellent", 1.0), ("fantastic", 0.4),
    ("happy", 0.8), ("glad", 0.5), ("joy", 0.8), ("fun", 0.3), ("free", 0.4),
    ("nice", 0.6), ("sweet", 0.35), ("smile", 0.3), ("bright", 0.7),
    ("rich", 0.375), ("fresh", 0.3), ("cool", 0.35), ("hot", 0.25),
    ("win", 0.8), ("winning", 0.5), ("winner", 0.8), ("champion", 0.6),
    ("blessed", 0.5), ("proud", 0.8), ("strong", 0.43), ("true", 0.35),
    ("real", 0.2), ("super", 0.33), ("genius", 0.6), ("legend", 0.5),
    ("famous", 0.5), ("incredible", 0.9), ("brilliant", 0.9), ("peace", 0.5),
    ("heaven", 0.6), ("gold", 0.3), ("shine", 0.4), ("shining", 0.4),
    ("fly", 0.2), ("fine", 0.42), ("safe", 0.5), ("pretty", 0.25),
    ("alright", 0.3), ("okay", 0.5), ("ok", 0.5), ("right", 0.29),
    ("wise", 0.7), ("kind", 0.6), ("faith", 0.3), ("hope", 0.3),
    ("success", 0.3), ("successful", 0.75), ("lucky", 0.33), ("easy", 0.43),
    ("grateful", 0.6), ("thankful", 0.6), ("glory", 0.5), ("king", 0.2),
    // negative
    ("bad", -0.7), ("worse", -0.4), ("worst", -1.0), ("hate", -0.8),
    ("hated", -0.9), ("sad", -0.5), ("cry", -0.4), ("crying", -0.4),
    ("pain", -0.6), ("hurt", -0.5), ("broke", -0.4), ("broken", -0.4),
    ("lonely", -0.5), ("alone", -0.3), ("dead", -0.2), ("die", -0.5),
    ("dying", -0.5), ("death", -0.5), ("kill", -0.6), ("killing", -0.6),
    ("evil", -1.0), ("wrong", -0.5), ("fake", -0.5), ("crazy", -0.6),
    ("mad", -0.625), ("angry", -0.5), ("dark", -0.15), ("cold", -0.6),
    ("sick", -0.71), ("tired", -0.4), ("scared", -0.5), ("afraid", -0.6),
    ("fear", -0.5), ("stupid", -0.8), ("dumb", -0.375), ("ugly", -0.7),
    ("poor", -0.4), ("lost", -0.3), ("lose", -0.4), ("losing", -0.4),
    ("hell", -0.6), ("damn", -0.3), ("shit", -0.2), ("terrible", -1.0),
    ("horrible", -1.0), ("awful", -1.0), ("nasty", -1.0), ("weak", -0.375),
    ("hard", -0.29), ("difficult", -0.5), ("sorry", -0.5), ("shame", -0.5),
    ("trouble", -0.4), ("problem", -0.3), ("problems", -0.3), ("hurting", -0.5),
    ("misery", -0.8), ("miserable", -1.0), ("cruel", -1.0), ("jealous", -0.5),
    ("paranoid", -0.5), ("insane", -0.5), ("dirty", -0.6), ("guilty", -0.5),
];

/// Words that scale the next polar word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("so", 1.2), ("too", 1.2), ("extremely", 1.5),
    ("absolutely", 1.5), ("totally", 1.4), ("truly", 1.3), ("most", 1.3),
    ("hella", 1.4), ("mighty", 1.2),
];

/// Words that flip the next polar word.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor",
    "ain't", "can't", "cannot", "don't", "won't", "isn't", "wasn't", "didn't",
    "doesn't", "couldn't", "wouldn't", "shouldn't", "aren't",
];

/// Negated scores keep this share of their magnitude, with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

/// Scores text polarity from word lists.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    polarity: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    /// A scorer with the built-in English word lists.
    pub fn new() -> Self {
        Self::with_lexicon(POLARITY.iter().map(|(w, s)| ((*w).to_string(), *s)).collect())
    }

    /// A scorer with custom word polarities (clamped to [-1, 1]) and the built-in modifiers.
    pub fn with_lexicon(polarity: HashMap<String, f64>) -> Self {
        Self {
            polarity: polarity
                .into_iter()
                .map(|(w, s)| (w.to_lowercase(), s.clamp(-1.0, 1.0)))
                .collect(),
            intensifiers: INTENSIFIERS.iter().map(|(w, m)| ((*w).to_string(), *m)).collect(),
            negations: NEGATIONS.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// Polarity of `text` in [-1, 1]; 0.0 for empty or neutral text.
    pub fn score(&self, text: &str) -> f64 {
        let mut scores = Vec::new();
        let mut negated = false;
        let mut intensity = 1.0;

        for token in tokenize(text) {
            if let Some(&polarity) = self.polarity.get(&token) {
                let mut s = polarity * intensity;
                if negated {
                    s *= NEGATION_FACTOR;
                }
                scores.push(s.clamp(-1.0, 1.0));
                negated = false;
                intensity = 1.0;
            } else if self.negations.contains(&token) || token.ends_with("n't") {
                negated = true;
            } else if let Some(&m) = self.intensifiers.get(&token) {
                intensity *= m;
            } else {
                negated = false;
                intensity = 1.0;
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}
