//! Text processing: normalization, tokens, stopwords and polarity.

pub mod clean;
pub mod sentiment;
pub mod stopwords;
pub mod tokenizer;

pub use sentiment::SentimentScorer;
pub use stopwords::StopWords;
pub use tokenizer::{build_bow, tokenize, BagOfWords, BowBuilder};
