//! `lyricscope` - lexicon and stylistic trend analysis for lyric corpora.
//!
//! Counts regex lexicon matches per song, measures lexical density,
//! vocabulary and polarity, and aggregates everything into per-year
//! tables with interpolated gaps and moving averages.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod error;
pub mod export;
pub mod features;
pub mod lexicon;
pub mod matcher;
pub mod pipeline;
pub mod text;
pub mod types;

pub use error::{Error, Result};
