//! Corpus loading: per-year lyric folders and scraped lyric tables.

pub mod index;
pub mod reader;
pub mod scraped;

pub use index::CorpusIndex;
pub use reader::{read_lossy, DecodedText};
pub use scraped::{into_documents, load_table, parse_year, CleaningReport, CleaningRules, ScrapedRow};
