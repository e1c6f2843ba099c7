//! Run configuration.
//!
//! Loaded from environment variables and an optional `.env` file; command
//! line flags override individual fields afterwards.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::aggregate::EdgeFill;
use crate::constants::{aggregate, corpus, lexicon, output};
use crate::error::{Error, Result};
use crate::lexicon::LexiconSpec;

/// Configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the per-year lyric folders
    pub lyrics_dir: PathBuf,
    /// Scraped lyrics table (JSON or CSV); used instead of `lyrics_dir` when set
    pub lyrics_table: Option<PathBuf>,
    /// Directory scanned for lexicon files when no explicit lexicons are given
    pub lexicon_dir: PathBuf,
    /// Explicit lexicon files
    pub lexicons: Vec<LexiconSpec>,
    /// Stopword list; the built-in English list when unset
    pub stopwords_path: Option<PathBuf>,
    /// Directory receiving every output file
    pub output_dir: PathBuf,
    /// First year of the aggregation range; observed when unset
    pub min_year: Option<i32>,
    /// Last year of the aggregation range; observed when unset
    pub max_year: Option<i32>,
    /// Stem tokens before counting words
    pub stem: bool,
    /// Trailing moving-average window, in years
    pub smoothing_window: usize,
    /// Policy for leading and trailing year gaps
    pub edge_fill: EdgeFill,
    /// Minimum lyric length kept from a scraped table
    pub min_text_len: usize,
    /// Title fragments (regex) excluded from a scraped table
    pub excluded_titles: Vec<String>,
    /// Worker threads; rayon's default when unset
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lyrics_dir: PathBuf::from(corpus::DEFAULT_LYRICS_DIR),
            lyrics_table: None,
            lexicon_dir: PathBuf::from(lexicon::DEFAULT_LEXICON_DIR),
            lexicons: Vec::new(),
            stopwords_path: None,
            output_dir: PathBuf::from(output::DEFAULT_OUTPUT_DIR),
            min_year: None,
            max_year: None,
            stem: false,
            smoothing_window: aggregate::DEFAULT_SMOOTHING_WINDOW,
            edge_fill: EdgeFill::Hold,
            min_text_len: corpus::DEFAULT_MIN_TEXT_LEN,
            excluded_titles: corpus::NON_SONG_TITLE_PATTERNS.iter().map(|p| (*p).to_string()).collect(),
            threads: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Some(path) = env_path("LYRICS_DIR") {
            config.lyrics_dir = path;
        }
        config.lyrics_table = env_path("LYRICS_TABLE");
        if let Some(path) = env_path("LEXICON_DIR") {
            config.lexicon_dir = path;
        }
        config.stopwords_path = env_path("STOPWORDS_PATH");
        if let Some(path) = env_path("OUTPUT_DIR") {
            config.output_dir = path;
        }

        config.min_year = env_parse("MIN_YEAR")?;
        config.max_year = env_parse("MAX_YEAR")?;
        if let Some(stem) = env_flag("STEM_TOKENS")? {
            config.stem = stem;
        }
        if let Some(window) = env_parse("SMOOTHING_WINDOW")? {
            config.smoothing_window = window;
        }
        if let Some(edge) = env_parse("EDGE_FILL")? {
            config.edge_fill = edge;
        }
        if let Some(len) = env_parse("MIN_TEXT_LEN")? {
            config.min_text_len = len;
        }
        if let Some(titles) = env_list("EXCLUDED_TITLES") {
            config.excluded_titles = titles;
        }
        config.threads = env_parse("THREADS")?;

        Ok(config)
    }

    /// Reject settings that cannot produce a run.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_year, self.max_year) {
            if min > max {
                return Err(Error::config(
                    format!("min_year {min} is after max_year {max}"),
                    "MIN_YEAR must not exceed MAX_YEAR",
                ));
            }
        }
        if self.smoothing_window == 0 {
            return Err(Error::config(
                "smoothing window is 0",
                "Set SMOOTHING_WINDOW or --window to at least 1",
            ));
        }
        if self.threads == Some(0) {
            return Err(Error::config("thread count is 0", "Leave THREADS unset to use every core"));
        }
        Ok(())
    }

    /// Human-readable name of the document source
    pub fn source_label(&self) -> String {
        self.lyrics_table
            .as_ref()
            .unwrap_or(&self.lyrics_dir)
            .display()
            .to_string()
    }
}

/// Expand `~` in a path taken from the environment or the command line.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).to_string())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| expand_path(v.trim()))
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| Error::config(format!("{key}={raw} is not a valid value"), "Fix or unset the variable"))
}

/// Comma-separated list; set but blank means an empty list.
fn env_list(key: &str) -> Option<Vec<String>> {
    let raw = env::var(key).ok()?;
    Some(split_list(&raw))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn env_flag(key: &str) -> Result<Option<bool>> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(Error::config(format!("{key}={raw} is not a boolean"), "Use true or false")),
    }
}
