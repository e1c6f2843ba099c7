//! Scraped lyrics tables.
//!
//! A scraped table has the columns `Song Title`, `Date` and `Lyrics`, stored
//! either as a JSON array of records or as CSV with a header row.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::text::clean::{is_placeholder, normalize_lyrics, TitleFilter};
use crate::types::Document;

/// Regex matching a standalone four-digit year.
#[allow(clippy::expect_used)]
static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{4})\b").expect("valid regex: RE_YEAR")
});

/// One scraped song as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScrapedRow {
    /// Song title
    #[serde(rename = "Song Title", default, deserialize_with = "string_or_number")]
    pub title: Option<String>,
    /// Release date or year
    #[serde(rename = "Date", default, deserialize_with = "string_or_number")]
    pub date: Option<String>,
    /// Raw lyrics
    #[serde(rename = "Lyrics", default)]
    pub lyrics: Option<String>,
}

/// Accept strings and bare numbers (a year stored as an integer).
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Raw>::deserialize(d)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(i) => i.to_string(),
        #[allow(clippy::cast_possible_truncation)]
        Raw::Float(f) => (f.trunc() as i64).to_string(),
        Raw::Bool(b) => b.to_string(),
    }))
}

/// Read a scraped table; the format follows the file extension (`.json` or `.csv`).
pub fn load_table(path: &Path) -> Result<Vec<ScrapedRow>> {
    let data = fs_err::read(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let rows = if is_csv {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data.as_slice());
        reader
            .deserialize::<ScrapedRow>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?
    } else {
        serde_json::from_slice::<Vec<ScrapedRow>>(&data)
            .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?
    };

    tracing::info!("Read {} scraped rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Extract the release year from a date string.
///
/// Accepts ISO dates, RFC 3339 timestamps, `Month D, YYYY`, or any text
/// containing a standalone four-digit year.
pub fn parse_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d.year());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.year());
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%B %d, %Y") {
        return Some(d.year());
    }
    RE_YEAR
        .captures(date)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
}

/// Rules deciding which scraped rows become documents.
#[derive(Debug, Clone)]
pub struct CleaningRules {
    /// Titles to drop
    pub title_filter: TitleFilter,
    /// Minimum length of the normalized lyrics, in characters
    pub min_text_len: usize,
}

/// How many rows each rule dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningReport {
    /// Rows read
    pub total: usize,
    /// No lyrics or no parseable date
    pub missing_fields: usize,
    /// Title matched the exclusion filter
    pub excluded_title: usize,
    /// Placeholder lyrics
    pub placeholder: usize,
    /// Lyrics shorter than the minimum
    pub too_short: usize,
    /// Rows kept
    pub kept: usize,
}

/// Turn scraped rows into normalized documents, dropping unusable rows.
pub fn into_documents(rows: Vec<ScrapedRow>, rules: &CleaningRules) -> (Vec<Document>, CleaningReport) {
    let mut report = CleaningReport { total: rows.len(), ..CleaningReport::default() };
    let mut documents = Vec::new();

    for row in rows {
        let (Some(lyrics), Some(year)) = (row.lyrics, row.date.as_deref().and_then(parse_year)) else {
            report.missing_fields += 1;
            continue;
        };
        let title = row.title.unwrap_or_default();
        if rules.title_filter.excludes(&title) {
            tracing::debug!("Dropping non-song '{title}'");
            report.excluded_title += 1;
            continue;
        }
        let text = normalize_lyrics(&lyrics);
        if is_placeholder(&text) {
            report.placeholder += 1;
            continue;
        }
        if text.chars().count() < rules.min_text_len {
            report.too_short += 1;
            continue;
        }
        documents.push(Document::new(title, Some(year), text));
    }

    report.kept = documents.len();
    tracing::info!(
        "Scraped table cleaned - total={}, kept={}, missing_fields={}, excluded_title={}, placeholder={}, too_short={}",
        report.total, report.kept, report.missing_fields, report.excluded_title, report.placeholder, report.too_short
    );
    (documents, report)
}
