//! Lyric text normalization and filtering.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::corpus::PLACEHOLDER_MARKERS;
use crate::error::{Error, Result};

/// Regex matching section tags like `[Chorus]` or `[Verse 2: Kanye West]`.
#[allow(clippy::expect_used)]
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]*\]").expect("valid regex: RE_TAG")
});

/// Flatten line breaks to spaces and drop bracketed section tags.
pub fn normalize_lyrics(raw: &str) -> String {
    let flat: String = raw
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    RE_TAG.replace_all(&flat, "").into_owned()
}

/// Whether the text is a placeholder for unreleased lyrics.
pub fn is_placeholder(text: &str) -> bool {
    PLACEHOLDER_MARKERS.iter().any(|m| text.contains(m))
}

/// Rejects scraped rows whose titles mark them as something other than a song.
#[derive(Debug, Clone)]
pub struct TitleFilter {
    pattern: Option<Regex>,
}

impl TitleFilter {
    /// Build a filter from regex fragments; any match excludes the title.
    pub fn new<S: AsRef<str>>(fragments: &[S]) -> Result<Self> {
        if fragments.is_empty() {
            return Ok(Self { pattern: None });
        }
        let joined = fragments
            .iter()
            .map(|f| format!("(?:{})", f.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&joined).map_err(|e| {
            Error::config(format!("invalid title filter: {e}"), "Check the excluded title patterns")
        })?;
        Ok(Self { pattern: Some(pattern) })
    }

    /// A filter that keeps every title.
    pub const fn none() -> Self {
        Self { pattern: None }
    }

    /// Whether the title should be dropped
    pub fn excludes(&self, title: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(title))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::constants::corpus::NON_SONG_TITLE_PATTERNS;

    #[test]
    fn strips_tags_and_line_breaks() {
        let text = normalize_lyrics("[Intro]\nYeah, yeah\r\n[Verse 1: Kanye West]\nI'm the best");
        assert_eq!(text.split_whitespace().collect::<Vec<_>>(), vec!["Yeah,", "yeah", "I'm", "the", "best"]);
        assert!(!text.contains('\n'));
        assert!(!text.contains('['));
    }

    #[test]
    fn detects_placeholders() {
        assert!(is_placeholder("Lyrics for this song have yet to be released"));
        assert!(!is_placeholder("I am the greatest"));
    }

    #[test]
    fn title_filter_matches_fragments() {
        let filter = TitleFilter::new(NON_SONG_TITLE_PATTERNS).unwrap();
        assert!(filter.excludes("Power (Demo)"));
        assert!(filter.excludes("On Sight Lecture"));
        assert!(filter.excludes("Stronger [Snippet]"));
        assert!(!filter.excludes("Stronger"));
        assert!(!TitleFilter::none().excludes("Freestyle"));
    }

    #[test]
    fn default_titles_cover_guest_cuts_and_stray_brackets() {
        let filter = TitleFilter::new(NON_SONG_TITLE_PATTERNS).unwrap();
        for title in ["Two Words (Mos Def cut)", "Taylor Swift Interruption", "2 Ryde", "Stronger ]"] {
            assert!(filter.excludes(title), "{title} should be excluded");
        }
        assert!(!filter.excludes("Good Life"));
    }

    #[test]
    fn invalid_fragment_is_config_error() {
        assert!(TitleFilter::new(&["(oops"][..]).is_err());
    }
}
