//! Best-effort text file reading.

use std::path::Path;

use crate::error::{Error, Result};

/// Text read from disk, with invalid UTF-8 replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Decoded content
    pub text: String,
    /// Whether replacement characters were inserted
    pub replaced: bool,
}

impl DecodedText {
    /// Length in characters, newline characters excluded
    pub fn char_len(&self) -> usize {
        self.text.chars().filter(|&c| c != '\n').count()
    }
}

/// Read a file, replacing invalid UTF-8 sequences instead of failing.
///
/// Only a failure to read the bytes is an error; bad encoding is logged as a
/// warning and the recovered text is returned.
pub fn read_lossy(path: &Path) -> Result<DecodedText> {
    let bytes = fs_err::read(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(DecodedText { text, replaced: false }),
        Err(e) => {
            let err = Error::decode(path, format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()));
            tracing::warn!("{err}; continuing with replacement characters");
            Ok(DecodedText {
                text: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                replaced: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn reads_valid_utf8_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();
        let decoded = read_lossy(&path).unwrap();
        assert!(!decoded.replaced);
        assert_eq!(decoded.char_len(), 16);
    }

    #[test]
    fn replaces_invalid_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, b"caf\xe9 best\n").unwrap();
        let decoded = read_lossy(&path).unwrap();
        assert!(decoded.replaced);
        assert!(decoded.text.contains('\u{FFFD}'));
        assert!(decoded.text.ends_with("best\n"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_lossy(Path::new("/nonexistent/lyricscope/song.txt")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
