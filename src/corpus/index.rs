//! Corpus index for a directory of per-year lyric folders.
//!
//! Layout: `<root>/<year>/<song>.txt`. The folder name gives the release year
//! and the file name (minus `.txt`) gives the song name.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::constants::corpus::{IGNORED_FILES, TEXT_EXTENSION};
use crate::corpus::reader::read_lossy;
use crate::error::{Error, Result};
use crate::text::clean::normalize_lyrics;
use crate::types::{CorpusEntry, Document};

/// Index of the lyric files below a corpus root
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    root: PathBuf,
    /// Indexed files, sorted by year folder then file name
    pub entries: Vec<CorpusEntry>,
    /// Decoded text of each entry, `None` when the file could not be read
    texts: Vec<Option<String>>,
}

impl CorpusIndex {
    /// Walk `root` and index every song file two levels down.
    pub fn build(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::config(
                format!("corpus root {} does not exist or is not a directory", root.display()),
                "Set LYRICS_DIR or pass --lyrics-dir",
            ));
        }

        let start = Instant::now();
        let files: Vec<PathBuf> = WalkDir::new(root)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                let name = e.file_name().to_string_lossy();
                !name.starts_with('.') && !IGNORED_FILES.contains(&&*name)
            })
            .map(walkdir::DirEntry::into_path)
            .collect();

        let (entries, texts): (Vec<CorpusEntry>, Vec<Option<String>>) =
            files.par_iter().map(|path| index_entry(path)).unzip();

        let count = entries.len();
        let elapsed = start.elapsed();
        tracing::info!("Indexed {count} song files under {} in {elapsed:?}", root.display());

        Ok(Self { root: root.to_path_buf(), entries, texts })
    }

    /// Corpus root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of indexed files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no files were found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Turn every indexed file into a normalized document, in index order.
    ///
    /// Uses the text read while indexing; files are not read again. A file
    /// that could not be read still yields a document, with empty text.
    pub fn load_documents(&self) -> Vec<Document> {
        self.entries
            .par_iter()
            .zip(&self.texts)
            .map(|(entry, raw)| {
                let text = match raw {
                    Some(raw) => normalize_lyrics(raw),
                    None => {
                        tracing::warn!("Keeping {} with empty text", entry.path.display());
                        String::new()
                    }
                };
                Document::new(entry.path.to_string_lossy(), entry.year, text)
            })
            .collect()
    }
}

/// Build the index row for one file, along with its decoded text.
fn index_entry(path: &Path) -> (CorpusEntry, Option<String>) {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let song_name = song_name(&file_name);
    let year = path.parent().and_then(year_from_dir);
    let (length, text) = match read_lossy(path) {
        Ok(decoded) => (decoded.char_len(), Some(decoded.text)),
        Err(e) => {
            tracing::warn!("Cannot read {}: {e}", path.display());
            (0, None)
        }
    };

    let entry = CorpusEntry {
        path: path.to_path_buf(),
        year,
        file_name,
        song_name,
        length,
    };
    (entry, text)
}

/// Strip the text extension from a file name.
fn song_name(file_name: &str) -> String {
    file_name
        .strip_suffix(TEXT_EXTENSION)
        .unwrap_or(file_name)
        .to_string()
}

/// Parse the release year from a folder name like `2010`.
fn year_from_dir(dir: &Path) -> Option<i32> {
    let name = dir.file_name()?.to_string_lossy();
    let year = name.trim().parse::<i32>().ok();
    if year.is_none() {
        tracing::warn!("Folder {} is not a year; its songs have no year", dir.display());
    }
    year
}
