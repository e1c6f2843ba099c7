//! Lexicon loading.
//!
//! A lexicon is a tab-delimited file with a header row and (at least) the
//! columns `Label` and `Regex`. Each row becomes one case-insensitive pattern
//! whose match count is reported under its label.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::{Regex, RegexBuilder};

use crate::constants::lexicon::{FILE_EXTENSIONS, LABEL_COLUMN, REGEX_COLUMN};
use crate::error::{Error, Result};

/// One labelled pattern.
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    /// Output column name
    pub label: String,
    /// Compiled, case-insensitive pattern
    pub pattern: Regex,
}

impl LexiconEntry {
    /// Compile a pattern case-insensitively.
    pub fn new(label: impl Into<String>, pattern: &str) -> Result<Self> {
        let label = label.into();
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                Error::config(
                    format!("pattern for label '{label}' does not compile: {e}"),
                    "Fix the Regex column of the lexicon file",
                )
            })?;
        Ok(Self { label, pattern })
    }
}

/// A named, ordered set of labelled patterns.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Lexicon name, used as the feature column name
    pub name: String,
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Build a lexicon from `(label, pattern)` pairs.
    pub fn from_pairs<I, L, P>(name: impl Into<String>, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: AsRef<str>,
    {
        let name = name.into();
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for (label, pattern) in pairs {
            let entry = LexiconEntry::new(label, pattern.as_ref())?;
            if !seen.insert(entry.label.clone()) {
                return Err(Error::config(
                    format!("label '{}' repeats in lexicon '{name}'", entry.label),
                    "Labels must be unique within a lexicon",
                ));
            }
            entries.push(entry);
        }
        Ok(Self { name, entries })
    }

    /// Load a lexicon from a tab-delimited file.
    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self> {
        let name = name.into();
        let data = fs_err::read(path).map_err(|e| {
            Error::config(
                format!("cannot read lexicon '{name}': {e}"),
                "Check the lexicon path",
            )
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(true)
            .from_reader(data.as_slice());

        let headers = reader
            .headers()
            .map_err(|e| {
                Error::config(format!("lexicon '{name}' has no header row: {e}"), "Add a 'Label\\tRegex' header")
            })?
            .clone();
        let column = |wanted: &str| headers.iter().position(|h| h.trim() == wanted);
        let (Some(label_idx), Some(regex_idx)) = (column(LABEL_COLUMN), column(REGEX_COLUMN)) else {
            return Err(Error::config(
                format!("lexicon '{name}' ({}) lacks a '{LABEL_COLUMN}' or '{REGEX_COLUMN}' column", path.display()),
                "The header row must name both columns",
            ));
        };

        let mut pairs = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                Error::config(format!("lexicon '{name}' row {}: {e}", line + 2), "Check the file is tab-delimited")
            })?;
            let (Some(label), Some(pattern)) = (record.get(label_idx), record.get(regex_idx)) else {
                return Err(Error::config(
                    format!("lexicon '{name}' row {} is missing a column", line + 2),
                    "Every row needs a label and a pattern",
                ));
            };
            pairs.push((label.trim().to_string(), pattern.to_string()));
        }

        let lexicon = Self::from_pairs(name, pairs)?;
        if lexicon.is_empty() {
            tracing::warn!("Lexicon '{}' at {} has no entries", lexicon.name, path.display());
        }
        tracing::debug!("Loaded lexicon '{}' with {} entries", lexicon.name, lexicon.len());
        Ok(lexicon)
    }

    /// Entries in file order
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Labels in file order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Compiled patterns in file order
    pub fn patterns(&self) -> Vec<&Regex> {
        self.entries.iter().map(|e| &e.pattern).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A `NAME=PATH` pair naming one lexicon file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconSpec {
    /// Lexicon name
    pub name: String,
    /// Lexicon file
    pub path: PathBuf,
}

impl FromStr for LexiconSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => Ok(Self {
                name: name.trim().to_string(),
                path: PathBuf::from(shellexpand::tilde(path.trim()).to_string()),
            }),
            Some(_) => Err(Error::config(format!("invalid lexicon spec '{s}'"), "Use NAME=PATH")),
            None => {
                let path = PathBuf::from(shellexpand::tilde(s.trim()).to_string());
                let name = path
                    .file_stem()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
                    .ok_or_else(|| Error::config(format!("invalid lexicon spec '{s}'"), "Use NAME=PATH"))?;
                Ok(Self { name, path })
            }
        }
    }
}

/// The lexicons of one run, in column order.
#[derive(Debug, Clone, Default)]
pub struct LexiconSet {
    lexicons: Vec<Lexicon>,
}

impl LexiconSet {
    /// Build a set, rejecting duplicate names.
    pub fn new(lexicons: Vec<Lexicon>) -> Result<Self> {
        let mut seen = HashSet::new();
        for lexicon in &lexicons {
            if !seen.insert(lexicon.name.as_str()) {
                return Err(Error::config(
                    format!("lexicon name '{}' is used twice", lexicon.name),
                    "Give each lexicon a distinct name",
                ));
            }
        }
        Ok(Self { lexicons })
    }

    /// Load explicitly named lexicon files.
    pub fn load_specs(specs: &[LexiconSpec]) -> Result<Self> {
        let lexicons = specs
            .iter()
            .map(|spec| Lexicon::load(spec.name.clone(), &spec.path))
            .collect::<Result<Vec<_>>>()?;
        Self::new(lexicons)
    }

    /// Load every lexicon file of a directory, sorted by file name.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::config(
                format!("lexicon directory {} does not exist", dir.display()),
                "Set LEXICON_DIR or pass --lexicon-dir",
            ));
        }

        let mut paths: Vec<PathBuf> = fs_err::read_dir(dir)
            .map_err(|e| Error::io(e, dir.to_path_buf()))?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| FILE_EXTENSIONS.contains(&e))
            })
            .collect();
        paths.sort();

        let specs: Vec<LexiconSpec> = paths
            .into_iter()
            .filter_map(|path| {
                let name = path.file_stem()?.to_str()?.to_string();
                Some(LexiconSpec { name, path })
            })
            .collect();

        tracing::info!("Found {} lexicon files in {}", specs.len(), dir.display());
        Self::load_specs(&specs)
    }

    /// Lexicons in column order
    pub fn lexicons(&self) -> &[Lexicon] {
        &self.lexicons
    }

    /// Lexicon names in column order
    pub fn names(&self) -> Vec<String> {
        self.lexicons.iter().map(|l| l.name.clone()).collect()
    }

    /// Number of lexicons
    pub fn len(&self) -> usize {
        self.lexicons.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.lexicons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_label_and_regex_columns_by_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "i_words.txt", "\tLabel\tRegex\n0\tI\t\\bI\\b\n1\tMe\t\\bme\\b\n");
        let lexicon = Lexicon::load("I-words", &path).unwrap();
        assert_eq!(lexicon.labels().collect::<Vec<_>>(), vec!["I", "Me"]);
        assert!(lexicon.entries()[1].pattern.is_match("call ME"));
    }

    #[test]
    fn pattern_may_contain_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "q.txt", "Label\tRegex\nquote\t\"yeah\"\n");
        let lexicon = Lexicon::load("q", &path).unwrap();
        assert!(lexicon.entries()[0].pattern.is_match("he said \"YEAH\""));
    }

    #[test]
    fn duplicate_label_is_config_error() {
        let err = Lexicon::from_pairs("x", [("I", r"\bI\b"), ("I", r"\bme\b")]).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let err = Lexicon::from_pairs("x", [("broken", "(unclosed")]).unwrap_err();
        match err {
            Error::Config { message, .. } => assert!(message.contains("broken")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.txt", "Name\tPattern\nI\t\\bI\\b\n");
        assert!(matches!(Lexicon::load("bad", &path), Err(Error::Config { .. })));
    }

    #[test]
    fn load_dir_sorts_and_names_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b_great.txt", "Label\tRegex\ngreat\t\\bgreat\\b\n");
        write_file(dir.path(), "a_self.tsv", "Label\tRegex\nI\t\\bI\\b\n");
        write_file(dir.path(), "notes.md", "ignored");
        let set = LexiconSet::load_dir(dir.path()).unwrap();
        assert_eq!(set.names(), vec!["a_self", "b_great"]);
    }

    #[test]
    fn duplicate_lexicon_names_rejected() {
        let a = Lexicon::from_pairs("same", [("a", "a")]).unwrap();
        let b = Lexicon::from_pairs("same", [("b", "b")]).unwrap();
        assert!(LexiconSet::new(vec![a, b]).is_err());
    }

    #[test]
    fn parses_lexicon_specs() {
        let spec: LexiconSpec = "I-words=Lexicons/i_words.txt".parse().unwrap();
        assert_eq!(spec.name, "I-words");
        assert_eq!(spec.path, PathBuf::from("Lexicons/i_words.txt"));

        let bare: LexiconSpec = "Lexicons/greatness_words.txt".parse().unwrap();
        assert_eq!(bare.name, "greatness_words");

        assert!("=oops".parse::<LexiconSpec>().is_err());
    }
}
