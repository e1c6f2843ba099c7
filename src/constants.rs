//! Pipeline constants.
//!
//! Centralizes file names, column names and tuning defaults.

/// Corpus loading constants.
pub mod corpus {
    /// Default root directory holding one subdirectory per year.
    pub const DEFAULT_LYRICS_DIR: &str = "Lyrics";

    /// Extension stripped from file names to get the song name.
    pub const TEXT_EXTENSION: &str = ".txt";

    /// File names skipped while indexing.
    pub const IGNORED_FILES: &[&str] = &["desktop.ini", "Thumbs.db"];

    /// Minimum normalized lyric length kept from a scraped table.
    pub const DEFAULT_MIN_TEXT_LEN: usize = 10;

    /// Placeholder phrases marking unreleased or leaked lyrics.
    pub const PLACEHOLDER_MARKERS: &[&str] = &["Lyrics for this", "Lyrics from"];

    /// Title fragments (regex) that mark a scraped row as something other than a song.
    ///
    /// Any title containing `]` is dropped. Overridden by `EXCLUDED_TITLES`.
    pub const NON_SONG_TITLE_PATTERNS: &[&str] = &[
        "Freestyle", "Speech", "Reference", "Version", "Alternate", "Jools",
        "Sunday Service", "Demo", "Mix", "Sessions", "Mos Def", "Paparazzi",
        "monologue", "Taylor Swift", "Single Art", "^On ", "Lecture", r"\]",
        "Notepad", "Making of", "Still Standing", "OG", "Solo", "SNL", "2 Ryde",
    ];
}

/// Lexicon file constants.
pub mod lexicon {
    /// Default directory scanned for lexicon files.
    pub const DEFAULT_LEXICON_DIR: &str = "Lexicons";

    /// Header of the column holding output labels.
    pub const LABEL_COLUMN: &str = "Label";

    /// Header of the column holding regex patterns.
    pub const REGEX_COLUMN: &str = "Regex";

    /// Extensions recognized as lexicon files when scanning a directory.
    pub const FILE_EXTENSIONS: &[&str] = &["txt", "tsv"];
}

/// Year aggregation constants.
pub mod aggregate {
    /// Default trailing moving-average window, in years.
    pub const DEFAULT_SMOOTHING_WINDOW: usize = 3;
}

/// Output file names.
pub mod output {
    /// Default output directory.
    pub const DEFAULT_OUTPUT_DIR: &str = "Outputs";

    /// Corpus index table.
    pub const CORPUS_INDEX: &str = "corpus_index.csv";

    /// Per-document feature table.
    pub const DOCUMENT_FEATURES: &str = "document_features.csv";

    /// Per-year aggregate table.
    pub const YEAR_AGGREGATES: &str = "year_aggregates.csv";

    /// Smoothed per-year table.
    pub const YEAR_AGGREGATES_SMOOTHED: &str = "year_aggregates_smoothed.csv";

    /// Correlation matrix of the year table.
    pub const CORRELATIONS: &str = "correlations.csv";

    /// Correlation matrix of the smoothed year table.
    pub const CORRELATIONS_SMOOTHED: &str = "correlations_smoothed.csv";

    /// Most frequent content words.
    pub const TOP_TERMS: &str = "top_terms.csv";

    /// JSON summary of the run.
    pub const SUMMARY: &str = "summary.json";

    /// How many terms go into the top-terms table.
    pub const TOP_TERMS_LIMIT: usize = 100;
}
