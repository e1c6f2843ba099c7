//! `lyricscope` - lexicon and stylistic trend analysis for lyric corpora.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use lyricscope::aggregate::EdgeFill;
use lyricscope::config::Config;
use lyricscope::lexicon::LexiconSpec;
use lyricscope::pipeline;

/// Lexicon and stylistic trend analysis for per-year lyric corpora
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Index the corpus directory and write corpus_index.csv
    Index {
        /// Root directory holding one folder per year
        #[arg(long)]
        lyrics_dir: Option<PathBuf>,
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Run the full analysis and write every table
    Analyze(AnalyzeArgs),
    /// Load every lexicon and report its entries
    CheckLexicons {
        /// Directory of lexicon files
        #[arg(long)]
        lexicon_dir: Option<PathBuf>,
        /// Explicit lexicon file, as NAME=PATH (repeatable)
        #[arg(long = "lexicon", value_name = "NAME=PATH")]
        lexicons: Vec<LexiconSpec>,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Root directory holding one folder per year
    #[arg(long, conflicts_with = "table")]
    lyrics_dir: Option<PathBuf>,
    /// Scraped lyrics table (.json or .csv)
    #[arg(long)]
    table: Option<PathBuf>,
    /// Explicit lexicon file, as NAME=PATH (repeatable)
    #[arg(long = "lexicon", value_name = "NAME=PATH")]
    lexicons: Vec<LexiconSpec>,
    /// Directory of lexicon files, used when no --lexicon is given
    #[arg(long)]
    lexicon_dir: Option<PathBuf>,
    /// Stopword list, one word per line
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// First year of the aggregation range
    #[arg(long)]
    min_year: Option<i32>,
    /// Last year of the aggregation range
    #[arg(long)]
    max_year: Option<i32>,
    /// Stem tokens before counting words
    #[arg(long, overrides_with = "no_stem")]
    stem: bool,
    /// Count unstemmed tokens, overriding STEM_TOKENS
    #[arg(long, overrides_with = "stem")]
    no_stem: bool,
    /// Moving-average window in years
    #[arg(long)]
    window: Option<usize>,
    /// Leading and trailing gap policy: hold or missing
    #[arg(long)]
    edge_fill: Option<EdgeFill>,
    /// Title fragment (regex) dropped from a scraped table (repeatable; replaces the defaults)
    #[arg(long = "exclude-title", value_name = "REGEX")]
    excluded_titles: Vec<String>,
    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Worker threads
    #[arg(long)]
    threads: Option<usize>,
}

impl AnalyzeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(dir) = self.lyrics_dir {
            config.lyrics_dir = dir;
            config.lyrics_table = None;
        }
        if self.table.is_some() {
            config.lyrics_table = self.table;
        }
        if !self.lexicons.is_empty() {
            config.lexicons = self.lexicons;
        }
        if let Some(dir) = self.lexicon_dir {
            config.lexicon_dir = dir;
        }
        if self.stopwords.is_some() {
            config.stopwords_path = self.stopwords;
        }
        config.min_year = self.min_year.or(config.min_year);
        config.max_year = self.max_year.or(config.max_year);
        if self.stem {
            config.stem = true;
        } else if self.no_stem {
            config.stem = false;
        }
        if let Some(window) = self.window {
            config.smoothing_window = window;
        }
        if let Some(edge) = self.edge_fill {
            config.edge_fill = edge;
        }
        if !self.excluded_titles.is_empty() {
            config.excluded_titles = self.excluded_titles;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        config.threads = self.threads.or(config.threads);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_line_number(true)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load().context("loading configuration")?;

    match cli.command {
        Command::Index { lyrics_dir, output_dir } => {
            if let Some(dir) = lyrics_dir {
                config.lyrics_dir = dir;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            let path = pipeline::index(&config).context("indexing corpus")?;
            info!("Corpus index written to {}", path.display());
        }
        Command::Analyze(args) => {
            args.apply(&mut config);
            config.validate()?;
            if let Some(threads) = config.threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .context("configuring worker threads")?;
            }
            let report = pipeline::run(&config).context("analysis failed")?;
            info!(
                "Analyzed {} documents; wrote {} files to {}",
                report.document_count,
                report.outputs.len(),
                config.output_dir.display()
            );
        }
        Command::CheckLexicons { lexicon_dir, lexicons } => {
            if let Some(dir) = lexicon_dir {
                config.lexicon_dir = dir;
            }
            if !lexicons.is_empty() {
                config.lexicons = lexicons;
            }
            let set = pipeline::load_lexicons(&config).context("loading lexicons")?;
            for lexicon in set.lexicons() {
                println!("{:<24} {:>5} entries", lexicon.name, lexicon.len());
            }
            info!("{} lexicons valid", set.len());
        }
    }

    Ok(())
}
