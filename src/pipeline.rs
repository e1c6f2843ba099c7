//! End-to-end analysis run: load, extract, aggregate, export.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;

use crate::aggregate::{correlation_matrix, smooth, smoothed_correlation_matrix, YearAggregator, YearRange};
use crate::config::Config;
use crate::constants::output;
use crate::corpus::{self, CleaningReport, CleaningRules, CorpusIndex};
use crate::error::{Error, Result};
use crate::export::{Exporter, Summary};
use crate::features::FeatureExtractor;
use crate::lexicon::LexiconSet;
use crate::text::clean::TitleFilter;
use crate::text::StopWords;
use crate::types::{CorrelationMatrix, Document, FeatureTable, SmoothedTable, YearTable};

/// Documents of a run and where they came from.
#[derive(Debug, Clone)]
pub struct LoadedCorpus {
    /// Documents in input order
    pub documents: Vec<Document>,
    /// Index of the corpus directory, when the documents came from one
    pub index: Option<CorpusIndex>,
    /// Cleaning counts, when the documents came from a scraped table
    pub cleaning: Option<CleaningReport>,
}

/// Every table computed by [`analyze`].
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Per-document features
    pub features: FeatureTable,
    /// Per-year aggregates
    pub years: YearTable,
    /// Trailing moving average of `years`
    pub smoothed: SmoothedTable,
    /// Correlations between the year columns
    pub correlations: CorrelationMatrix,
    /// Correlations between the smoothed columns
    pub smoothed_correlations: CorrelationMatrix,
    /// Most frequent content words across the corpus
    pub top_terms: Vec<(String, u64)>,
}

/// Outcome of [`run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Tables computed during the run
    pub analysis: Analysis,
    /// Documents analyzed
    pub document_count: usize,
    /// Files written
    pub outputs: Vec<PathBuf>,
}

/// Load the documents named by the configuration.
///
/// A scraped table takes precedence over the corpus directory.
pub fn load_corpus(config: &Config) -> Result<LoadedCorpus> {
    if let Some(table) = &config.lyrics_table {
        let rows = corpus::load_table(table)?;
        let rules = CleaningRules {
            title_filter: TitleFilter::new(config.excluded_titles.as_slice())?,
            min_text_len: config.min_text_len,
        };
        let (documents, report) = corpus::into_documents(rows, &rules);
        return Ok(LoadedCorpus { documents, index: None, cleaning: Some(report) });
    }

    let index = CorpusIndex::build(&config.lyrics_dir)?;
    let documents = index.load_documents();
    Ok(LoadedCorpus { documents, index: Some(index), cleaning: None })
}

/// Load explicit lexicons, or every lexicon in the lexicon directory.
pub fn load_lexicons(config: &Config) -> Result<LexiconSet> {
    let set = if config.lexicons.is_empty() {
        LexiconSet::load_dir(&config.lexicon_dir)?
    } else {
        LexiconSet::load_specs(&config.lexicons)?
    };
    if set.is_empty() {
        tracing::warn!("No lexicons loaded; only lexical measures will be computed");
    }
    Ok(set)
}

/// Load the configured stopword list, or the built-in English list.
pub fn load_stopwords(config: &Config) -> Result<StopWords> {
    config
        .stopwords_path
        .as_deref()
        .map_or_else(|| Ok(StopWords::english()), StopWords::load)
}

/// Compute every table for a set of documents.
pub fn analyze(
    documents: &[Document],
    lexicons: &LexiconSet,
    stopwords: &StopWords,
    config: &Config,
) -> Result<Analysis> {
    if documents.is_empty() {
        return Err(Error::EmptyInput("no documents to analyze".into()));
    }

    let extractor = FeatureExtractor::new(lexicons, stopwords, config.stem);
    let features = extractor.extract_all(documents);

    let range = YearRange::resolve(config.min_year, config.max_year, &features)?;
    let years = YearAggregator::new(stopwords)
        .edge_fill(config.edge_fill)
        .aggregate(&features, documents, range)?;

    let smoothed = smooth(&years, config.smoothing_window);
    let correlations = correlation_matrix(&years);
    let smoothed_correlations = smoothed_correlation_matrix(&smoothed);
    let top_terms = extractor.top_terms(documents, output::TOP_TERMS_LIMIT);

    for name in &years.lexicon_names {
        match correlations.get(name, "Number of songs") {
            Some(r) => tracing::info!("Correlation of {name} with song count: {r:.3}"),
            None => tracing::info!("Correlation of {name} with song count: undefined"),
        }
    }

    Ok(Analysis { features, years, smoothed, correlations, smoothed_correlations, top_terms })
}

/// Index the corpus directory and write `corpus_index.csv`.
pub fn index(config: &Config) -> Result<PathBuf> {
    let index = CorpusIndex::build(&config.lyrics_dir)?;
    Exporter::new(&config.output_dir)?.corpus_index(&index.entries)
}

/// Run the whole pipeline and write every output file.
pub fn run(config: &Config) -> Result<RunReport> {
    config.validate()?;
    let start = Instant::now();

    let lexicons = load_lexicons(config)?;
    let stopwords = load_stopwords(config)?;
    let loaded = load_corpus(config)?;
    tracing::info!(
        "Loaded {} documents and {} lexicons from {}",
        loaded.documents.len(),
        lexicons.len(),
        config.source_label()
    );

    let analysis = analyze(&loaded.documents, &lexicons, &stopwords, config)?;

    let exporter = Exporter::new(&config.output_dir)?;
    let mut outputs = Vec::new();
    if let Some(index) = &loaded.index {
        outputs.push(exporter.corpus_index(&index.entries)?);
    }
    outputs.push(exporter.document_features(&analysis.features)?);
    outputs.push(exporter.year_table(&analysis.years)?);
    outputs.push(exporter.smoothed(&analysis.smoothed)?);
    outputs.push(exporter.correlations(output::CORRELATIONS, &analysis.correlations)?);
    outputs.push(exporter.correlations(output::CORRELATIONS_SMOOTHED, &analysis.smoothed_correlations)?);
    outputs.push(exporter.top_terms(&analysis.top_terms)?);
    outputs.push(exporter.summary(&Summary {
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now(),
        source: config.source_label(),
        document_count: loaded.documents.len(),
        lexicons: &analysis.years.lexicon_names,
        stemmed: config.stem,
        smoothing_window: analysis.smoothed.window,
        edge_fill: config.edge_fill.to_string(),
        years: &analysis.years,
    })?);

    let elapsed = start.elapsed();
    tracing::info!(
        "Analysis complete: {} documents, {} years, {} files in {elapsed:?}",
        loaded.documents.len(),
        analysis.years.rows.len(),
        outputs.len()
    );

    Ok(RunReport { analysis, document_count: loaded.documents.len(), outputs })
}
