use std::{
    collections::HashSet,
    path::Path,
};

use super::{
    normalizer::normalize,
    stop_words::StopWordSet,
    table::{
        FrequencyTable,
        FrequencyTableBuilder,
    },
};
use crate::{
    core::{
        DocFreqError,
        Document,
    },
    parser::{
        self,
        TextExtractor,
    },
};

#[derive(Debug, Clone)]
pub struct FrequencyAnalysisResult {
    pub title: String,
    pub table: FrequencyTable,
    pub pages: usize,
    pub total_tokens: usize,     // Raw tokens handed over by the extractor
    pub discarded_tokens: usize, // Tokens that normalized to nothing
}

/// Which table a caller wants out of an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisView {
    All,
    Selected(Vec<String>),
    ExcludingStopWords,
}

impl AnalysisView {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisView::All => "Word frequency",
            AnalysisView::Selected(_) => "Selected words frequency",
            AnalysisView::ExcludingStopWords => "Word frequency (excluding stop words)",
        }
    }
}

/// Builds the primary table from raw tokens.
pub fn build_frequency_table<I, S>(tokens: I) -> FrequencyTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FrequencyTable::from_tokens(tokens)
}

pub fn analyze_document(document: &Document) -> FrequencyAnalysisResult {
    let mut builder = FrequencyTableBuilder::default();
    for token in document.tokens() {
        builder.push(token);
    }

    let total_tokens = builder.seen();
    let discarded_tokens = builder.discarded();
    let table = builder.finish();

    if table.is_empty() {
        log::info!("No words found in {}", document.title);
    } else {
        log::info!(
            "Counted {} unique words ({} occurrences) across {} pages of {}",
            table.len(),
            table.total_occurrences(),
            document.pages.len(),
            document.title
        );
    }

    FrequencyAnalysisResult {
        title: document.title.clone(),
        table,
        pages: document.pages.len(),
        total_tokens,
        discarded_tokens,
    }
}

/// Extracts `path` with the default extractor for its file type and counts it.
pub fn analyze_file(path: &Path) -> Result<FrequencyAnalysisResult, DocFreqError> {
    analyze_file_with(path, &parser::DefaultExtractor)
}

/// Extraction failures are returned as-is; no table exists in that case.
pub fn analyze_file_with(
    path: &Path,
    extractor: &dyn TextExtractor,
) -> Result<FrequencyAnalysisResult, DocFreqError> {
    log::info!("Processing file: {}", path.display());

    let document = extractor.extract(path).map_err(|e| {
        log::warn!("Processing failed for {}: {}", path.display(), e);
        e
    })?;

    Ok(analyze_document(&document))
}

/// Entries of `table` whose word matches one of `selection` after normalization.
/// Words that never occur are simply absent.
pub fn filter_by_selection<S: AsRef<str>>(
    table: &FrequencyTable,
    selection: &[S],
) -> FrequencyTable {
    let wanted: HashSet<String> =
        selection.iter().filter_map(|word| normalize(word.as_ref())).collect();

    if wanted.is_empty() {
        return FrequencyTable::new();
    }

    table.filtered(|entry| wanted.contains(&entry.word))
}

pub fn filter_excluding_stop_words(
    table: &FrequencyTable,
    stop_words: &StopWordSet,
) -> FrequencyTable {
    table.filtered(|entry| !stop_words.contains(&entry.word))
}

pub fn derive_view(
    table: &FrequencyTable,
    view: &AnalysisView,
    stop_words: &StopWordSet,
) -> FrequencyTable {
    match view {
        AnalysisView::All => table.clone(),
        AnalysisView::Selected(selection) => filter_by_selection(table, selection.as_slice()),
        AnalysisView::ExcludingStopWords => filter_excluding_stop_words(table, stop_words),
    }
}
