//! Word frequency analysis for documents.
//!
//! A document is extracted into raw tokens ([`parser`]), counted into a
//! [`FrequencyTable`] ordered by count with first-seen tie-breaks, optionally
//! narrowed to a selection or stripped of stop words, and exported as JSON or CSV.
//! Every step returns its table; nothing is cached between calls.

pub mod analysis;
pub mod core;
pub mod logging;
pub mod parser;
pub mod persistence;
pub mod settings;

pub use analysis::{
    analyze_file,
    build_frequency_table,
    export_json,
    export_table,
    filter_by_selection,
    filter_excluding_stop_words,
    normalize,
    AnalysisView,
    ExportFormat,
    ExportOptions,
    ExportOutcome,
    FrequencyAnalysisResult,
    FrequencyTable,
    Language,
    StopWordSet,
    WordCount,
};
pub use crate::core::DocFreqError;
pub use settings::Settings;
