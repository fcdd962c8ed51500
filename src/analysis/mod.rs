pub mod analyzer;
pub mod export;
pub mod normalizer;
pub mod stop_words;
pub mod table;

pub use analyzer::{
    analyze_document,
    analyze_file,
    analyze_file_with,
    build_frequency_table,
    derive_view,
    filter_by_selection,
    filter_excluding_stop_words,
    AnalysisView,
    FrequencyAnalysisResult,
};
pub use export::{
    export_json,
    export_table,
    load_json,
    ExportFormat,
    ExportOptions,
    ExportOutcome,
};
pub use normalizer::{
    normalize,
    parse_selection,
};
pub use stop_words::{
    Language,
    StopWordSet,
};
pub use table::{
    FrequencyTable,
    FrequencyTableBuilder,
    WordCount,
};
