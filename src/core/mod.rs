pub mod errors;
pub mod models;

pub use errors::DocFreqError;
pub use models::{
    Document,
    Page,
    SourceFile,
    SourceFileType,
};
