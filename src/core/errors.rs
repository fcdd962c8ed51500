use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocFreqError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(Box<zip::result::ZipError>),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to extract text from {path}: {reason}")]
    Extraction { path: String, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("DocFreqError: {0}")]
    Custom(String),
}

impl DocFreqError {
    pub fn extraction(path: impl Into<String>, reason: impl Into<String>) -> Self {
        DocFreqError::Extraction { path: path.into(), reason: reason.into() }
    }

    /// True for failures raised while reading a document, as opposed to writing results.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            DocFreqError::FileNotFound(_)
                | DocFreqError::UnsupportedFileType(_)
                | DocFreqError::Extraction { .. }
                | DocFreqError::Zip(_)
        )
    }
}

impl From<std::io::Error> for DocFreqError {
    fn from(error: std::io::Error) -> Self {
        DocFreqError::Io(Box::new(error))
    }
}

impl From<zip::result::ZipError> for DocFreqError {
    fn from(error: zip::result::ZipError) -> Self {
        DocFreqError::Zip(Box::new(error))
    }
}
