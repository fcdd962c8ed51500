use std::path::{
    Path,
    PathBuf,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFileType {
    Text,
    Srt,
    Docx,
    Pdf,
    Other(String),
}

impl SourceFileType {
    pub fn from_extension(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" | "md" => SourceFileType::Text,
            "srt" => SourceFileType::Srt,
            "docx" => SourceFileType::Docx,
            "pdf" => SourceFileType::Pdf,
            _ => SourceFileType::Other(extension),
        }
    }

    pub fn supported_extensions() -> &'static [&'static str] {
        &["txt", "md", "srt", "docx", "pdf"]
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, SourceFileType::Other(_))
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub title: String,          // File name, for display
    pub file_type: SourceFileType,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path_str = path.to_string_lossy().to_string();
        let title =
            path.file_name().and_then(|n| n.to_str()).unwrap_or("Unknown File").to_string();

        SourceFile { file_type: SourceFileType::from_extension(&path_str), title, path }
    }
}

/// One logical page of extracted text, tokens kept exactly as the extractor produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Document {
    /// Raw tokens across all pages, in page order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|page| page.tokens.iter().map(String::as_str))
    }

    pub fn token_count(&self) -> usize {
        self.pages.iter().map(|page| page.tokens.len()).sum()
    }
}
