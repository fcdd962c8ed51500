use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    analysis::{
        ExportFormat,
        ExportOptions,
        Language,
        StopWordSet,
    },
    core::DocFreqError,
    persistence,
};

pub const SETTINGS_FILE: &str = "settings.json";

/// User configuration, stored as JSON in the application data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Built-in stop-word lists to enable. Empty means all of them.
    pub languages: Vec<Language>,
    /// Extra stop-word files, one word per line.
    pub stop_word_files: Vec<PathBuf>,
    pub extra_stop_words: Vec<String>,
    pub pretty_json: bool,
    pub default_format: ExportFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            stop_word_files: Vec::new(),
            extra_stop_words: Vec::new(),
            pretty_json: true,
            default_format: ExportFormat::Json,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        persistence::load_json_or_default(SETTINGS_FILE)
    }

    pub fn load_from(path: &Path) -> Result<Self, DocFreqError> {
        persistence::load_json_from(path).map_err(|e| {
            DocFreqError::Settings(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    pub fn save(&self) -> Result<PathBuf, DocFreqError> {
        persistence::save_json(self, SETTINGS_FILE)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), DocFreqError> {
        persistence::save_json_to(self, path)
    }

    pub fn enabled_languages(&self) -> Vec<Language> {
        if self.languages.is_empty() {
            Language::ALL.to_vec()
        } else {
            self.languages.clone()
        }
    }

    /// Built-in lists for the enabled languages plus every configured extra.
    /// An unreadable stop-word file is an error rather than a silently smaller set.
    pub fn stop_words(&self) -> Result<StopWordSet, DocFreqError> {
        let mut stop_words = StopWordSet::for_languages(&self.enabled_languages());
        stop_words.extend(&self.extra_stop_words);

        for file in &self.stop_word_files {
            stop_words.extend_from_file(file)?;
        }

        log::debug!("Stop-word set ready with {} words", stop_words.len());
        Ok(stop_words)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions { format: self.default_format, pretty_json: self.pretty_json }
    }
}
