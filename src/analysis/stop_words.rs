use std::{
    collections::HashSet,
    fmt,
    fs,
    path::Path,
    str::FromStr,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::normalizer::normalize;
use crate::core::DocFreqError;

pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "and", "or", "in", "on", "at", "of", "to", "a", "an", "is", "are", "was", "were", "by",
    "for", "with", "as", "from", "that", "this", "it", "be", "but", "not", "have", "has", "had",
    "i", "you", "he", "she", "we", "they", "them", "his", "her", "its", "their", "which", "who",
    "whom", "what", "where", "when", "why", "how",
];

pub const RUSSIAN_STOP_WORDS: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она", "так",
    "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее", "мне", "было",
    "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда", "даже", "ну", "вдруг",
    "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до", "вас", "нибудь", "опять", "уж",
    "вам", "ведь", "там", "потом", "себя", "ничего", "ей", "может", "они", "тут", "где", "есть",
    "надо", "ней", "для", "мы", "тебя", "их", "чем", "была", "сам", "чтоб", "без", "будто", "чего",
    "раз", "тоже", "себе", "под", "будет", "ж", "тогда", "кто", "этот",
];

pub const GERMAN_STOP_WORDS: &[&str] = &[
    "der", "die", "das", "und", "in", "den", "von", "zu", "mit", "auf", "für", "ist", "im", "dem",
    "nicht", "ein", "eine", "als", "auch", "an", "es", "am", "aus", "er", "sie", "nach", "bei",
    "über", "wir", "was", "so", "des", "dass", "ich", "du", "haben", "hat", "sein", "noch", "wie",
    "man", "nur", "wenn", "kann", "doch", "schon", "ja", "oder", "aber", "mehr", "vor", "zur",
    "bis", "unter", "weil", "wird", "muss", "sind", "ihre", "einen", "einem", "einer", "dieser",
    "jenen", "diese", "dieses", "solche", "solcher", "solches", "solchen", "solcherweise", "dort",
    "hier", "wo", "wann", "warum", "wer", "welche", "welcher", "welches",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Russian,
    German,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Russian, Language::German];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::German => "de",
        }
    }

    pub fn stop_words(&self) -> &'static [&'static str] {
        match self {
            Language::English => ENGLISH_STOP_WORDS,
            Language::Russian => RUSSIAN_STOP_WORDS,
            Language::German => GERMAN_STOP_WORDS,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "English",
            Language::Russian => "Russian",
            Language::German => "German",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Language {
    type Err = DocFreqError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ru" | "russian" => Ok(Language::Russian),
            "de" | "german" => Ok(Language::German),
            other => Err(DocFreqError::Custom(format!("Unknown stop-word language '{}'", other))),
        }
    }
}

/// Case-insensitive set of words excluded from the stop-word view.
///
/// Built once, then only read. Words are stored in the same normalized form
/// as table keys, so `Don't` excludes `dont`.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// All built-in languages.
    pub fn multilingual() -> Self {
        Self::for_languages(&Language::ALL)
    }

    pub fn for_languages(languages: &[Language]) -> Self {
        Self::from_words(languages.iter().flat_map(|language| language.stop_words().iter().copied()))
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.extend(words);
        set
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            if let Some(word) = normalize(word.as_ref()) {
                self.words.insert(word);
            }
        }
    }

    /// Adds one word per non-empty line of `path`.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize, DocFreqError> {
        let terms = load_terms_from_file(path)?;
        let before = self.words.len();
        self.extend(terms);
        let added = self.words.len() - before;
        log::debug!("Loaded {} stop words from {}", added, path.display());
        Ok(added)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word) || normalize(word).is_some_and(|word| self.words.contains(&word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

pub fn load_terms_from_file(path: &Path) -> Result<Vec<String>, DocFreqError> {
    let content = fs::read_to_string(path).map_err(|e| {
        DocFreqError::Custom(format!("Failed to read stop-word file {}: {}", path.display(), e))
    })?;

    Ok(content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect())
}
