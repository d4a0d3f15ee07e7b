//! Dominant-language detection for picking summary instructions.
//!
//! Only the two languages with instruction templates are recognised; the
//! detector answers `None` for anything it cannot tell apart.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Italian,
}

impl Language {
    /// ISO 639-1 tag.
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Italian => "it",
        }
    }
}

pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Option<Language>;
}

const ENGLISH_MARKERS: &[&str] = &[
    "the", "and", "is", "was", "were", "i", "my", "me", "to", "of", "it", "that", "with", "for",
    "but", "today", "have", "had", "this", "not", "felt", "feel", "at", "we", "you", "what",
];

const ITALIAN_MARKERS: &[&str] = &[
    "il", "lo", "la", "gli", "le", "e", "è", "di", "che", "non", "un", "una", "sono", "ho", "per",
    "mi", "con", "ma", "oggi", "mio", "mia", "del", "della", "molto", "stato", "stata", "questo",
    "anche", "ieri", "sento",
];

/// Counts function words of each language; the larger count wins.
#[derive(Debug, Clone, Default)]
pub struct StopwordDetector;

impl LanguageDetector for StopwordDetector {
    fn detect(&self, text: &str) -> Option<Language> {
        let mut en = 0usize;
        let mut it = 0usize;
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            if ENGLISH_MARKERS.contains(&token.as_str()) {
                en += 1;
            }
            if ITALIAN_MARKERS.contains(&token.as_str()) {
                it += 1;
            }
        }
        match en.cmp(&it) {
            std::cmp::Ordering::Greater => Some(Language::English),
            std::cmp::Ordering::Less => Some(Language::Italian),
            std::cmp::Ordering::Equal => None,
        }
    }
}
