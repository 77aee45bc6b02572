use serde::{Deserialize, Serialize};

use crate::dictionary::defaults::is_stopword;
use crate::engine::text::{contains_word, sentence_containing};
use crate::error::IntegrityWarning;

/// What kind of fact was falsified.
///
/// Dates and quantities are sentence-level errors; lexical swaps are
/// word-level. The distinction picks the verification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ErrorKind {
    Date,
    Quantity,
    Lexical,
}

string_enum!(ErrorKind {
    Date => "date" | "year",
    Quantity => "quantity" | "number",
    Lexical => "word" | "lexical",
});

impl ErrorKind {
    pub fn is_sentence_level(self) -> bool {
        !matches!(self, ErrorKind::Lexical)
    }
}

/// Untouched article prose, paragraphs joined by blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub title: String,
    pub category: String,
    pub thumbnail: Option<String>,
    pub text: String,
}

impl SourceText {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            thumbnail: None,
            text: text.into(),
        }
    }

    pub fn from_paragraphs<S: AsRef<str>>(
        title: impl Into<String>,
        category: impl Into<String>,
        paragraphs: &[S],
    ) -> Self {
        let text = paragraphs
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        Self::new(title, category, text)
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.split("\n\n").filter(|p| !p.trim().is_empty())
    }
}

/// One planted error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    /// The correct value that was replaced.
    pub original_value: String,
    /// The incorrect value now in the text.
    pub planted_value: String,
    /// First sentence of the mutated text containing the planted value.
    pub sentence: String,
}

impl ErrorRecord {
    /// Build a record, locating its sentence in the mutated text.
    pub fn locate(
        kind: ErrorKind,
        original_value: impl Into<String>,
        planted_value: impl Into<String>,
        mutated_text: &str,
    ) -> Self {
        let planted_value = planted_value.into();
        let sentence = sentence_containing(mutated_text, &planted_value);
        Self {
            kind,
            original_value: original_value.into(),
            planted_value,
            sentence,
        }
    }

    /// `planted → original`, as shown to the player after a correct guess.
    pub fn explanation(&self) -> String {
        format!("{} → {}", self.planted_value, self.original_value)
    }
}

/// An authored `{original, replacement}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub original: String,
    pub replacement: String,
}

impl Replacement {
    pub fn new(original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            replacement: replacement.into(),
        }
    }
}

/// An article with zero or more planted errors, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutatedArticle {
    pub title: String,
    pub text: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub errors: Vec<ErrorRecord>,
}

impl MutatedArticle {
    /// An article with nothing planted (text copied verbatim).
    pub fn unmodified(source: &SourceText) -> Self {
        Self {
            title: source.title.clone(),
            text: source.text.clone(),
            category: source.category.clone(),
            thumbnail: source.thumbnail.clone(),
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Every planted value must still be present in the text.
    ///
    /// Originals are not checked here: single-error injection replaces only
    /// the first occurrence, so the original may legitimately remain.
    pub fn check_integrity(&self) -> Vec<IntegrityWarning> {
        self.errors
            .iter()
            .filter(|e| !contains_word(&self.text, &e.planted_value))
            .map(|e| IntegrityWarning::PlantedValueMissing {
                planted: e.planted_value.clone(),
            })
            .collect()
    }

    /// Like [`check_integrity`](Self::check_integrity), plus a check that no
    /// original remains, for articles whose replacements were applied to
    /// every occurrence. Common words are exempt.
    pub fn check_integrity_strict(&self) -> Vec<IntegrityWarning> {
        let mut warnings = self.check_integrity();
        warnings.extend(
            self.errors
                .iter()
                .filter(|e| !is_stopword(&e.original_value))
                .filter(|e| contains_word(&self.text, &e.original_value))
                .map(|e| IntegrityWarning::OriginalStillPresent {
                    original: e.original_value.clone(),
                }),
        );
        warnings
    }

    /// All `planted → original` pairs, comma separated.
    pub fn explanation(&self) -> String {
        self.errors
            .iter()
            .map(ErrorRecord::explanation)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn replacements(&self) -> Vec<Replacement> {
        self.errors
            .iter()
            .map(|e| Replacement::new(&e.original_value, &e.planted_value))
            .collect()
    }
}
