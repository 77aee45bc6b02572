use std::collections::HashSet;

use super::inject::Injection;
use super::text::{contains_word, replace_all_words, replace_first_word};
use crate::corpus::{ArticleEntry, MultiEntry};
use crate::dictionary::defaults::is_stopword;
use crate::error::IntegrityWarning;
use crate::model::{ErrorKind, ErrorRecord, MutatedArticle, Replacement, SourceText};

/// Single-error manual variant: a human picked `original` and typed
/// `replacement`. Only the first occurrence is replaced.
pub fn plant_manual(source: &SourceText, original: &str, replacement: &str) -> Injection {
    let mut text = source.text.clone();
    let Some((found, written)) = replace_first_word(&mut text, original.trim(), replacement.trim())
    else {
        IntegrityWarning::OriginalNotFound { original: original.to_string() }.log(&source.title);
        return Injection::NothingPlanted(MutatedArticle::unmodified(source));
    };
    let record = ErrorRecord::locate(ErrorKind::Lexical, found, written, &text);
    Injection::planted(source, text, record)
}

/// Restore pre-replacement text by applying `replacement → original` for each
/// pair, last pair first.
///
/// Lossy when one surface string was produced by two different replacements;
/// such collisions are reported rather than hidden.
pub fn reverse_replacements(
    text: &str,
    replacements: &[Replacement],
) -> (String, Vec<IntegrityWarning>) {
    let mut seen = HashSet::new();
    let mut warnings: Vec<IntegrityWarning> = Vec::new();
    for r in replacements {
        let surface = r.replacement.to_lowercase();
        if !seen.insert(surface.clone())
            && !warnings.iter().any(|w| {
                matches!(w, IntegrityWarning::ReplacementCollision { surface: s } if *s == surface)
            })
        {
            warnings.push(IntegrityWarning::ReplacementCollision { surface });
        }
    }

    let mut restored = text.to_string();
    for r in replacements.iter().rev() {
        replace_all_words(&mut restored, &r.replacement, &r.original);
    }
    (restored, warnings)
}

/// A working copy being edited by a human author.
///
/// Every applied replacement hits all occurrences of its original, so the
/// article stays consistently wrong.
#[derive(Debug, Clone)]
pub struct AuthoringSession {
    title: String,
    category: String,
    thumbnail: Option<String>,
    source: String,
    working: String,
    replacements: Vec<Replacement>,
}

impl AuthoringSession {
    pub fn new(source: &SourceText) -> Self {
        Self {
            title: source.title.clone(),
            category: source.category.clone(),
            thumbnail: source.thumbnail.clone(),
            source: source.text.clone(),
            working: source.text.clone(),
            replacements: Vec::new(),
        }
    }

    /// Reopen a saved article, reconstructing its pre-replacement text.
    pub fn from_saved(article: &MutatedArticle) -> (Self, Vec<IntegrityWarning>) {
        let replacements = article.replacements();
        let (source, warnings) = reverse_replacements(&article.text, &replacements);
        for w in &warnings {
            w.log(&article.title);
        }
        let session = Self {
            title: article.title.clone(),
            category: article.category.clone(),
            thumbnail: article.thumbnail.clone(),
            source,
            working: article.text.clone(),
            replacements,
        };
        (session, warnings)
    }

    /// Replace every occurrence of `original` with `replacement`.
    ///
    /// The pair is recorded only if something was replaced. Returned warnings
    /// have already been logged.
    pub fn apply(&mut self, original: &str, replacement: &str) -> Vec<IntegrityWarning> {
        let (original, replacement) = (original.trim(), replacement.trim());
        let count = if original.is_empty() || replacement.is_empty() {
            0
        } else {
            replace_all_words(&mut self.working, original, replacement)
        };

        let mut warnings = Vec::new();
        if count == 0 {
            warnings.push(IntegrityWarning::OriginalNotFound { original: original.to_string() });
        } else {
            tracing::debug!(
                article = self.title.as_str(),
                original,
                replacement,
                count,
                "applied replacement"
            );
            self.replacements.push(Replacement::new(original, replacement));
            if !contains_word(&self.working, replacement) {
                warnings.push(IntegrityWarning::PlantedValueMissing {
                    planted: replacement.to_string(),
                });
            }
            if !is_stopword(original) && contains_word(&self.working, original) {
                warnings.push(IntegrityWarning::OriginalStillPresent {
                    original: original.to_string(),
                });
            }
        }
        for w in &warnings {
            w.log(&self.title);
        }
        warnings
    }

    /// Drop the most recent replacement, rebuilding the working copy from the
    /// source with the remaining pairs.
    pub fn undo_last(&mut self) -> Option<Replacement> {
        let undone = self.replacements.pop()?;
        let mut working = self.source.clone();
        for r in &self.replacements {
            replace_all_words(&mut working, &r.original, &r.replacement);
        }
        self.working = working;
        Some(undone)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn working_text(&self) -> &str {
        &self.working
    }

    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    pub fn to_article(&self) -> MutatedArticle {
        let errors = self
            .replacements
            .iter()
            .map(|r| {
                ErrorRecord::locate(ErrorKind::Lexical, &r.original, &r.replacement, &self.working)
            })
            .collect();
        MutatedArticle {
            title: self.title.clone(),
            text: self.working.clone(),
            category: self.category.clone(),
            thumbnail: self.thumbnail.clone(),
            errors,
        }
    }

    /// Current multi-replacement corpus entry.
    pub fn finish(self) -> ArticleEntry {
        ArticleEntry::Multi(MultiEntry {
            title: self.title,
            text: self.working,
            category: self.category,
            thumbnail: self.thumbnail,
            replacements: self.replacements,
        })
    }
}
