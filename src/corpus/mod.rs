pub mod jsonl;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::text::YEAR;
use crate::error::{Error, IntegrityWarning, Result};
use crate::model::{ErrorKind, ErrorRecord, MutatedArticle, Replacement};

pub use jsonl::write_corpus_jsonl;

fn default_error_type() -> String {
    ErrorKind::Lexical.as_str().to_string()
}

/// Current shape: any number of authored replacements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiEntry {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub replacements: Vec<Replacement>,
}

/// Older shape: exactly one replacement plus its error type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEntry {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub original_word: String,
    pub wrong_word: String,
    #[serde(default = "default_error_type")]
    pub error_type: String,
}

impl LegacyEntry {
    /// `sentence` predates the date/quantity split and is resolved from the
    /// shape of the original value.
    pub fn kind(&self) -> ErrorKind {
        if self.error_type.eq_ignore_ascii_case("sentence") {
            return if YEAR.is_match(self.original_word.trim())
                && self.original_word.trim().len() == 4
            {
                ErrorKind::Date
            } else {
                ErrorKind::Quantity
            };
        }
        ErrorKind::try_from(self.error_type.as_str()).unwrap_or_else(|e| {
            tracing::warn!(article = self.title.as_str(), "{e}; treating as word error");
            ErrorKind::Lexical
        })
    }
}

/// One stored article in either shape, told apart by the presence of
/// `replacements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleEntry {
    Multi(MultiEntry),
    Legacy(LegacyEntry),
}

impl ArticleEntry {
    pub fn title(&self) -> &str {
        match self {
            ArticleEntry::Multi(e) => &e.title,
            ArticleEntry::Legacy(e) => &e.title,
        }
    }

    /// Normalize to the canonical model, checking integrity.
    pub fn into_article(self) -> (MutatedArticle, Vec<IntegrityWarning>) {
        match self {
            ArticleEntry::Multi(e) => {
                let errors = e
                    .replacements
                    .iter()
                    .map(|r| {
                        ErrorRecord::locate(
                            ErrorKind::Lexical,
                            &r.original,
                            &r.replacement,
                            &e.text,
                        )
                    })
                    .collect();
                let article = MutatedArticle {
                    title: e.title,
                    text: e.text,
                    category: e.category,
                    thumbnail: e.thumbnail,
                    errors,
                };
                let warnings = article.check_integrity_strict();
                (article, warnings)
            }
            ArticleEntry::Legacy(e) => {
                let record =
                    ErrorRecord::locate(e.kind(), &e.original_word, &e.wrong_word, &e.text);
                let article = MutatedArticle {
                    title: e.title,
                    text: e.text,
                    category: e.category,
                    thumbnail: e.thumbnail,
                    errors: vec![record],
                };
                let warnings = article.check_integrity();
                (article, warnings)
            }
        }
    }
}

impl From<&MutatedArticle> for ArticleEntry {
    /// A single error keeps the legacy shape: its kind survives, and it
    /// reloads under the first-occurrence integrity check that automatic
    /// injection satisfies. Several errors are stored as replacements.
    fn from(article: &MutatedArticle) -> Self {
        match article.errors.as_slice() {
            [only] => ArticleEntry::Legacy(LegacyEntry {
                title: article.title.clone(),
                text: article.text.clone(),
                category: article.category.clone(),
                thumbnail: article.thumbnail.clone(),
                original_word: only.original_value.clone(),
                wrong_word: only.planted_value.clone(),
                error_type: only.kind.as_str().to_string(),
            }),
            _ => ArticleEntry::Multi(MultiEntry {
                title: article.title.clone(),
                text: article.text.clone(),
                category: article.category.clone(),
                thumbnail: article.thumbnail.clone(),
                replacements: article.replacements(),
            }),
        }
    }
}

/// Ordered list of playable articles, normalized once at load.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub articles: Vec<MutatedArticle>,
    /// `(article title, warning)` for every integrity problem found on load.
    pub warnings: Vec<(String, IntegrityWarning)>,
}

impl Corpus {
    pub fn from_entries(entries: Vec<ArticleEntry>) -> Self {
        let mut corpus = Corpus::default();
        for entry in entries {
            let (article, warnings) = entry.into_article();
            for w in warnings {
                w.log(&article.title);
                corpus.warnings.push((article.title.clone(), w));
            }
            corpus.articles.push(article);
        }
        corpus
    }

    /// Accepts a JSON array of entries or JSONL (one entry per line).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let trimmed = json.trim_start();
        let entries: Vec<ArticleEntry> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)?
        } else {
            trimmed
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(serde_json::from_str)
                .collect::<std::result::Result<_, _>>()?
        };
        if entries.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        Ok(Self::from_entries(entries))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from `path`, falling back to an empty corpus on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(corpus) => {
                tracing::info!(path = %path.display(), articles = corpus.len(), "loaded corpus");
                corpus
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "using empty corpus: {e}");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MutatedArticle> {
        self.articles.get(index)
    }

    pub fn find(&self, title: &str) -> Option<&MutatedArticle> {
        self.articles.iter().find(|a| a.title.eq_ignore_ascii_case(title))
    }

    pub fn entries(&self) -> impl Iterator<Item = ArticleEntry> + '_ {
        self.articles.iter().map(ArticleEntry::from)
    }
}
