use thiserror::Error;

/// Failures from loading dictionaries and corpora.
///
/// Nothing in the engine itself returns these: injection and verification
/// degrade to "nothing planted" / "no match" instead. Callers that want the
/// fallback behavior use the `*_or_default` loaders.
#[derive(Error, Debug)]
pub enum Error {
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("invalid range for {name}: [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f64, max: f64 },

    #[error("corpus contains no articles")]
    EmptyCorpus,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable data-integrity diagnostic.
///
/// Returned to the caller and logged at `warn`; the article is still usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    #[error("planted value {planted:?} does not appear in the article text")]
    PlantedValueMissing { planted: String },

    #[error("original value {original:?} still appears in the article text")]
    OriginalStillPresent { original: String },

    #[error("{original:?} does not occur in the text; nothing was replaced")]
    OriginalNotFound { original: String },

    #[error("{surface:?} was produced by more than one replacement; restoring it is ambiguous")]
    ReplacementCollision { surface: String },
}

impl IntegrityWarning {
    pub(crate) fn log(&self, title: &str) {
        tracing::warn!(article = title, "{self}");
    }
}
