pub mod config;
pub mod corpus;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod model;
pub mod seed;
pub mod session;

pub use config::EngineConfig;
pub use corpus::{ArticleEntry, Corpus};
pub use dictionary::SubstitutionDictionary;
pub use engine::{
    AuthoringSession, ErrorInjector, Injection, LexicalSubstituter, MagnitudeClass,
    NumericPerturber, Redactor, Verdict, plant_manual, verify,
};
pub use error::{Error, IntegrityWarning, Result};
pub use model::{ErrorKind, ErrorRecord, MutatedArticle, Replacement, Selection, SourceText};
pub use session::GameSession;
