#[macro_use]
mod macros;

pub mod article;
pub mod selection;

pub use article::{ErrorKind, ErrorRecord, MutatedArticle, Replacement, SourceText};
pub use selection::Selection;
