pub mod authoring;
pub mod inject;
pub mod perturb;
pub mod redact;
pub mod substitute;
pub mod text;
pub mod verify;

pub use authoring::{AuthoringSession, plant_manual, reverse_replacements};
pub use inject::{ErrorInjector, Injection};
pub use perturb::{MagnitudeClass, NumericPerturber};
pub use redact::Redactor;
pub use substitute::LexicalSubstituter;
pub use verify::{Verdict, verify};
