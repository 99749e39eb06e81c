//! Versioned worksheet templates and layout detection.

mod detect;
mod embedded;
mod registry;

pub use detect::{Detection, FREE_RULE_SCORE, POSITIONAL_RULE_SCORE, best_match, signature_score};
pub use embedded::BUILTIN_TEMPLATES;
pub use registry::TemplateRegistry;
