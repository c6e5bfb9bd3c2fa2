//! TemplateCheck Core - Environment Template Validator
//!
//! # The Ground Rules (Non-Negotiable)
//! 1. Templates Are Declarative Contracts
//! 2. Validation Is Read-Only
//! 3. Errors Gate, Warnings Inform
//! 4. Findings Are Deterministic
//! 5. Scripts Are Scanned, Never Run

pub mod report;
pub mod schema;
pub mod script;
pub mod secrets;
pub mod templates;
pub mod validation;

pub use script::ScriptField;
pub use secrets::SecretPattern;
pub use templates::{LoadError, RawTemplateInput, TemplateCollection, ValidatedTemplate};
pub use validation::{Finding, Severity, ValidationReport, Validator};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
