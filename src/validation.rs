//! Validation Engine - Findings Accumulate, Errors Gate
//!
//! Checkers produce findings; findings are collected, never thrown.
//! Errors block acceptance, Warnings never do.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::schema;
use crate::script::{self, ScriptField};
use crate::secrets;
use crate::templates::{RawTemplateInput, ValidatedTemplate};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding, attributed to the template it refers to.
/// Collection-level findings carry no template name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub template: Option<String>,
    pub message: String,
}

impl Finding {
    pub fn error(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            template: Some(template.into()),
            message: message.into(),
        }
    }

    pub fn warning(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            template: Some(template.into()),
            message: message.into(),
        }
    }

    pub fn collection_error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            template: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.template {
            Some(name) => write!(f, "{}: {}", name, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Snapshot of one validation session, read out by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub completed_at: DateTime<Utc>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Exit-code convention for a driving process: 0 iff no Errors.
    pub fn exit_code(&self) -> u8 {
        if self.errors.is_empty() {
            0
        } else {
            1
        }
    }
}

/// Validator orchestrates the checkers over one validation session.
///
/// The finding lists are strictly append-only and live for the session;
/// construct a fresh Validator per run, never reuse one across runs.
pub struct Validator {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
    validated: Vec<ValidatedTemplate>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            errors: vec![],
            warnings: vec![],
            validated: vec![],
        }
    }

    /// Validate a single template record.
    ///
    /// Runs the field schema checks and, when the record's structure allows
    /// it, the script heuristics and secret scan over `setupScript`.
    /// Returns true iff no Error was added during this call.
    pub fn validate(&mut self, raw: &RawTemplateInput) -> bool {
        let name = raw.display_name().to_string();
        debug!(template = %name, "validating template");

        let errors_before = self.errors.len();

        let check = schema::check_template(raw, &name);
        let structure_ok = check.structure_ok;
        self.errors.extend(check.errors);

        if structure_ok {
            // A mis-typed setupScript already carries a schema error;
            // the scans see it as empty text.
            let setup_script = raw.get_str("setupScript").unwrap_or("");
            self.warnings
                .extend(script::check_script(setup_script, &name, ScriptField::Setup));
            self.errors.extend(secrets::scan_script(setup_script, &name));
        }

        let valid = self.errors.len() == errors_before;
        if valid {
            if let Some(template) = ValidatedTemplate::from_raw(raw) {
                self.validated.push(template);
            }
        }
        valid
    }

    /// Validate every record in a collection.
    ///
    /// An empty collection is itself an error. One record's errors never
    /// block processing of later records; the result is the AND of all
    /// per-record results.
    pub fn validate_all(&mut self, records: &[RawTemplateInput]) -> bool {
        if records.is_empty() {
            self.errors
                .push(Finding::collection_error("No templates found in templates array"));
            return false;
        }

        info!(count = records.len(), "validating template collection");

        let mut all_valid = true;
        for record in records {
            if !self.validate(record) {
                all_valid = false;
            }
        }
        all_valid
    }

    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// Strongly typed records for everything that validated cleanly.
    pub fn validated(&self) -> &[ValidatedTemplate] {
        &self.validated
    }

    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            valid: self.errors.is_empty(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
            completed_at: Utc::now(),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
