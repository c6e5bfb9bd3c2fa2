//! Script Heuristics Checker
//!
//! Best-effort textual hygiene checks over embedded shell scripts. This is
//! not a shell parser; false positives and negatives are acceptable.

use std::sync::LazyLock;

use regex::Regex;

use crate::validation::Finding;

static SHELL_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[A-Z_]+").expect("shell variable pattern: invalid regex"));

/// At most this many distinct variables are named in the combined warning.
pub const MAX_REPORTED_VARS: usize = 3;

/// Which template field the script text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptField {
    Setup,
    Maintenance,
}

impl ScriptField {
    pub fn label(self) -> &'static str {
        match self {
            ScriptField::Setup => "setupScript",
            ScriptField::Maintenance => "maintenanceScript",
        }
    }
}

/// Inspect script text for hygiene issues. Produces Warnings only; none of
/// these block acceptance.
pub fn check_script(script: &str, name: &str, field: ScriptField) -> Vec<Finding> {
    let mut warnings = vec![];

    if field == ScriptField::Setup && !script.starts_with("#!/bin/bash") {
        warnings.push(Finding::warning(
            name,
            format!("{} should start with #!/bin/bash shebang", field.label()),
        ));
    }

    if !script.contains("set -e") {
        warnings.push(Finding::warning(
            name,
            format!("{} should include 'set -e' for error handling", field.label()),
        ));
    }

    let unquoted = unquoted_variables(script);
    if !unquoted.is_empty() {
        warnings.push(Finding::warning(
            name,
            format!(
                "{} has unquoted variables: {}",
                field.label(),
                unquoted.join(", ")
            ),
        ));
    }

    warnings
}

/// First few distinct `$UPPER_SNAKE` references not immediately enclosed in
/// double quotes on both sides. A missing neighbor at the start or end of
/// the text counts as unquoted.
fn unquoted_variables(script: &str) -> Vec<String> {
    let mut found: Vec<String> = vec![];
    for m in SHELL_VAR_RE.find_iter(script) {
        let before = script[..m.start()].chars().next_back();
        let after = script[m.end()..].chars().next();
        if before == Some('"') && after == Some('"') {
            continue;
        }
        if !found.iter().any(|v| v == m.as_str()) {
            found.push(m.as_str().to_string());
            if found.len() == MAX_REPORTED_VARS {
                break;
            }
        }
    }
    found
}
