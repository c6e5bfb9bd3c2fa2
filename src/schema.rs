//! Field Schema Checker
//!
//! Structural, naming, and policy rules for one template record.
//! Rules are independent; only a failed presence check stops the rest.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::templates::RawTemplateInput;
use crate::validation::Finding;

/// Fields every template record must carry.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "description",
    "repoTypes",
    "setupScript",
    "maintenanceScript",
    "requiredSecrets",
    "environmentVariables",
    "instructions",
];

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("name pattern: invalid regex"));

/// Outcome of the schema pass over one record.
pub struct SchemaCheck {
    pub errors: Vec<Finding>,
    /// False when required fields are missing; such a record cannot be
    /// meaningfully checked further.
    pub structure_ok: bool,
}

/// Run all schema rules over a raw record. `name` is the display name used
/// to attribute findings; the `name` field itself is re-checked for format.
pub fn check_template(raw: &RawTemplateInput, name: &str) -> SchemaCheck {
    let mut errors = vec![];

    for field in REQUIRED_FIELDS {
        if !raw.has(field) {
            errors.push(Finding::error(
                name,
                format!("Missing required field '{}'", field),
            ));
        }
    }
    if !errors.is_empty() {
        return SchemaCheck {
            errors,
            structure_ok: false,
        };
    }

    let name_ok = raw.get_str("name").is_some_and(|n| NAME_RE.is_match(n));
    if !name_ok {
        errors.push(Finding::error(
            name,
            "Invalid name format (use lowercase, numbers, hyphens only)",
        ));
    }

    match raw.get("repoTypes") {
        Some(Value::Array(items)) if !items.is_empty() => {}
        _ => errors.push(Finding::error(name, "repoTypes must be a non-empty list")),
    }

    match raw.get_str("setupScript") {
        Some(script) if !script.trim().is_empty() => {}
        _ => errors.push(Finding::error(name, "setupScript must be a non-empty string")),
    }

    if raw.get_str("maintenanceScript").is_none() {
        errors.push(Finding::error(name, "maintenanceScript must be a string"));
    }

    if !matches!(raw.get("requiredSecrets"), Some(Value::Array(_))) {
        errors.push(Finding::error(name, "requiredSecrets must be a list"));
    }

    if !matches!(raw.get("environmentVariables"), Some(Value::Object(_))) {
        errors.push(Finding::error(name, "environmentVariables must be an object"));
    }

    match raw.get_str("instructions") {
        Some(text) if !text.trim().is_empty() => {}
        _ => errors.push(Finding::error(name, "instructions must be a non-empty string")),
    }

    // GitHub templates must declare the token they depend on. A mis-typed
    // requiredSecrets counts as lacking it; the type rule above reports
    // that independently.
    if raw.get_str("name").is_some_and(|n| n.starts_with("github-")) {
        let has_token = raw
            .get("requiredSecrets")
            .and_then(Value::as_array)
            .is_some_and(|secrets| secrets.iter().any(|s| s.as_str() == Some("GITHUB_TOKEN")));
        if !has_token {
            errors.push(Finding::error(
                name,
                "GitHub templates must require GITHUB_TOKEN secret",
            ));
        }
    }

    SchemaCheck {
        errors,
        structure_ok: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawTemplateInput {
        serde_json::from_value(value).unwrap()
    }

    fn complete() -> RawTemplateInput {
        raw(json!({
            "name": "python-ml",
            "description": "Python ML setup",
            "repoTypes": ["python"],
            "setupScript": "#!/bin/bash\nset -e\npip install -r requirements.txt",
            "maintenanceScript": "",
            "requiredSecrets": [],
            "environmentVariables": {},
            "instructions": "Use for ML repositories"
        }))
    }

    fn messages(check: &SchemaCheck) -> Vec<&str> {
        check.errors.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn test_complete_record_has_no_errors() {
        let check = check_template(&complete(), "python-ml");
        assert!(check.errors.is_empty());
        assert!(check.structure_ok);
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let check = check_template(&raw(json!({"name": "x"})), "x");
        assert!(!check.structure_ok);
        assert_eq!(check.errors.len(), REQUIRED_FIELDS.len() - 1);
        assert_eq!(check.errors[0].message, "Missing required field 'description'");
        assert_eq!(
            check.errors.last().unwrap().message,
            "Missing required field 'instructions'"
        );
    }

    #[test]
    fn test_name_format() {
        for bad in ["My Template", "UPPER", "under_score", "dots.here", ""] {
            let mut record = complete();
            record.insert("name", json!(bad));
            let check = check_template(&record, bad);
            assert!(
                messages(&check).contains(&"Invalid name format (use lowercase, numbers, hyphens only)"),
                "expected format error for {:?}",
                bad
            );
        }

        let mut record = complete();
        record.insert("name", json!("node-18-lts"));
        assert!(check_template(&record, "node-18-lts").errors.is_empty());
    }

    #[test]
    fn test_name_must_be_a_string() {
        let mut record = complete();
        record.insert("name", json!(["not", "a", "string"]));
        let check = check_template(&record, "unknown");
        assert!(messages(&check)
            .contains(&"Invalid name format (use lowercase, numbers, hyphens only)"));
    }

    #[test]
    fn test_repo_types_rules() {
        let mut record = complete();
        record.insert("repoTypes", json!([]));
        assert!(messages(&check_template(&record, "python-ml"))
            .contains(&"repoTypes must be a non-empty list"));

        record.insert("repoTypes", json!("python"));
        assert!(messages(&check_template(&record, "python-ml"))
            .contains(&"repoTypes must be a non-empty list"));
    }

    #[test]
    fn test_setup_script_rules() {
        let mut record = complete();
        record.insert("setupScript", json!("   \n\t  "));
        assert!(messages(&check_template(&record, "python-ml"))
            .contains(&"setupScript must be a non-empty string"));

        record.insert("setupScript", json!(7));
        assert!(messages(&check_template(&record, "python-ml"))
            .contains(&"setupScript must be a non-empty string"));
    }

    #[test]
    fn test_maintenance_script_may_be_empty_but_must_be_text() {
        let mut record = complete();
        record.insert("maintenanceScript", json!(""));
        assert!(check_template(&record, "python-ml").errors.is_empty());

        record.insert("maintenanceScript", json!(null));
        assert!(messages(&check_template(&record, "python-ml"))
            .contains(&"maintenanceScript must be a string"));
    }

    #[test]
    fn test_collection_typed_fields() {
        let mut record = complete();
        record.insert("requiredSecrets", json!("GITHUB_TOKEN"));
        record.insert("environmentVariables", json!(["PATH"]));
        let check = check_template(&record, "python-ml");
        let msgs = messages(&check);
        assert!(msgs.contains(&"requiredSecrets must be a list"));
        assert!(msgs.contains(&"environmentVariables must be an object"));
    }

    #[test]
    fn test_instructions_must_be_non_empty() {
        let mut record = complete();
        record.insert("instructions", json!(" "));
        assert!(messages(&check_template(&record, "python-ml"))
            .contains(&"instructions must be a non-empty string"));
    }

    #[test]
    fn test_github_rule() {
        let mut record = complete();
        record.insert("name", json!("github-actions"));
        let check = check_template(&record, "github-actions");
        assert_eq!(
            messages(&check),
            vec!["GitHub templates must require GITHUB_TOKEN secret"]
        );

        record.insert("requiredSecrets", json!(["GITHUB_TOKEN"]));
        assert!(check_template(&record, "github-actions").errors.is_empty());
    }

    #[test]
    fn test_github_rule_applies_alongside_other_failures() {
        let mut record = complete();
        record.insert("name", json!("github-actions"));
        record.insert("repoTypes", json!([]));
        let check = check_template(&record, "github-actions");
        let msgs = messages(&check);
        assert!(msgs.contains(&"repoTypes must be a non-empty list"));
        assert!(msgs.contains(&"GitHub templates must require GITHUB_TOKEN secret"));
    }

    #[test]
    fn test_non_github_name_needs_no_token() {
        let mut record = complete();
        record.insert("name", json!("gitlab-ci"));
        assert!(check_template(&record, "gitlab-ci").errors.is_empty());
    }
}
