//! Template Data Model - Permissive In, Validated Out

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub type TemplateName = String;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read templates file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Templates file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw template record as supplied by an upstream source.
///
/// Upstream loaders give no typing guarantees: any field may be absent or
/// carry the wrong JSON type. The engine checks field-by-field; nothing here
/// fails on malformed records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTemplateInput(Map<String, Value>);

impl RawTemplateInput {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Name used to label findings. Falls back to "unknown" when the record
    /// carries no usable name.
    pub fn display_name(&self) -> &str {
        self.get_str("name").unwrap_or("unknown")
    }
}

impl From<Map<String, Value>> for RawTemplateInput {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Fully validated template record.
///
/// Constructed only after every schema check has passed; the engine hands
/// these out so downstream consumers never touch loosely-typed input again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedTemplate {
    pub name: TemplateName,
    pub description: String,
    pub repo_types: Vec<String>,
    pub setup_script: String,
    pub maintenance_script: String,
    pub required_secrets: Vec<String>,
    pub environment_variables: HashMap<String, String>,
    pub instructions: String,
}

impl ValidatedTemplate {
    /// Build from a raw record. Returns None when a checked field does not
    /// have the shape the schema rules guarantee, so this only succeeds for
    /// records the engine accepted.
    pub fn from_raw(raw: &RawTemplateInput) -> Option<Self> {
        let name = raw.get_str("name")?.to_string();
        let setup_script = raw.get_str("setupScript")?.to_string();
        let maintenance_script = raw.get_str("maintenanceScript")?.to_string();
        let instructions = raw.get_str("instructions")?.to_string();
        let repo_types = string_items(raw.get("repoTypes")?.as_array()?);
        let required_secrets = string_items(raw.get("requiredSecrets")?.as_array()?);
        let environment_variables = raw
            .get("environmentVariables")?
            .as_object()?
            .iter()
            .map(|(k, v)| (k.clone(), string_value(v)))
            .collect();

        Some(Self {
            name,
            // description carries no type rule, so take whatever is there
            description: raw.get_str("description").unwrap_or_default().to_string(),
            repo_types,
            setup_script,
            maintenance_script,
            required_secrets,
            environment_variables,
            instructions,
        })
    }
}

fn string_items(items: &[Value]) -> Vec<String> {
    items.iter().map(string_value).collect()
}

fn string_value(v: &Value) -> String {
    match v.as_str() {
        Some(s) => s.to_string(),
        None => v.to_string(),
    }
}

/// The `{"templates": [...]}` envelope supplied by a template source.
///
/// A missing `templates` key loads as an empty collection; the engine turns
/// emptiness into the collection-level error. Malformed JSON is a loader
/// failure, not a validation finding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateCollection {
    #[serde(default)]
    templates: Vec<RawTemplateInput>,
}

impl TemplateCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn templates(&self) -> &[RawTemplateInput] {
        &self.templates
    }

    pub fn register(&mut self, template: RawTemplateInput) {
        self.templates.push(template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
