//! Secret Pattern Registry
//!
//! Fixed, ordered table of known credential shapes. Extending coverage is a
//! data change; the scan logic never needs to know about providers. Shapes
//! for unlisted providers are accepted false negatives.

use std::sync::LazyLock;

use regex::Regex;

use crate::validation::Finding;

/// One credential shape: a pattern plus the human label for reports.
pub struct SecretPattern {
    pub pattern: Regex,
    pub label: &'static str,
}

impl SecretPattern {
    fn new(pattern: &str, label: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("secret pattern: invalid regex"),
            label,
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

static REGISTRY: LazyLock<Vec<SecretPattern>> = LazyLock::new(|| {
    vec![
        SecretPattern::new(r"ghp_[A-Za-z0-9]{36}", "GitHub Personal Access Token"),
        SecretPattern::new(r"gho_[A-Za-z0-9]{36}", "GitHub OAuth Token"),
        SecretPattern::new(r"github_pat_[A-Za-z0-9_]{82}", "GitHub Fine-Grained Token"),
        SecretPattern::new(r"AKIA[0-9A-Z]{16}", "AWS Access Key"),
        SecretPattern::new(r"sk-[A-Za-z0-9]{48}", "OpenAI API Key"),
    ]
});

pub fn registry() -> &'static [SecretPattern] {
    &REGISTRY
}

/// Test script text against every registered credential shape.
///
/// All patterns are checked, never short-circuited, so multiple distinct
/// leaked-credential types are each reported. One Error per matching
/// pattern, regardless of how often it occurs.
pub fn scan_script(script: &str, name: &str) -> Vec<Finding> {
    registry()
        .iter()
        .filter(|rule| rule.is_match(script))
        .map(|rule| Finding::error(name, format!("Found hardcoded {} in script!", rule.label)))
        .collect()
}
