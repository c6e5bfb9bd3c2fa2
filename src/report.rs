//! Report Formatter
//!
//! Renders a validation report the way the driving process prints it:
//! warnings first, then errors, then the verdict line.

use crate::validation::ValidationReport;

pub fn render(report: &ValidationReport) -> String {
    let mut out = String::new();
    out.push_str("=== Validation Results ===\n\n");

    if !report.warnings.is_empty() {
        out.push_str(&format!("⚠️  {} Warning(s):\n", report.warnings.len()));
        for finding in &report.warnings {
            out.push_str(&format!("   {}\n", finding));
        }
        out.push('\n');
    }

    if report.has_errors() {
        out.push_str(&format!("❌ {} Error(s):\n", report.errors.len()));
        for finding in &report.errors {
            out.push_str(&format!("   {}\n", finding));
        }
        out.push_str("\n❌ Validation FAILED\n");
    } else {
        out.push_str("✅ All templates valid!\n");
    }

    out
}
