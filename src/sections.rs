//! Section-presence checks.
//!
//! Required headings are matched as exact substrings of the body, including
//! the heading-level marker, so near-misses (different case, abbreviations)
//! are flagged. Recommended headings are matched loosely: any heading line
//! containing the phrase case-insensitively counts, so "## Risks and Open
//! Questions" satisfies a recommended "Risks" heading.

use crate::output::{Finding, Severity};
use crate::rules::RuleSet;

/// Check the body for required and recommended section headings.
///
/// The grandfather policy: a missing required heading is only a hard error in
/// strict mode for documents in the externally supplied new-document set.
/// Pre-existing documents get a warning so the corpus can converge
/// incrementally.
pub fn check_sections(body: &str, rules: &RuleSet, strict: bool, is_new: bool) -> Vec<Finding> {
    let mut findings = Vec::new();

    for section in rules.required_sections {
        if !body.contains(section) {
            let severity = if strict && is_new {
                Severity::Error
            } else {
                Severity::Warning
            };
            findings.push(Finding::new(
                severity,
                format!("Missing required section: {section}"),
            ));
        }
    }

    for phrase in rules.recommended_sections {
        if !has_heading_containing(body, phrase) {
            findings.push(Finding::warning(format!(
                "Consider adding a \"{phrase}\" section"
            )));
        }
    }

    findings
}

fn has_heading_containing(body: &str, phrase: &str) -> bool {
    let needle = phrase.to_lowercase();
    body.lines().any(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with('#') && trimmed.to_lowercase().contains(&needle)
    })
}
