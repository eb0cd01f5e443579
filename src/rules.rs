//! Per-kind rule catalog.
//!
//! Each kind's `RuleSet` is independent data; kinds deliberately share no
//! rules object even where values coincide, because the kinds diverge in
//! practice and the duplication keeps each contract readable in one place.
//! The catalog is built once and never mutated during a run.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classifier::DocKind;
use crate::output::Severity;

/// Vendor terms banned from generic pattern names. Patterns describe
/// vendor-neutral techniques; a vendor name in the file name means the
/// document belongs in `vendors/` instead.
pub const VENDOR_TERMS: &[&str] = &["flashbots", "shutter", "suave", "aztec", "polygon"];

/// Allowed values for the `status` frontmatter field. Violations are errors
/// regardless of schema availability because publication state drives
/// downstream consumers.
pub const STATUS_VALUES: &[&str] = &["draft", "ready"];

/// Known values for the `maturity` frontmatter field. Violations are warnings.
pub const MATURITY_VALUES: &[&str] = &["experimental", "PoC", "pilot", "production", "prod"];

/// A file-naming convention attached to a kind.
pub struct NamingRule {
    /// Returns a violation message, or `None` when the name conforms.
    pub check: fn(&str) -> Option<String>,
    pub severity: Severity,
}

/// The immutable validation contract for one document kind.
pub struct RuleSet {
    pub kind: DocKind,
    pub required_fields: &'static [&'static str],
    pub recommended_fields: &'static [&'static str],
    /// Exact heading markup that must appear in the body.
    pub required_sections: &'static [&'static str],
    /// Heading phrases matched case-insensitively as substrings.
    pub recommended_sections: &'static [&'static str],
    pub word_warn: usize,
    pub word_error: usize,
    pub naming: Option<NamingRule>,
}

static PATTERN_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pattern-[a-z0-9-]+$").expect("static regex"));
static APPROACH_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^approach-[a-z0-9-]+$").expect("static regex"));

fn check_pattern_name(file_name: &str) -> Option<String> {
    if !file_name.starts_with("pattern-") {
        return Some("Pattern files must start with \"pattern-\"".to_string());
    }
    if !file_name.ends_with(".md") {
        return Some("Pattern files must end with \".md\"".to_string());
    }

    let stem = &file_name[..file_name.len() - 3];
    if !PATTERN_NAME_RE.is_match(stem) {
        return Some(
            "Pattern names must use kebab-case (lowercase letters, numbers, and hyphens only)"
                .to_string(),
        );
    }

    let lowered = file_name.to_lowercase();
    for vendor in VENDOR_TERMS {
        if lowered.contains(vendor) {
            return Some(format!(
                "Pattern name contains vendor-specific term \"{vendor}\" - use generic names instead"
            ));
        }
    }

    None
}

fn check_approach_name(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".md")?;
    if APPROACH_NAME_RE.is_match(stem) {
        None
    } else {
        Some("Approach files should use the \"approach-\" kebab-case prefix".to_string())
    }
}

static PATTERN_RULES: RuleSet = RuleSet {
    kind: DocKind::Pattern,
    required_fields: &["title", "status", "maturity"],
    recommended_fields: &["layer", "privacy_goal", "assumptions", "last_reviewed"],
    required_sections: &[
        "## Intent",
        "## Ingredients",
        "## Protocol",
        "## Guarantees",
        "## Trade-offs",
        "## Example",
        "## See also",
    ],
    recommended_sections: &["Risks", "Variations"],
    word_warn: 800,
    word_error: 1500,
    naming: Some(NamingRule {
        check: check_pattern_name,
        severity: Severity::Error,
    }),
};

static VENDOR_RULES: RuleSet = RuleSet {
    kind: DocKind::Vendor,
    required_fields: &["title", "status", "category"],
    recommended_fields: &["jurisdiction", "website", "last_reviewed"],
    required_sections: &["## Overview", "## Offering", "## See also"],
    recommended_sections: &["Compliance", "Limitations"],
    word_warn: 1000,
    word_error: 1800,
    naming: None,
};

static USE_CASE_RULES: RuleSet = RuleSet {
    kind: DocKind::UseCase,
    required_fields: &["title", "status"],
    recommended_fields: &["actors", "maturity", "last_reviewed"],
    required_sections: &["## Context", "## Flow", "## See also"],
    recommended_sections: &["Risks"],
    word_warn: 1200,
    word_error: 2000,
    naming: None,
};

static APPROACH_RULES: RuleSet = RuleSet {
    kind: DocKind::Approach,
    required_fields: &["title", "status"],
    recommended_fields: &["maturity", "last_reviewed"],
    required_sections: &["## Overview", "## See also"],
    recommended_sections: &["Trade-offs", "Adoption"],
    word_warn: 2000,
    word_error: 3000,
    // Advisory only: approach documents are renamed more freely than patterns.
    naming: Some(NamingRule {
        check: check_approach_name,
        severity: Severity::Warning,
    }),
};

static JURISDICTION_RULES: RuleSet = RuleSet {
    kind: DocKind::Jurisdiction,
    required_fields: &["title", "status"],
    recommended_fields: &["region", "last_reviewed"],
    required_sections: &["## Regulatory status", "## See also"],
    recommended_sections: &["Key regulations", "Outlook"],
    word_warn: 1500,
    word_error: 2500,
    naming: None,
};

/// Look up the rule set governing a document kind.
pub fn rule_set_for(kind: DocKind) -> &'static RuleSet {
    match kind {
        DocKind::Pattern => &PATTERN_RULES,
        DocKind::Vendor => &VENDOR_RULES,
        DocKind::UseCase => &USE_CASE_RULES,
        DocKind::Approach => &APPROACH_RULES,
        DocKind::Jurisdiction => &JURISDICTION_RULES,
    }
}
