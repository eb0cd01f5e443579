//! Internal link integrity checks.
//!
//! Only intra-corpus relative `.md` links are resolved; external URLs,
//! in-page anchors, and mail links are ignored. Link rot is non-fatal by
//! default because the corpus evolves faster than cross-links stay in sync,
//! so severity is chosen by the caller (error under strict verification,
//! warning otherwise).

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::output::{Finding, Severity};

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("static regex"));

/// Check every markdown link in `body`, resolving relative `.md` targets
/// against `doc_dir`.
pub fn check_links(body: &str, doc_dir: &Path, severity: Severity) -> Vec<Finding> {
    let mut findings = Vec::new();

    for captures in LINK_RE.captures_iter(body) {
        let target = &captures[2];

        if target.starts_with("http://")
            || target.starts_with("https://")
            || target.starts_with('#')
            || target.starts_with("mailto:")
        {
            continue;
        }

        if !(target.ends_with(".md") || target.contains(".md#")) {
            continue;
        }

        let without_anchor = target.split('#').next().unwrap_or(target);
        let resolved = doc_dir.join(without_anchor);
        if !resolved.exists() {
            findings.push(Finding::new(
                severity,
                format!("Broken internal link: {target}"),
            ));
        }
    }

    findings
}
