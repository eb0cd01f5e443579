//! Word-count budget checks.
//!
//! Length is a proxy for "has drifted from a concise reference entry into a
//! full treatise". Code blocks, inline code, link markup, and markdown
//! decoration are stripped before counting so the budget measures prose.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::output::Finding;
use crate::rules::RuleSet;

static FENCED_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("static regex"));
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").expect("static regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]+\)").expect("static regex"));
static DECORATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#*_\[\]]").expect("static regex"));

/// Count prose words in a body, excluding code fencing, inline code, link
/// syntax, and markdown decoration.
pub fn count_words(body: &str) -> usize {
    let text = FENCED_CODE_RE.replace_all(body, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = DECORATION_RE.replace_all(&text, " ");
    text.split_whitespace().count()
}

/// Compare the body's word count against the kind's budget. At most one
/// finding is produced.
pub fn check_length(body: &str, rules: &RuleSet) -> Option<Finding> {
    let words = count_words(body);
    if words > rules.word_error {
        Some(Finding::error(format!(
            "Content too long: {words} words (max {})",
            rules.word_error
        )))
    } else if words > rules.word_warn {
        Some(Finding::warning(format!(
            "Content length: {words} words (recommended max {})",
            rules.word_warn
        )))
    } else {
        None
    }
}
