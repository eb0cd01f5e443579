//! Document loading: splitting raw markdown into a frontmatter mapping and a
//! body.
//!
//! A frontmatter block opens only when the very first line is the `---`
//! delimiter and closes at the next line that is exactly `---`. A parse
//! failure on the block is captured on the returned document rather than
//! propagated, so the caller can record it and keep running the remaining
//! checks against empty metadata.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

const FRONTMATTER_DELIMITER: &str = "---";

/// A parsed frontmatter value, reduced to the shapes the rule sets care about.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Str(String),
    Bool(bool),
    Int(i64),
    List(Vec<String>),
}

impl MetaValue {
    /// Render the value the way it appears in findings.
    pub fn display(&self) -> String {
        match self {
            MetaValue::Str(s) => s.clone(),
            MetaValue::Bool(b) => b.to_string(),
            MetaValue::Int(n) => n.to_string(),
            MetaValue::List(items) => items.join(", "),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value is a canonical `YYYY-MM-DD` date string.
    pub fn is_date(&self) -> bool {
        matches!(self, MetaValue::Str(s) if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok())
    }
}

/// Frontmatter mapping. `BTreeMap` keeps field iteration (and thus finding
/// order) stable across runs.
pub type Metadata = BTreeMap<String, MetaValue>;

/// Result of loading one raw document.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub metadata: Metadata,
    pub body: String,
    /// YAML parse failure details, if the frontmatter block was malformed.
    pub metadata_error: Option<String>,
}

/// Split raw file text into frontmatter metadata and a body.
pub fn parse_document(raw: &str) -> ParsedDocument {
    let mut lines = raw.lines();

    let Some(first) = lines.next() else {
        return ParsedDocument::default();
    };

    if first != FRONTMATTER_DELIMITER {
        return ParsedDocument {
            body: join_body(std::iter::once(first).chain(lines)),
            ..Default::default()
        };
    }

    let mut frontmatter_lines = Vec::new();
    let mut closed = false;
    let mut body_lines = Vec::new();

    for line in lines {
        if !closed {
            if line == FRONTMATTER_DELIMITER {
                closed = true;
            } else {
                frontmatter_lines.push(line);
            }
        } else {
            body_lines.push(line);
        }
    }

    if !closed {
        // Unterminated block: treat the whole file as frontmatter-less body so
        // section and length checks still see the text.
        return ParsedDocument {
            body: join_body(raw.lines()),
            metadata_error: Some("unterminated frontmatter block".to_string()),
            ..Default::default()
        };
    }

    let (metadata, metadata_error) = match serde_yaml::from_str::<serde_yaml::Value>(
        &frontmatter_lines.join("\n"),
    ) {
        Ok(value) => (convert_mapping(value), None),
        Err(e) => (Metadata::new(), Some(e.to_string())),
    };

    ParsedDocument {
        metadata,
        body: join_body(body_lines.into_iter()),
        metadata_error,
    }
}

fn join_body<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut body = String::new();
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    body
}

fn convert_mapping(value: serde_yaml::Value) -> Metadata {
    let mut metadata = Metadata::new();
    let serde_yaml::Value::Mapping(mapping) = value else {
        return metadata;
    };

    for (key, value) in mapping {
        let Some(key) = yaml_scalar_to_string(&key) else {
            continue;
        };
        // A key with a null value ("status:" with nothing after it) counts
        // as absent, so required-field checks report it as missing.
        if value.is_null() {
            continue;
        }
        metadata.insert(key, convert_value(value));
    }
    metadata
}

fn convert_value(value: serde_yaml::Value) -> MetaValue {
    match value {
        serde_yaml::Value::Bool(b) => MetaValue::Bool(b),
        serde_yaml::Value::Number(n) if n.is_i64() => {
            MetaValue::Int(n.as_i64().unwrap_or_default())
        }
        serde_yaml::Value::Sequence(items) => MetaValue::List(
            items
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect(),
        ),
        serde_yaml::Value::String(s) => MetaValue::Str(normalize_date(&s)),
        other => MetaValue::Str(
            yaml_scalar_to_string(&other).unwrap_or_else(|| format!("{other:?}")),
        ),
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Normalize date-shaped strings to canonical `YYYY-MM-DD` so schema and
/// equality checks are type-stable regardless of how the author wrote the
/// date.
fn normalize_date(s: &str) -> String {
    let trimmed = s.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return ts.date_naive().format("%Y-%m-%d").to_string();
    }

    s.to_string()
}
