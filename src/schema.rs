//! Frontmatter schema checks.
//!
//! Two layers: the unconditional required/recommended field checks driven by
//! the rule catalog, and an optional structural schema loaded per kind from
//! `<root>/schemas/<kind>.json`. A missing schema file only narrows coverage,
//! it never aborts a run. Unknown fields are flagged as warnings, not errors:
//! schema drift is tolerated but visible.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::DocKind;
use crate::document::{MetaValue, Metadata};
use crate::error::{Result, ValidationError};
use crate::output::Finding;
use crate::rules::{MATURITY_VALUES, RuleSet, STATUS_VALUES};

/// Field types a structural schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Date,
    Boolean,
    List,
    Number,
}

impl FieldType {
    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::List => "list",
            FieldType::Number => "number",
        }
    }

    fn matches(&self, value: &MetaValue) -> bool {
        match self {
            FieldType::String => matches!(value, MetaValue::Str(_)),
            FieldType::Date => value.is_date(),
            FieldType::Boolean => matches!(value, MetaValue::Bool(_)),
            FieldType::List => matches!(value, MetaValue::List(_)),
            FieldType::Number => matches!(value, MetaValue::Int(_)),
        }
    }
}

/// One declared field in a structural schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
}

/// Structural schema for one document kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocSchema {
    pub fields: BTreeMap<String, FieldSpec>,
}

/// Read-only table of per-kind schemas, loaded once at engine start.
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    schemas: HashMap<DocKind, DocSchema>,
}

impl SchemaTable {
    /// Load any schema files present under `<root>/schemas/`. Absent files
    /// are skipped; a file that exists but does not parse is an engine error.
    pub fn load(root: &Path) -> Result<Self> {
        let mut schemas = HashMap::new();

        for kind in DocKind::ALL {
            let path = root.join("schemas").join(format!("{}.json", kind.as_str()));
            if !path.exists() {
                continue;
            }
            let raw = std::fs::read_to_string(&path)?;
            let schema: DocSchema =
                serde_json::from_str(&raw).map_err(|e| ValidationError::SchemaFile {
                    path: path.clone(),
                    details: e.to_string(),
                })?;
            schemas.insert(kind, schema);
        }

        Ok(Self { schemas })
    }

    pub fn get(&self, kind: DocKind) -> Option<&DocSchema> {
        self.schemas.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

// status and maturity are validated unconditionally below, so the schema's
// enumeration pass skips them to keep each violation reported exactly once.
const UNCONDITIONAL_FIELDS: &[&str] = &["status", "maturity"];

/// Validate frontmatter against the kind's rule set and optional structural
/// schema.
pub fn check_metadata(
    metadata: &Metadata,
    rules: &RuleSet,
    schema: Option<&DocSchema>,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for field in rules.required_fields {
        if !has_value(metadata, field) {
            findings.push(Finding::error(format!(
                "Missing required frontmatter field: {field}"
            )));
        }
    }

    for field in rules.recommended_fields {
        if !has_value(metadata, field) {
            findings.push(Finding::warning(format!(
                "Missing recommended frontmatter field: {field}"
            )));
        }
    }

    if let Some(MetaValue::Str(status)) = metadata.get("status")
        && !STATUS_VALUES.contains(&status.as_str())
    {
        findings.push(Finding::error(format!(
            "Invalid status value: {status} (must be 'draft' or 'ready')"
        )));
    }

    if let Some(MetaValue::Str(maturity)) = metadata.get("maturity")
        && !MATURITY_VALUES.contains(&maturity.as_str())
    {
        findings.push(Finding::warning(format!(
            "Unexpected maturity value: {maturity}"
        )));
    }

    if let Some(schema) = schema {
        findings.extend(check_against_schema(metadata, schema));
    }

    findings
}

fn check_against_schema(metadata: &Metadata, schema: &DocSchema) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (field, value) in metadata {
        let Some(spec) = schema.fields.get(field) else {
            findings.push(Finding::warning(format!(
                "Unexpected frontmatter field: {field} (not declared in schema)"
            )));
            continue;
        };

        if !spec.field_type.matches(value) {
            findings.push(Finding::error(format!(
                "Invalid type for frontmatter field {field}: expected {}",
                spec.field_type.name()
            )));
            continue;
        }

        if UNCONDITIONAL_FIELDS.contains(&field.as_str()) {
            continue;
        }

        if let (Some(allowed), MetaValue::Str(actual)) = (&spec.allowed, value)
            && !allowed.iter().any(|a| a == actual)
        {
            findings.push(Finding::error(format!(
                "Invalid {field} value: {actual} (allowed: {})",
                allowed.join(", ")
            )));
        }
    }

    findings
}

fn has_value(metadata: &Metadata, field: &str) -> bool {
    match metadata.get(field) {
        None => false,
        Some(MetaValue::Str(s)) => !s.is_empty(),
        Some(MetaValue::List(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;
    use crate::output::Severity;
    use crate::rules::rule_set_for;
    use tempfile::TempDir;

    fn pattern_metadata(frontmatter: &str) -> Metadata {
        parse_document(&format!("---\n{frontmatter}\n---\nBody\n")).metadata
    }

    fn complete_frontmatter() -> &'static str {
        "title: X\nstatus: draft\nmaturity: pilot\nlayer: L2\nprivacy_goal: unlinkability\nassumptions: none\nlast_reviewed: 2025-01-01"
    }

    #[test]
    fn test_missing_required_field_is_single_error() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata = pattern_metadata(
            "status: draft\nmaturity: pilot\nlayer: L2\nprivacy_goal: x\nassumptions: y\nlast_reviewed: 2025-01-01",
        );
        let findings = check_metadata(&metadata, rules, None);

        let title_findings: Vec<_> = findings
            .iter()
            .filter(|f| f.message.contains("title"))
            .collect();
        assert_eq!(title_findings.len(), 1);
        assert_eq!(title_findings[0].severity, Severity::Error);
        assert_eq!(
            title_findings[0].message,
            "Missing required frontmatter field: title"
        );
    }

    #[test]
    fn test_missing_recommended_field_is_warning() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata = pattern_metadata("title: X\nstatus: draft\nmaturity: pilot");
        let findings = check_metadata(&metadata, rules, None);

        let layer = findings
            .iter()
            .find(|f| f.message.contains("layer"))
            .unwrap();
        assert_eq!(layer.severity, Severity::Warning);
    }

    #[test]
    fn test_invalid_status_yields_exactly_one_error() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata =
            pattern_metadata(&complete_frontmatter().replace("status: draft", "status: pending"));
        let findings = check_metadata(&metadata, rules, None);

        let status_findings: Vec<_> = findings
            .iter()
            .filter(|f| f.message.contains("status value"))
            .collect();
        assert_eq!(status_findings.len(), 1);
        assert_eq!(status_findings[0].severity, Severity::Error);
        assert!(status_findings[0].message.contains("pending"));
        assert!(status_findings[0].message.contains("'draft' or 'ready'"));
    }

    #[test]
    fn test_null_required_field_reports_missing_not_invalid() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata = pattern_metadata("title: X\nstatus:\nmaturity: pilot");
        let findings = check_metadata(&metadata, rules, None);

        assert!(
            findings
                .iter()
                .any(|f| f.message == "Missing required frontmatter field: status")
        );
        assert!(
            !findings
                .iter()
                .any(|f| f.message.contains("Invalid status value")),
            "a null status must not be treated as an enum violation: {findings:?}"
        );
    }

    #[test]
    fn test_unexpected_maturity_is_warning() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata = pattern_metadata(
            &complete_frontmatter().replace("maturity: pilot", "maturity: battle-tested"),
        );
        let findings = check_metadata(&metadata, rules, None);

        let maturity = findings
            .iter()
            .find(|f| f.message.contains("maturity"))
            .unwrap();
        assert_eq!(maturity.severity, Severity::Warning);
        assert!(maturity.message.contains("battle-tested"));
    }

    #[test]
    fn test_clean_metadata_has_no_findings() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata = pattern_metadata(complete_frontmatter());
        let findings = check_metadata(&metadata, rules, None);
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    fn pattern_schema() -> DocSchema {
        serde_json::from_str(
            r#"{
                "fields": {
                    "title": {"type": "string"},
                    "status": {"type": "string", "allowed": ["draft", "ready"]},
                    "maturity": {"type": "string"},
                    "layer": {"type": "string", "allowed": ["L1", "L2", "offchain"]},
                    "privacy_goal": {"type": "string"},
                    "assumptions": {"type": "string"},
                    "last_reviewed": {"type": "date"},
                    "tags": {"type": "list"}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_schema_enum_violation() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata = pattern_metadata(&complete_frontmatter().replace("layer: L2", "layer: L9"));
        let findings = check_metadata(&metadata, rules, Some(&pattern_schema()));

        let layer = findings
            .iter()
            .find(|f| f.message.contains("layer value"))
            .unwrap();
        assert_eq!(layer.severity, Severity::Error);
        assert!(layer.message.contains("L9"));
        assert!(layer.message.contains("L1, L2, offchain"));
    }

    #[test]
    fn test_schema_does_not_double_report_status() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata =
            pattern_metadata(&complete_frontmatter().replace("status: draft", "status: pending"));
        let findings = check_metadata(&metadata, rules, Some(&pattern_schema()));

        let status_findings: Vec<_> = findings
            .iter()
            .filter(|f| f.message.contains("status"))
            .collect();
        assert_eq!(status_findings.len(), 1, "{status_findings:?}");
    }

    #[test]
    fn test_unknown_field_is_warning_not_error() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata =
            pattern_metadata(&format!("{}\nfreeform_note: hi", complete_frontmatter()));
        let findings = check_metadata(&metadata, rules, Some(&pattern_schema()));

        let unknown = findings
            .iter()
            .find(|f| f.message.contains("freeform_note"))
            .unwrap();
        assert_eq!(unknown.severity, Severity::Warning);
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let rules = rule_set_for(DocKind::Pattern);
        let metadata = pattern_metadata(&complete_frontmatter().replace(
            "last_reviewed: 2025-01-01",
            "last_reviewed: sometime last year",
        ));
        let findings = check_metadata(&metadata, rules, Some(&pattern_schema()));

        let mismatch = findings
            .iter()
            .find(|f| f.message.contains("Invalid type"))
            .unwrap();
        assert_eq!(mismatch.severity, Severity::Error);
        assert!(mismatch.message.contains("expected date"));
    }

    #[test]
    fn test_schema_table_loads_present_files_only() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("schemas")).unwrap();
        std::fs::write(
            dir.path().join("schemas/pattern.json"),
            r#"{"fields": {"title": {"type": "string"}}}"#,
        )
        .unwrap();

        let table = SchemaTable::load(dir.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get(DocKind::Pattern).is_some());
        assert!(table.get(DocKind::Vendor).is_none());
    }

    #[test]
    fn test_schema_table_absent_directory_is_fine() {
        let dir = TempDir::new().unwrap();
        let table = SchemaTable::load(dir.path()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_schema_table_malformed_file_is_engine_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("schemas")).unwrap();
        std::fs::write(dir.path().join("schemas/pattern.json"), "not json").unwrap();

        match SchemaTable::load(dir.path()) {
            Err(ValidationError::SchemaFile { path, .. }) => {
                assert!(path.ends_with("schemas/pattern.json"));
            }
            other => panic!("expected SchemaFile error, got {other:?}"),
        }
    }
}
