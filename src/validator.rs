//! Validation orchestrator.
//!
//! Drives the per-document pipeline: classify, load, then run the schema,
//! naming, section, link, and length checks for the classified kind. Each
//! document is independent; documents fan out across semaphore-bounded tokio
//! tasks and results are joined and sorted by path before aggregation, so the
//! final report does not depend on completion order.

use futures::future::try_join_all;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classifier::{DocKind, classify};
use crate::document::parse_document;
use crate::error::{Result, ValidationError};
use crate::file_discovery::FileDiscovery;
use crate::length::check_length;
use crate::links::check_links;
use crate::output::{Finding, Severity};
use crate::rules::rule_set_for;
use crate::schema::{SchemaTable, check_metadata};
use crate::sections::check_sections;

/// Validation configuration
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Corpus root directory
    pub root: PathBuf,
    /// Strict (CI) mode: contract violations become blocking
    pub strict: bool,
    /// Paths of newly introduced documents, exempt from the grandfather rule
    pub new_docs: HashSet<PathBuf>,
    /// Number of concurrent document validations
    pub max_concurrent_validations: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            strict: false,
            new_docs: HashSet::new(),
            max_concurrent_validations: num_cpus::get(),
        }
    }
}

/// Run-wide read-only state shared by every document's check sequence.
#[derive(Debug)]
pub struct CheckContext {
    pub strict: bool,
    pub new_docs: HashSet<PathBuf>,
    pub schemas: SchemaTable,
}

impl CheckContext {
    fn is_new(&self, path: &Path) -> bool {
        self.new_docs.contains(path)
    }

    fn link_severity(&self) -> Severity {
        if self.strict {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

/// Status of a single document validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Document passed every applicable check
    Clean,
    /// Document produced findings
    Issues { errors: usize, warnings: usize },
    /// Document is not validated (template, README, unrecognized path)
    Skipped { reason: String },
}

impl DocumentStatus {
    pub fn is_clean(&self) -> bool {
        matches!(self, DocumentStatus::Clean)
    }

    pub fn has_errors(&self) -> bool {
        matches!(self, DocumentStatus::Issues { errors, .. } if *errors > 0)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, DocumentStatus::Skipped { .. })
    }
}

/// Result of validating a single document
#[derive(Debug, Clone)]
pub struct DocumentResult {
    pub path: PathBuf,
    pub kind: Option<DocKind>,
    pub status: DocumentStatus,
    pub findings: Vec<Finding>,
}

impl DocumentResult {
    pub fn from_findings(path: PathBuf, kind: Option<DocKind>, findings: Vec<Finding>) -> Self {
        let errors = findings.iter().filter(|f| f.is_error()).count();
        let warnings = findings.len() - errors;
        let status = if findings.is_empty() {
            DocumentStatus::Clean
        } else {
            DocumentStatus::Issues { errors, warnings }
        };
        Self {
            path,
            kind,
            status,
            findings,
        }
    }

    pub fn skipped(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            kind: None,
            status: DocumentStatus::Skipped {
                reason: reason.into(),
            },
            findings: Vec::new(),
        }
    }
}

/// Aggregated results of validating the corpus
#[derive(Debug, Clone)]
pub struct CorpusResults {
    pub total_files: usize,
    pub clean_files: usize,
    pub files_with_errors: usize,
    pub files_with_warnings: usize,
    pub skipped_files: usize,
    pub error_count: usize,
    pub warning_count: usize,
    /// Per-document results, ordered by path
    pub documents: Vec<DocumentResult>,
}

impl CorpusResults {
    /// Aggregate per-document results into run-level counts. Results are
    /// sorted by path so the report ordering is stable.
    pub fn aggregate(mut documents: Vec<DocumentResult>) -> Self {
        documents.sort_by(|a, b| a.path.cmp(&b.path));

        let mut clean_files = 0;
        let mut files_with_errors = 0;
        let mut files_with_warnings = 0;
        let mut skipped_files = 0;
        let mut error_count = 0;
        let mut warning_count = 0;

        for doc in &documents {
            match &doc.status {
                DocumentStatus::Clean => clean_files += 1,
                DocumentStatus::Issues { errors, warnings } => {
                    if *errors > 0 {
                        files_with_errors += 1;
                    }
                    if *warnings > 0 {
                        files_with_warnings += 1;
                    }
                    error_count += errors;
                    warning_count += warnings;
                }
                DocumentStatus::Skipped { .. } => skipped_files += 1,
            }
        }

        Self {
            total_files: documents.len() - skipped_files,
            clean_files,
            files_with_errors,
            files_with_warnings,
            skipped_files,
            error_count,
            warning_count,
            documents,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn all_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }
}

/// Corpus validation engine.
///
/// The schema table is loaded once at construction and the whole context is
/// read-only afterwards, so per-document tasks share it behind an `Arc`
/// without locking.
pub struct ValidationEngine {
    context: Arc<CheckContext>,
    config: ValidationConfig,
}

impl ValidationEngine {
    pub fn new(config: ValidationConfig) -> Result<Self> {
        let schemas = SchemaTable::load(&config.root)?;
        let context = Arc::new(CheckContext {
            strict: config.strict,
            new_docs: config.new_docs.clone(),
            schemas,
        });
        Ok(Self { context, config })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate every content document under the corpus root.
    pub async fn validate_corpus(&self) -> Result<CorpusResults> {
        let discovery = FileDiscovery::new();
        let mut files = Vec::new();

        for kind in DocKind::ALL {
            let dir = self.config.root.join(kind.directory());
            if !dir.is_dir() {
                continue;
            }
            files.extend(discovery.discover_files(&dir).await?);
        }

        self.validate_files(files).await
    }

    /// Validate an explicit list of file paths. Unrecognized paths are
    /// reported as skipped, never as errors.
    pub async fn validate_files(&self, files: Vec<PathBuf>) -> Result<CorpusResults> {
        if files.is_empty() {
            return Ok(CorpusResults::aggregate(Vec::new()));
        }

        let semaphore = Arc::new(tokio::sync::Semaphore::new(
            self.config.max_concurrent_validations,
        ));

        let validation_tasks: Vec<_> = files
            .into_iter()
            .map(|file_path| {
                let context = Arc::clone(&self.context);
                let semaphore = Arc::clone(&semaphore);

                tokio::spawn(async move {
                    let _permit = semaphore.acquire().await.map_err(|_| {
                        ValidationError::Concurrency {
                            details: "Failed to acquire validation semaphore".to_string(),
                        }
                    })?;

                    Ok::<DocumentResult, ValidationError>(
                        Self::validate_single_file_internal(file_path, context).await,
                    )
                })
            })
            .collect();

        let task_results =
            try_join_all(validation_tasks)
                .await
                .map_err(|e| ValidationError::Concurrency {
                    details: format!("Task join error: {e}"),
                })?;

        let mut documents = Vec::with_capacity(task_results.len());
        for result in task_results {
            documents.push(result?);
        }

        Ok(CorpusResults::aggregate(documents))
    }

    /// Validate a single document (public interface).
    pub async fn validate_single_file(&self, path: &Path) -> DocumentResult {
        Self::validate_single_file_internal(path.to_path_buf(), Arc::clone(&self.context)).await
    }

    async fn validate_single_file_internal(
        path: PathBuf,
        context: Arc<CheckContext>,
    ) -> DocumentResult {
        let Some(kind) = classify(&path) else {
            return DocumentResult::skipped(path, "not a content document");
        };

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                return DocumentResult::from_findings(
                    path,
                    Some(kind),
                    vec![Finding::error(format!("Unable to read file: {e}"))],
                );
            }
        };

        let doc = parse_document(&raw);
        let rules = rule_set_for(kind);
        let mut findings = Vec::new();

        if let Some(details) = &doc.metadata_error {
            findings.push(Finding::error(format!(
                "Invalid YAML frontmatter - {details}"
            )));
        }

        if let Some(naming) = &rules.naming
            && let Some(file_name) = path.file_name().and_then(|n| n.to_str())
            && let Some(message) = (naming.check)(file_name)
        {
            findings.push(Finding::new(naming.severity, message));
        }

        findings.extend(check_metadata(
            &doc.metadata,
            rules,
            context.schemas.get(kind),
        ));

        findings.extend(check_sections(
            &doc.body,
            rules,
            context.strict,
            context.is_new(&path),
        ));

        let doc_dir = path.parent().unwrap_or_else(|| Path::new("."));
        findings.extend(check_links(&doc.body, doc_dir, context.link_severity()));

        findings.extend(check_length(&doc.body, rules));

        DocumentResult::from_findings(path, Some(kind), findings)
    }
}
