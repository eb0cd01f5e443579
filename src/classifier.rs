//! Document classification by corpus location.
//!
//! Classification is purely structural: the containing directory decides the
//! kind, and a small set of housekeeping file names is always skipped. This is
//! a total function over paths and never fails.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// File names excluded from validation regardless of directory.
pub const EXCLUDED_FILES: &[&str] = &["_template.md", "README.md", "CHANGELOG.md", "GLOSSARY.md"];

/// The five content document kinds in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocKind {
    Pattern,
    Vendor,
    UseCase,
    Approach,
    Jurisdiction,
}

impl DocKind {
    /// All kinds, in corpus directory order.
    pub const ALL: [DocKind; 5] = [
        DocKind::Pattern,
        DocKind::Vendor,
        DocKind::UseCase,
        DocKind::Approach,
        DocKind::Jurisdiction,
    ];

    /// The corpus directory holding documents of this kind.
    pub fn directory(&self) -> &'static str {
        match self {
            DocKind::Pattern => "patterns",
            DocKind::Vendor => "vendors",
            DocKind::UseCase => "use-cases",
            DocKind::Approach => "approaches",
            DocKind::Jurisdiction => "jurisdictions",
        }
    }

    /// Stable display name used in reports and schema file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Pattern => "pattern",
            DocKind::Vendor => "vendor",
            DocKind::UseCase => "use-case",
            DocKind::Approach => "approach",
            DocKind::Jurisdiction => "jurisdiction",
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a file path into a document kind, or `None` for files the engine
/// does not validate (templates, READMEs, anything outside the content
/// directories).
pub fn classify(path: &Path) -> Option<DocKind> {
    let file_name = path.file_name()?.to_str()?;

    if EXCLUDED_FILES.contains(&file_name) {
        return None;
    }
    if !file_name.ends_with(".md") {
        return None;
    }

    // Walk the ancestors so nested layouts (e.g. patterns/settlement/x.md)
    // still classify by the nearest known content directory.
    for component in path.components().rev().skip(1) {
        let Some(dir) = component.as_os_str().to_str() else {
            continue;
        };
        for kind in DocKind::ALL {
            if dir == kind.directory() {
                return Some(kind);
            }
        }
    }

    None
}
