//! # validate-docs Library
//!
//! An async Rust library for validating a markdown knowledge-base corpus
//! against per-kind content contracts: frontmatter schemas, required sections,
//! internal link integrity, and word-count budgets.

pub mod classifier;
pub mod cli;
pub mod document;
pub mod error;
pub mod file_discovery;
pub mod length;
pub mod links;
pub mod output;
pub mod rules;
pub mod schema;
pub mod sections;
pub mod validator;

pub use classifier::{DocKind, classify};
pub use cli::{Cli, Config, VerbosityLevel};
pub use document::{MetaValue, Metadata, ParsedDocument, parse_document};
pub use error::ValidationError;
pub use file_discovery::FileDiscovery;
pub use output::{Finding, Output, Severity};
pub use rules::{NamingRule, RuleSet, rule_set_for};
pub use schema::{DocSchema, FieldSpec, FieldType, SchemaTable};
pub use validator::{
    CheckContext, CorpusResults, DocumentResult, DocumentStatus, ValidationConfig,
    ValidationEngine,
};
