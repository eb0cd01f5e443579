use std::path::PathBuf;

use thiserror::Error;

/// Main application error type that encompasses all possible failure modes.
///
/// Content problems (missing fields, broken links, over-budget bodies) are
/// never errors at this level; those are collected as findings and reported.
/// This type covers engine failures only.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema file error: {path} - {details}")]
    SchemaFile { path: PathBuf, details: String },

    #[error("File system traversal error: {path} - {reason}")]
    FileSystemTraversal { path: PathBuf, reason: String },

    #[error("Report write error: {path} - {details}")]
    ReportWrite { path: PathBuf, details: String },

    #[error("Concurrent operation error: {details}")]
    Concurrency { details: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let io_error = ValidationError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ));
        assert!(io_error.to_string().contains("IO error"));

        let schema_error = ValidationError::SchemaFile {
            path: PathBuf::from("schemas/pattern.json"),
            details: "expected object".to_string(),
        };
        assert!(schema_error.to_string().contains("Schema file error"));
        assert!(schema_error.to_string().contains("pattern.json"));

        let config_error = ValidationError::Config("bad thread count".to_string());
        assert!(config_error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Access denied");
        let validation_error: ValidationError = io_error.into();

        match validation_error {
            ValidationError::Io(_) => (),
            _ => panic!("Expected ValidationError::Io"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let validation_error = ValidationError::Io(io_error);

        assert!(validation_error.source().is_some());
        assert_eq!(
            validation_error.source().unwrap().to_string(),
            "File not found"
        );
    }
}
