//! Findings vocabulary and report rendering.
//!
//! The rendered report is stable: documents are grouped and ordered by path,
//! errors before warnings, so two runs over an unchanged corpus produce
//! byte-identical artifacts. The same text is written to the report file and
//! echoed to the console; color is applied only to the console status line.

use atty;

use crate::cli::VerbosityLevel;
use crate::validator::CorpusResults;

/// Severity of a single validation outcome. Errors block in strict mode;
/// warnings never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// One validation outcome, attributed to its document by the surrounding
/// `DocumentResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Report renderer and console formatter.
pub struct Output {
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{color}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    /// Render the full report as written to the artifact file. Plain text,
    /// no terminal escapes.
    pub fn render_report(&self, results: &CorpusResults) -> String {
        let mut report = String::new();
        report.push_str("### Corpus Validation Report\n\n");

        if results.error_count == 0 && results.warning_count == 0 {
            report.push_str("✅ All documents pass validation!\n");
        } else {
            if results.error_count > 0 {
                report.push_str(&format!("#### Errors ({})\n", results.error_count));
                for doc in &results.documents {
                    let errors: Vec<_> =
                        doc.findings.iter().filter(|f| f.is_error()).collect();
                    if errors.is_empty() {
                        continue;
                    }
                    report.push_str(&format!("\n❌ {}:\n", doc.path.display()));
                    for finding in errors {
                        report.push_str(&format!("  {}\n", finding.message));
                    }
                }
                report.push('\n');
            }

            if results.warning_count > 0 {
                report.push_str(&format!("#### Warnings ({})\n", results.warning_count));
                for doc in &results.documents {
                    let warnings: Vec<_> =
                        doc.findings.iter().filter(|f| !f.is_error()).collect();
                    if warnings.is_empty() {
                        continue;
                    }
                    report.push_str(&format!("\n⚠️  {}:\n", doc.path.display()));
                    for finding in warnings {
                        report.push_str(&format!("  {}\n", finding.message));
                    }
                }
                report.push('\n');
            }
        }

        report.push_str("\nSummary:\n");
        report.push_str(&format!("  Files scanned: {}\n", results.total_files));
        report.push_str(&format!(
            "  Files with errors: {}\n",
            results.files_with_errors
        ));
        report.push_str(&format!(
            "  Files with warnings: {}\n",
            results.files_with_warnings
        ));
        report.push_str(&format!("  Files skipped: {}\n", results.skipped_files));

        report
    }

    /// Format console output according to the configured verbosity.
    pub fn format_results(&self, results: &CorpusResults) -> String {
        match self.verbosity {
            VerbosityLevel::Quiet => {
                if results.error_count > 0 {
                    format!(
                        "Errors: {} in {} file(s)\n",
                        results.error_count, results.files_with_errors
                    )
                } else {
                    String::new()
                }
            }
            VerbosityLevel::Normal | VerbosityLevel::Verbose | VerbosityLevel::Debug => {
                let mut output = self.render_report(results);
                if results.error_count > 0 {
                    output.push_str(&format!(
                        "\n{}\n",
                        self.colorize("Validation failed", "31")
                    ));
                } else if results.warning_count > 0 {
                    output.push_str(&format!(
                        "\n{}\n",
                        self.colorize("Validation passed with warnings", "33")
                    ));
                } else {
                    output.push_str(&format!("\n{}\n", self.colorize("Validation passed", "32")));
                }
                output
            }
        }
    }
}
