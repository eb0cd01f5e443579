use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show critical errors
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show detailed information
    Verbose,
    /// Show all available debugging information
    Debug,
}

/// Main application configuration derived from CLI
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub new_docs: HashSet<PathBuf>,
    pub report_path: PathBuf,
    pub threads: usize,
    pub verbose: bool,
    pub quiet: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            root: cli.root.clone(),
            files: cli.files.clone(),
            strict: cli.is_strict(),
            new_docs: cli.new_docs.iter().cloned().collect(),
            report_path: cli.report.clone(),
            threads: cli.get_thread_count(),
            verbose: cli.verbose,
            quiet: cli.quiet,
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Markdown corpus validation tool
#[derive(Parser, Debug, Clone)]
#[command(name = "validate-docs")]
#[command(about = "Validate a markdown knowledge-base corpus against per-kind content contracts")]
#[command(version)]
pub struct Cli {
    /// Explicit files to validate; omit to validate the whole corpus
    #[arg(help = "Document paths to validate (default: whole corpus)")]
    pub files: Vec<PathBuf>,

    /// Corpus root directory
    #[arg(short = 'r', long = "root", default_value = ".")]
    pub root: PathBuf,

    /// Strict (CI) mode: contract violations fail the run
    #[arg(long = "strict", help = "Treat errors as blocking and exit nonzero")]
    pub strict: bool,

    /// Newly introduced documents (git-diff-derived), held to the full
    /// required-section contract under strict mode
    #[arg(long = "new", action = clap::ArgAction::Append)]
    pub new_docs: Vec<PathBuf>,

    /// Report artifact path, overwritten each run
    #[arg(long = "report", default_value = "validation-report.md")]
    pub report: PathBuf,

    /// Number of concurrent document validations
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Strict mode comes from the flag or the `CI_MODE=strict` environment
    /// switch used by the CI workflow.
    pub fn is_strict(&self) -> bool {
        self.strict || std::env::var("CI_MODE").is_ok_and(|v| v == "strict")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() && !self.root.exists() {
            return Err(format!(
                "Corpus root does not exist: {}",
                self.root.display()
            ));
        }
        if let Some(threads) = self.threads
            && threads == 0
        {
            return Err("Number of threads must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn get_thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }
}
