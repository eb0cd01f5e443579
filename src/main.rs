use std::process::ExitCode;

use anyhow::Context;

use validate_docs::cli::{Cli, Config};
use validate_docs::error::ValidationError;
use validate_docs::output::Output;
use validate_docs::validator::{ValidationConfig, ValidationEngine};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    if let Err(message) = cli.validate() {
        eprintln!("Error: {message}");
        return ExitCode::from(2);
    }

    let config = Config::from_cli(&cli);
    match run(&config).await {
        Ok(exit) => exit,
        Err(e) => {
            // An engine failure (not a content problem) always aborts nonzero.
            eprintln!("Validation engine error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(config: &Config) -> anyhow::Result<ExitCode> {
    let engine = ValidationEngine::new(ValidationConfig {
        root: config.root.clone(),
        strict: config.strict,
        new_docs: config.new_docs.clone(),
        max_concurrent_validations: config.threads,
    })
    .context("failed to initialize validation engine")?;

    let results = if config.files.is_empty() {
        engine.validate_corpus().await?
    } else {
        engine.validate_files(config.files.clone()).await?
    };

    let output = Output::new(config.verbosity());
    let report = output.render_report(&results);
    tokio::fs::write(&config.report_path, &report)
        .await
        .map_err(|e| ValidationError::ReportWrite {
            path: config.report_path.clone(),
            details: e.to_string(),
        })
        .context("failed to write report artifact")?;

    print!("{}", output.format_results(&results));

    if config.strict && results.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
