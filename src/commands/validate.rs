use anyhow::{Context, Result};
use clap::Args;
use geofeed_validate::geofeed::{DEFAULT_SUPERNET, Supernet};
use geofeed_validate::validation::GeofeedValidator;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Arguments for validating geofeed files.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Geofeed CSV files to validate (typically the files changed in this change set).
    /// Pass them after `--` when a path may start with `-`
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Network that every geofeed prefix must fall inside
    #[arg(long, env = "GEOFEED_SUPERNET", default_value = DEFAULT_SUPERNET)]
    pub supernet: String,
}

pub fn validate_command(args: ValidateArgs) -> Result<ExitCode> {
    let supernet: Supernet = args
        .supernet
        .parse()
        .with_context(|| format!("Invalid supernet '{}'", args.supernet))?;

    if args.files.is_empty() {
        println!("No relevant .csv files changed. Skipping.");
        return Ok(ExitCode::SUCCESS);
    }

    info!("Validating {} file(s) against {supernet}", args.files.len());
    let validator = GeofeedValidator::new(supernet);
    let summary = validator.validate_files(&args.files, |report| {
        println!("--- Validating file: {} ---", report.path.display());
        for diagnostic in &report.diagnostics {
            println!("{diagnostic}");
        }
    });

    info!(
        "Checked {} file(s), {} failure(s)",
        summary.files.len(),
        summary.failure_count()
    );

    if summary.failed() {
        println!("\nValidation FAILED. See errors above.");
        Ok(ExitCode::FAILURE)
    } else {
        println!("\nAll changed geofeed files validated SUCCESSFULLY.");
        Ok(ExitCode::SUCCESS)
    }
}
