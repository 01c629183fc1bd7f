use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod commands;

use commands::{ValidateArgs, validate_command};

#[derive(Parser)]
#[command(
    name = "geofeed-validate",
    about = "Validate geofeed CSV files against the allowed supernet",
    version,
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    validate: ValidateArgs,

    /// Enable verbose logging on stderr (use -vv for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    validate_command(cli.validate)
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("geofeed_validate=warn"),
        1 => EnvFilter::new("geofeed_validate=info"),
        _ => EnvFilter::new("geofeed_validate=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
