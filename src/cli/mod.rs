//! Command line interface for the bundle builder.
//!
//! This module provides argument parsing, config file merging, pipeline
//! execution and the final summary.

mod args;
mod config;
mod output;

pub use args::{Args, RuntimeConfig};
pub use config::ConfigFile;
pub use output::OutputManager;

use crate::bundler::{Bundler, CentralBundle};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    execute(Args::parse_args()).await
}

/// Runs the bundler for already-parsed arguments.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let settings = args.to_settings(config)?;
    let runtime_config = RuntimeConfig::from(&args);

    let bundle = Bundler::new(settings)?.bundle().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print_summary(&bundle, &runtime_config)?;
    }

    Ok(0)
}

fn print_summary(bundle: &CentralBundle, runtime_config: &RuntimeConfig) -> std::io::Result<()> {
    runtime_config.section(&format!("Bundled {}", bundle.coordinate))?;
    for artifact in &bundle.artifacts {
        let name = artifact
            .path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy();
        let signed = if artifact.signature.is_some() {
            "signed"
        } else {
            "unsigned"
        };
        runtime_config.indent(&format!(
            "{name} ({signed}, {} checksums)",
            artifact.checksums.len()
        ))?;
    }
    if !bundle.pruned.is_empty() {
        runtime_config.indent(&format!("Removed {} metadata file(s)", bundle.pruned.len()))?;
    }
    runtime_config.success(&format!("Created bundle: {}", bundle.archive_path.display()))
}
