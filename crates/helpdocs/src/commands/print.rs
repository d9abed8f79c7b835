//! `helpdocs print` command implementation.

use std::path::PathBuf;

use clap::Args;
use helpdocs_build::PrintCompiler;
use helpdocs_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the print command.
#[derive(Args)]
pub(crate) struct PrintArgs {
    /// Path to configuration file (default: auto-discover helpdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only write compiled.md; do not run the configured print command.
    #[arg(long)]
    no_command: bool,

    /// Enable verbose output (per-page logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl PrintArgs {
    /// Execute the print command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a page cannot be read, or the
    /// print command fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");

        output.highlight(&format!("Compiling {} for print", config.project.title));
        let result = PrintCompiler::new(&config)
            .with_progress(|event| output.progress(event))
            .write(!self.no_command)?;

        output.warnings(&result.warnings);
        if result.excluded > 0 {
            output.info(&format!("Skipped {} excluded pages", result.excluded));
        }
        if result.ran_command {
            output.info("Print command finished");
        } else if config.print.command.is_none() {
            output.info("No print command configured");
        }
        output.success(&format!(
            "Compiled {} pages to {}",
            result.pages,
            result.compiled.display()
        ));
        Ok(())
    }
}
