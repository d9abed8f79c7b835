//! `helpdocs build` command implementation.

use std::path::PathBuf;

use clap::Args;
use helpdocs_build::SiteBuilder;
use helpdocs_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover helpdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Minimum occurrences for a stem to become a keyword (overrides config).
    #[arg(long)]
    min_stem_count: Option<usize>,

    /// Skip the flat keyword index page.
    #[arg(long)]
    no_full_index: bool,

    /// Enable verbose output (per-page logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page fails to build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            min_stem_count: self.min_stem_count,
            full_index: self.no_full_index.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");

        if config.pages.is_empty() {
            output.warning("No pages configured; only the search index will be written");
        }
        output.step(
            "Building",
            &format!(
                "{} ({} pages from {})",
                config.project.title,
                config.pages.len(),
                config.docs_resolved.source_dir.display()
            ),
        );

        let summary = SiteBuilder::new(&config)
            .with_progress(|event| output.progress(event))
            .build()?;

        output.warnings(&summary.warnings);
        output.info(&format!("Web pages: {}", summary.web_dir.display()));
        output.info(&format!("Embedded help: {}", summary.help_dir.display()));
        output.success(&format!(
            "Built {} pages, {} keywords indexed",
            summary.pages, summary.keywords
        ));
        Ok(())
    }
}
