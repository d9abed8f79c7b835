//! `helpdocs expand` command implementation.
//!
//! Expands a single file for one target and writes the markdown to stdout,
//! for checking directive output without a full build.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::Term;
use helpdocs_render::directive::DirectiveProcessor;
use helpdocs_render::{RenderTarget, strip_author_notes};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the expand command.
#[derive(Args)]
pub(crate) struct ExpandArgs {
    /// Markdown file to expand (`-` reads stdin).
    file: PathBuf,

    /// Render target: web, embedded (help) or print (pdf).
    #[arg(short, long, default_value = "web")]
    pub(crate) target: RenderTarget,

    /// Also remove TODO/FIXME lines and trailing notes sections.
    #[arg(long)]
    strip_notes: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExpandArgs {
    /// Execute the expand command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let text = if self.file.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        } else {
            std::fs::read_to_string(&self.file)?
        };

        let text = if self.strip_notes {
            strip_author_notes(&text)
        } else {
            text
        };

        tracing::debug!(file = %self.file.display(), target = %self.target, "Expanding file");
        let mut processor = DirectiveProcessor::new(self.target);
        let expanded = processor.process(&text);

        Output::new().warnings(processor.warnings());

        Term::stdout().write_str(&expanded)?;
        Ok(())
    }
}
