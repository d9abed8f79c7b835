//! Compilation of all pages into one markdown document for print.

use std::path::PathBuf;
use std::sync::LazyLock;

use helpdocs_config::Config;
use helpdocs_render::{RenderTarget, expand, symbolify};
use regex::Regex;

use crate::builder::{load_page, prepare_output_dir, write_file};
use crate::command::run_in;
use crate::links::{CompilationContext, fix_local_links};
use crate::progress::{Progress, ProgressFn};
use crate::source::{WikiLinks, print_title};
use crate::BuildError;

/// Compiled document written to the print directory.
pub const COMPILED_FILE: &str = "compiled.md";

static RETINA_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@2x(\.(?:png|jpe?g|gif))").unwrap());

/// Result of a print compilation.
#[derive(Debug)]
pub struct PrintOutput {
    pub compiled: PathBuf,
    /// Pages included in the compiled document.
    pub pages: usize,
    /// Pages left out via `print_exclude`.
    pub excluded: usize,
    pub ran_command: bool,
    /// Unknown wiki link targets, prefixed with the page title.
    pub warnings: Vec<String>,
}

/// Compiles the configured pages into `<title>.pdf/compiled.md`.
pub struct PrintCompiler<'a> {
    config: &'a Config,
    progress: Option<Box<ProgressFn<'a>>>,
}

impl<'a> PrintCompiler<'a> {
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Report each page and output stage to `progress`.
    #[must_use]
    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: Fn(Progress<'_>) + 'a,
    {
        self.progress = Some(Box::new(progress));
        self
    }

    fn report(&self, event: Progress<'_>) {
        if let Some(progress) = &self.progress {
            progress(event);
        }
    }

    /// Build the compiled document in memory.
    pub fn compile(&self) -> Result<String, BuildError> {
        self.compile_with_warnings().map(|(document, _)| document)
    }

    fn compile_with_warnings(&self) -> Result<(String, Vec<String>), BuildError> {
        let mut context = CompilationContext::new();
        let wiki = WikiLinks::new(&self.config.pages);
        let mut warnings = Vec::new();
        let mut pages = Vec::new();

        let included: Vec<_> = self
            .config
            .pages
            .iter()
            .filter(|page| !page.print_exclude)
            .collect();
        for (i, page) in included.iter().enumerate() {
            tracing::info!(page = %page.title, "Compiling page for print");
            self.report(Progress::Page {
                position: i + 1,
                total: included.len(),
                title: &page.title,
            });
            let text = load_page(
                &self.config.docs_resolved.source_dir,
                page,
                &print_title(page),
                &wiki,
                &mut warnings,
            )?;
            pages.push(print_page(&text, &mut context));
        }

        tracing::debug!(links = context.len(), "Link references defined");
        Ok((finish_document(&pages.join("\n\n")), warnings))
    }

    /// Write the compiled document and run the print command, if configured.
    pub fn write(&self, run_command: bool) -> Result<PrintOutput, BuildError> {
        let dir = self.config.print_dir();
        prepare_output_dir(&dir)?;

        let compiled = dir.join(COMPILED_FILE);
        let (document, warnings) = self.compile_with_warnings()?;
        write_file(&compiled, &document)?;
        tracing::info!(path = %compiled.display(), "Compiled print document");
        self.report(Progress::Compiled { path: &compiled });

        let command = self
            .config
            .print
            .command
            .as_deref()
            .filter(|_| run_command);
        if let Some(command) = command {
            if let Some(program) = command.first() {
                self.report(Progress::PrintCommand {
                    program: program.as_str(),
                });
            }
            run_in(command, &dir)?;
        }

        let excluded = self.config.pages.iter().filter(|p| p.print_exclude).count();
        Ok(PrintOutput {
            compiled,
            pages: self.config.pages.len() - excluded,
            excluded,
            ran_command: command.is_some(),
            warnings,
        })
    }
}

/// Prepare one page's source for the compiled document.
///
/// Expands directives for print, drops `@2x` image suffixes, reduces local
/// fragment links to the bare fragment and moves links into uniquely named
/// references.
pub fn print_page(text: &str, context: &mut CompilationContext) -> String {
    let expanded = expand(text, RenderTarget::Print);
    let expanded = RETINA_IMAGE_RE.replace_all(&expanded, "$1");
    context.convert_links(&fix_local_links(&expanded))
}

/// Final pass over the joined pages.
///
/// Numeric key entities become their characters (code spans do not decode
/// entities) and menu separators are wrapped in code spans so they render
/// with a font that has the glyph.
#[must_use]
pub fn finish_document(text: &str) -> String {
    let mut out = symbolify(text).replace('▸', "`▸`");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
