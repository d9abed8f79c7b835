//! Page build loop for the web and embedded help targets.

use std::fs;
use std::path::{Path, PathBuf};

use helpdocs_config::{Config, PageConfig};
use helpdocs_render::directive::DirectiveProcessor;
use helpdocs_render::{CmarkConverter, MarkdownConverter, RenderTarget, strip_author_notes};
use helpdocs_search::{DEFAULT_MIN_STEM_COUNT, PageInput, SearchIndex};

use crate::command::CommandConverter;
use crate::progress::{Progress, ProgressFn};
use crate::source::{WikiLinks, fill_title};
use crate::template::{PageShell, render_page};
use crate::BuildError;

/// Search index file written to the embedded help directory.
pub const SEARCH_INDEX_FILE: &str = "search.json";

/// Flat keyword listing written next to the pages.
pub const FULL_INDEX_FILE: &str = "contents.html";

/// Result of a site build.
#[derive(Debug)]
pub struct BuildSummary {
    pub pages: usize,
    pub web_dir: PathBuf,
    pub help_dir: PathBuf,
    /// Total keywords across indexed pages.
    pub keywords: usize,
    /// Directive warnings, prefixed with the page title.
    pub warnings: Vec<String>,
}

/// Builds the web and embedded help output for every configured page.
///
/// Pages are processed sequentially in configuration order. Every page feeds
/// one [`SearchIndex`], written once after the last page.
pub struct SiteBuilder<'a> {
    config: &'a Config,
    converter: Box<dyn MarkdownConverter + 'a>,
    progress: Option<Box<ProgressFn<'a>>>,
}

impl<'a> SiteBuilder<'a> {
    /// Create a builder using the converter named in the configuration, or
    /// the built-in one when none is set.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        let converter: Box<dyn MarkdownConverter> = match config
            .converter
            .command
            .as_deref()
            .and_then(CommandConverter::from_command)
        {
            Some(command) => {
                tracing::debug!(program = %command.program(), "Using external converter");
                Box::new(command)
            }
            None => Box::new(CmarkConverter::new()),
        };
        Self::with_converter(config, converter)
    }

    /// Create a builder with an explicit converter.
    #[must_use]
    pub fn with_converter(config: &'a Config, converter: Box<dyn MarkdownConverter + 'a>) -> Self {
        Self {
            config,
            converter,
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

    /// Build every page for both targets and write the search outputs.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        let web_dir = self.config.web_dir();
        let help_dir = self.config.help_dir();
        prepare_output_dir(&web_dir)?;
        prepare_output_dir(&help_dir)?;

        let min_stem_count = self
            .config
            .search
            .min_stem_count
            .unwrap_or(DEFAULT_MIN_STEM_COUNT);
        let mut index = SearchIndex::new().with_min_stem_count(min_stem_count);
        let mut warnings = Vec::new();
        let wiki = WikiLinks::new(&self.config.pages);

        let total = self.config.pages.len();
        for (i, page) in self.config.pages.iter().enumerate() {
            tracing::info!(page = %page.title, file = %page.file, "Building page");
            self.report(Progress::Page {
                position: i + 1,
                total,
                title: &page.title,
            });
            let text = load_page(
                &self.config.docs_resolved.source_dir,
                page,
                &page.title,
                &wiki,
                &mut warnings,
            )?;
            let html_name = page.html_name();

            let web = self.render(page, &text, RenderTarget::Web, &mut warnings)?;
            let help = self.render(page, &text, RenderTarget::Embedded, &mut warnings)?;
            write_file(&web_dir.join(&html_name), &web)?;
            write_file(&help_dir.join(&html_name), &help)?;

            // The embedded render carries the inline section TOC; index the web one.
            index.add_page(&PageInput {
                title: &page.title,
                location: &html_name,
                html: &web,
                keywords: &page.keywords,
            });
        }

        let index_path = help_dir.join(SEARCH_INDEX_FILE);
        write_file(&index_path, &index.to_json()?)?;
        tracing::info!(pages = index.pages().len(), "Wrote search index");
        self.report(Progress::SearchIndex {
            path: &index_path,
            pages: index.pages().len(),
        });

        if self.config.search.full_index {
            let listing = index.render_full_index();
            for (target, dir) in [
                (RenderTarget::Web, &web_dir),
                (RenderTarget::Embedded, &help_dir),
            ] {
                let html = render_page(&PageShell {
                    title: "Index",
                    project: &self.config.project.title,
                    target,
                    body: &listing,
                });
                write_file(&dir.join(FULL_INDEX_FILE), &html)?;
            }
            self.report(Progress::FullIndex {
                entries: index.full_index().len(),
            });
        }

        Ok(BuildSummary {
            pages: self.config.pages.len(),
            web_dir,
            help_dir,
            keywords: index.pages().iter().map(|doc| doc.keywords.len()).sum(),
            warnings,
        })
    }

    /// Expand, convert and wrap one page for `target`.
    fn render(
        &self,
        page: &PageConfig,
        text: &str,
        target: RenderTarget,
        warnings: &mut Vec<String>,
    ) -> Result<String, BuildError> {
        let mut processor = DirectiveProcessor::new(target);
        let markdown = processor.process(text);
        if target == RenderTarget::Embedded {
            for warning in processor.warnings() {
                tracing::warn!(page = %page.title, "{warning}");
                warnings.push(format!("{}: {warning}", page.title));
            }
        }

        let body = self.converter.convert(&markdown)?;
        Ok(render_page(&PageShell {
            title: &page.title,
            project: &self.config.project.title,
            target,
            body: &body,
        }))
    }
}

/// Read a page's markdown source with author notes removed.
fn read_page(source_dir: &Path, page: &PageConfig) -> Result<String, BuildError> {
    let path = source_dir.join(page.source_name());
    let raw = fs::read_to_string(&path).map_err(|source| BuildError::ReadPage { path, source })?;
    Ok(strip_author_notes(&raw))
}

/// Read a page and fill in `title` and wiki links. Unknown wiki link targets
/// become warnings.
pub(crate) fn load_page(
    source_dir: &Path,
    page: &PageConfig,
    title: &str,
    wiki: &WikiLinks,
    warnings: &mut Vec<String>,
) -> Result<String, BuildError> {
    let text = fill_title(&read_page(source_dir, page)?, title);
    let mut unknown = Vec::new();
    let text = wiki.resolve(&text, &mut unknown);
    for file in unknown {
        tracing::warn!(page = %page.title, file = %file, "Wiki link to unknown page");
        warnings.push(format!("{}: wiki link to unknown page `{file}`", page.title));
    }
    Ok(text)
}

/// Create `dir` if missing; fail if the path is taken by something else.
pub(crate) fn prepare_output_dir(dir: &Path) -> Result<(), BuildError> {
    if dir.exists() && !dir.is_dir() {
        return Err(BuildError::NotADirectory(dir.to_path_buf()));
    }
    fs::create_dir_all(dir).map_err(BuildError::io(dir))
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<(), BuildError> {
    tracing::debug!(path = %path.display(), "Writing");
    fs::write(path, content).map_err(BuildError::io(path))
}
