//! Configuration management for helpdocs.
//!
//! Parses `helpdocs.toml` with serde and discovers the file in the current
//! directory or its parents. CLI settings can be applied during load via
//! [`CliSettings`]; they win over values from the file.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `project.title`, `project.version`
//! - `docs.source_dir`, `docs.output_dir`
//! - `converter.command`, `print.command`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the keyword frequency floor.
    pub min_stem_count: Option<usize>,
    /// Override whether the full keyword index page is written.
    pub full_index: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "helpdocs.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    /// Documentation paths as relative strings from TOML.
    docs: DocsConfigRaw,
    /// External markdown converter. Built-in conversion when unset.
    pub converter: CommandConfig,
    /// Command run in the print output directory after `compiled.md` is written.
    pub print: CommandConfig,
    pub search: SearchConfig,
    /// Pages in build order.
    pub pages: Vec<PageConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Project metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project title. Output directories are named after it.
    pub title: String,
    pub version: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            title: "Help".to_owned(),
            version: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding the page markdown files.
    pub source_dir: PathBuf,
    /// Directory the per-target output folders are created in.
    pub output_dir: PathBuf,
}

/// An external command, given as program followed by arguments.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CommandConfig {
    pub command: Option<Vec<String>>,
}

/// Search index settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum occurrences for a stem to become a page keyword.
    /// The index builder's default applies when unset.
    pub min_stem_count: Option<usize>,
    /// Whether to write the flat keyword index page.
    pub full_index: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_stem_count: None,
            full_index: true,
        }
    }
}

/// One page of the documentation set.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PageConfig {
    pub title: String,
    /// File stem: `<file>.md` in the source directory, `<file>.html` in output.
    pub file: String,
    /// Manual search keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Leave the page out of the compiled print document.
    #[serde(default)]
    pub print_exclude: bool,
}

impl PageConfig {
    #[must_use]
    pub fn source_name(&self) -> String {
        format!("{}.md", self.file)
    }

    #[must_use]
    pub fn html_name(&self) -> String {
        format!("{}.html", self.file)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`project.title`").
        field: String,
        /// Error message (e.g., "${`HELP_TITLE`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `helpdocs.toml` in the current directory and
    /// parents, falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(min_stem_count) = settings.min_stem_count {
            self.search.min_stem_count = Some(min_stem_count);
        }
        if let Some(full_index) = settings.full_index {
            self.search.full_index = full_index;
        }
    }

    /// Output directory for web pages: `<output>/<title>.web`.
    #[must_use]
    pub fn web_dir(&self) -> PathBuf {
        self.target_dir("web")
    }

    /// Output directory for embedded help: `<output>/<title>.help`.
    #[must_use]
    pub fn help_dir(&self) -> PathBuf {
        self.target_dir("help")
    }

    /// Output directory for the print document: `<output>/<title>.pdf`.
    #[must_use]
    pub fn print_dir(&self) -> PathBuf {
        self.target_dir("pdf")
    }

    fn target_dir(&self, suffix: &str) -> PathBuf {
        self.docs_resolved
            .output_dir
            .join(format!("{}.{suffix}", self.project.title))
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            project: ProjectConfig::default(),
            docs: DocsConfigRaw::default(),
            converter: CommandConfig::default(),
            print: CommandConfig::default(),
            search: SearchConfig::default(),
            pages: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("content"),
                output_dir: base.join("build"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.project.title, "project.title")?;
        if self.project.title.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "project.title cannot contain path separators".to_owned(),
            ));
        }
        Self::validate_command(&self.converter, "converter.command")?;
        Self::validate_command(&self.print, "print.command")?;
        self.validate_pages()
    }

    fn validate_command(command: &CommandConfig, field: &str) -> Result<(), ConfigError> {
        match command.command.as_deref() {
            Some([]) => Err(ConfigError::Validation(format!("{field} cannot be empty"))),
            Some([program, ..]) => require_non_empty(program, field),
            None => Ok(()),
        }
    }

    fn validate_pages(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, page) in self.pages.iter().enumerate() {
            require_non_empty(&page.title, &format!("pages[{i}].title"))?;
            require_non_empty(&page.file, &format!("pages[{i}].file"))?;
            if Path::new(&page.file).is_absolute() || page.file.split(['/', '\\']).any(|c| c == "..") {
                return Err(ConfigError::Validation(format!(
                    "pages[{i}].file must be a relative path inside the source directory"
                )));
            }
            if !seen.insert(page.file.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "pages[{i}].file `{}` is listed more than once",
                    page.file
                )));
            }
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.project.title = expand::expand_env(&self.project.title, "project.title")?;
        if let Some(version) = &self.project.version {
            self.project.version = Some(expand::expand_env(version, "project.version")?);
        }

        if let Some(source_dir) = &self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(output_dir) = &self.docs.output_dir {
            self.docs.output_dir = Some(expand::expand_env(output_dir, "docs.output_dir")?);
        }

        if let Some(command) = &mut self.converter.command {
            expand::expand_all(command, "converter.command")?;
        }
        if let Some(command) = &mut self.print.command {
            expand::expand_all(command, "print.command")?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "content"),
            output_dir: resolve(self.docs.output_dir.as_deref(), "build"),
        };
    }
}
