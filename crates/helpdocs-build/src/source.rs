//! Page source preparation ahead of directive expansion.
//!
//! Pages may open with a `<%= @title %>` placeholder and link to each other
//! with `[[file]]` or `[[file#fragment]]`, naming the target by its
//! configured `file`.

use std::collections::HashSet;
use std::sync::LazyLock;

use helpdocs_config::PageConfig;
use regex::{Captures, Regex};

static TITLE_PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<%=\s*@title\s*%>").unwrap());

static WIKI_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]#]+)(#[^\[\]]*)?\]\]").unwrap());

/// Replace every title placeholder with `title`.
///
/// # Example
///
/// ```
/// use helpdocs_build::fill_title;
///
/// assert_eq!(fill_title("# <%= @title %>\n", "Syncing"), "# Syncing\n");
/// ```
#[must_use]
pub fn fill_title(text: &str, title: &str) -> String {
    TITLE_PLACEHOLDER_RE
        .replace_all(text, regex::NoExpand(title))
        .into_owned()
}

/// Title used for a page in the compiled print document.
///
/// Carries an explicit anchor built from the file name (underscores removed,
/// lower-cased) so links to the page resolve inside one document.
#[must_use]
pub fn print_title(page: &PageConfig) -> String {
    let anchor = page.file.replace('_', "").to_lowercase();
    format!("{} [{anchor}]", page.title)
}

/// Resolves wiki links against the configured pages.
#[derive(Debug)]
pub struct WikiLinks {
    files: HashSet<String>,
}

impl WikiLinks {
    #[must_use]
    pub fn new(pages: &[PageConfig]) -> Self {
        Self {
            files: pages.iter().map(|page| page.file.clone()).collect(),
        }
    }

    /// Rewrite `[[file#fragment]]` to `file.html#fragment`.
    ///
    /// Links naming no configured page are left as written and their names
    /// pushed to `unknown`.
    ///
    /// # Example
    ///
    /// ```
    /// use helpdocs_build::WikiLinks;
    /// use helpdocs_config::PageConfig;
    ///
    /// let pages = vec![PageConfig {
    ///     title: "Syncing".to_owned(),
    ///     file: "sync".to_owned(),
    ///     keywords: Vec::new(),
    ///     print_exclude: false,
    /// }];
    /// let mut unknown = Vec::new();
    /// let text = WikiLinks::new(&pages).resolve("[Setup]([[sync#setup]]) [[gone]]", &mut unknown);
    /// assert_eq!(text, "[Setup](sync.html#setup) [[gone]]");
    /// assert_eq!(unknown, ["gone"]);
    /// ```
    pub fn resolve(&self, text: &str, unknown: &mut Vec<String>) -> String {
        WIKI_LINK_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let file = caps[1].trim();
                if !self.files.contains(file) {
                    unknown.push(file.to_owned());
                    return caps[0].to_owned();
                }
                let fragment = caps.get(2).map_or("", |m| m.as_str());
                format!("{file}.html{fragment}")
            })
            .into_owned()
    }
}
