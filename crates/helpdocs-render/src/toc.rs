//! Table of contents generation.
//!
//! Builds a nested markdown list of a page's headings wrapped in a
//! `<nav id="sectiontoc">` element. Pages with only a few headings get no
//! TOC unless one is explicitly requested.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::anchor::scan_headings;

/// Marker identifying an already-inserted TOC.
pub(crate) const TOC_NAV_OPEN: &str =
    r#"<nav id="sectiontoc" aria-label="Page contents" class="uk-width-full">"#;

/// Number of headings a page must exceed before it gets an implicit TOC.
const MIN_IMPLICIT_ENTRIES: usize = 3;

/// Heading level range requested by a TOC marker (`{{toc 2}}`, `{{toc 2,3}}`).
///
/// Only `min` is scanned. `max` is parsed and kept for callers that want it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TocLevel {
    pub min: u8,
    pub max: u8,
}

impl Default for TocLevel {
    fn default() -> Self {
        Self { min: 2, max: 2 }
    }
}

/// Error returned for a malformed TOC level range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid TOC level `{0}` (expected `min` or `min,max` with 1 <= min <= max <= 6)")]
pub struct ParseTocLevelError(String);

impl FromStr for TocLevel {
    type Err = ParseTocLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTocLevelError(s.to_owned());
        let (min, max) = match s.trim().split_once(',') {
            Some((min, max)) => (min.trim(), Some(max.trim())),
            None => (s.trim(), None),
        };
        let min: u8 = min.parse().map_err(|_| invalid())?;
        let max: u8 = match max {
            Some(max) => max.parse().map_err(|_| invalid())?,
            None => min,
        };
        if !(1..=6).contains(&min) || !(min..=6).contains(&max) {
            return Err(invalid());
        }
        Ok(Self { min, max })
    }
}

/// One line of the table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub anchor: String,
    /// Nesting depth relative to the scanned level.
    pub indent: usize,
}

/// Collect TOC entries for headings at `level.min`, in document order.
#[must_use]
pub fn toc_entries(text: &str, level: TocLevel) -> Vec<TocEntry> {
    scan_headings(text)
        .into_iter()
        .filter(|scanned| scanned.heading.level == level.min)
        .map(|scanned| TocEntry {
            indent: usize::from(scanned.heading.level - level.min),
            title: scanned.heading.title,
            anchor: scanned.anchor,
        })
        .collect()
}

/// Render a table of contents for `text`.
///
/// Returns an empty string when the page has three or fewer matching
/// headings, unless `force` is set.
///
/// # Example
///
/// ```
/// use helpdocs_render::{TocLevel, table_of_contents};
///
/// let text = "## One\n## Two\n## Three\n## Four [four]\n";
/// let toc = table_of_contents(text, TocLevel::default(), false);
/// assert!(toc.contains("* [Four](#four)"));
/// assert_eq!(table_of_contents("## Only\n", TocLevel::default(), false), "");
/// ```
#[must_use]
pub fn table_of_contents(text: &str, level: TocLevel, force: bool) -> String {
    let entries = toc_entries(text, level);
    if entries.len() <= MIN_IMPLICIT_ENTRIES && !force {
        return String::new();
    }

    let mut items = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            items.push('\n');
        }
        let tabs = "\t".repeat(entry.indent);
        let _ = write!(items, "{tabs}* [{}](#{})", entry.title, entry.anchor);
    }

    format!("\n{TOC_NAV_OPEN}\n\n{items}\n\n</nav>\n\n")
}
