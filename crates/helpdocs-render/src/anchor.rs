//! Heading titles and anchor ids.
//!
//! A heading may carry an explicit anchor as a trailing bracketed id
//! (`## Sync options [syncopts]`). Otherwise its anchor is derived from the
//! title. Anchors are unique per page: [`Anchors`] hands out `-1`, `-2`, …
//! suffixes when two headings derive the same id.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::fence::FenceTracker;

static BRACKET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[([^\[\]]*)\]$").unwrap());

static ATX_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.*?)[ \t]*$").unwrap());

/// A markdown heading with its cleaned title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Title with `#` decoration and any bracketed id removed.
    pub title: String,
    /// Explicit anchor id from a trailing `[id]`.
    pub explicit_id: Option<String>,
}

impl Heading {
    /// Build a heading from its raw source text (everything after the `#` run).
    ///
    /// # Example
    ///
    /// ```
    /// use helpdocs_render::Heading;
    ///
    /// let heading = Heading::parse(3, "Sync options ### [syncopts]");
    /// assert_eq!(heading.title, "Sync options");
    /// assert_eq!(heading.explicit_id.as_deref(), Some("syncopts"));
    /// ```
    #[must_use]
    pub fn parse(level: u8, raw: &str) -> Self {
        let cleaned = raw.replace('#', "");
        let cleaned = cleaned.trim();

        if let Some(caps) = BRACKET_ID_RE.captures(cleaned) {
            let id = caps[1].trim();
            if !id.is_empty() {
                let start = caps.get(0).map_or(cleaned.len(), |m| m.start());
                return Self {
                    level,
                    title: cleaned[..start].trim_end().to_owned(),
                    explicit_id: Some(id.to_owned()),
                };
            }
        }

        Self {
            level,
            title: cleaned.to_owned(),
            explicit_id: None,
        }
    }
}

/// Derive an anchor id from a title: keep ASCII letters, digits, `-` and `.`,
/// lower-cased. Whitespace is dropped, not replaced.
///
/// # Example
///
/// ```
/// use helpdocs_render::derive_anchor;
///
/// assert_eq!(derive_anchor("Using v2.1 Sync!"), "usingv2.1sync");
/// ```
#[must_use]
pub fn derive_anchor(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Per-page anchor allocator.
///
/// Reserve every explicit id on the page before allocating, so a derived
/// anchor never takes a name an explicit id claims further down.
#[derive(Debug, Default)]
pub struct Anchors {
    used: HashSet<String>,
    allocated: HashSet<String>,
}

impl Anchors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the anchor for a heading.
    ///
    /// Explicit ids are returned verbatim the first time they are allocated.
    /// Derived ids, and repeated explicit ids, get a numeric suffix when
    /// already taken.
    pub fn allocate(&mut self, heading: &Heading) -> String {
        match &heading.explicit_id {
            Some(id) => self.allocate_id(id),
            None => self.claim(derive_anchor(&heading.title)),
        }
    }

    /// Allocate an explicit id.
    pub fn allocate_id(&mut self, id: &str) -> String {
        if self.allocated.contains(id) {
            return self.claim(id.to_owned());
        }
        self.used.insert(id.to_owned());
        self.allocated.insert(id.to_owned());
        id.to_owned()
    }

    /// Mark an id as used without allocating it.
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_owned());
    }

    fn claim(&mut self, base: String) -> String {
        let mut candidate = base.clone();
        let mut n = 1;
        while self.used.contains(&candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        self.used.insert(candidate.clone());
        self.allocated.insert(candidate.clone());
        candidate
    }
}

/// A heading found in markdown source, with its allocated anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedHeading {
    pub heading: Heading,
    pub anchor: String,
}

/// Scan ATX headings of every level in document order, skipping fenced code.
///
/// Anchors are allocated through one [`Anchors`] instance, matching the ids
/// the built-in converter assigns to the same page.
#[must_use]
pub fn scan_headings(text: &str) -> Vec<ScannedHeading> {
    let mut fence = FenceTracker::new();
    let mut headings = Vec::new();

    for line in text.lines() {
        if fence.update(line) || fence.in_fence() {
            continue;
        }
        let Some(caps) = ATX_HEADING_RE.captures(line) else {
            continue;
        };
        let level = u8::try_from(caps[1].len()).unwrap_or(6);
        headings.push(Heading::parse(level, &caps[2]));
    }

    let mut anchors = Anchors::new();
    for id in headings.iter().filter_map(|h| h.explicit_id.as_deref()) {
        anchors.reserve(id);
    }
    headings
        .into_iter()
        .map(|heading| {
            let anchor = anchors.allocate(&heading);
            ScannedHeading { heading, anchor }
        })
        .collect()
}

/// Byte offset of the first ATX heading at `level` outside fenced code.
pub(crate) fn first_heading_offset(text: &str, level: u8) -> Option<usize> {
    let mut fence = FenceTracker::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let line = line.trim_end_matches(['\n', '\r']);
        if fence.update(line) || fence.in_fence() {
            continue;
        }
        if let Some(caps) = ATX_HEADING_RE.captures(line)
            && caps[1].len() == usize::from(level)
        {
            return Some(start);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_plain_title() {
        let heading = Heading::parse(2, "Getting Started");
        assert_eq!(heading.title, "Getting Started");
        assert_eq!(heading.explicit_id, None);
    }

    #[test]
    fn test_parse_strips_closing_hashes() {
        assert_eq!(Heading::parse(2, "Setup ##").title, "Setup");
    }

    #[test]
    fn test_parse_empty_brackets_are_not_an_id() {
        let heading = Heading::parse(2, "Arrays []");
        assert_eq!(heading.title, "Arrays []");
        assert_eq!(heading.explicit_id, None);
    }

    #[test]
    fn test_derive_anchor_drops_spaces_and_punctuation() {
        assert_eq!(derive_anchor("Section one"), "sectionone");
        assert_eq!(derive_anchor("What's new?"), "whatsnew");
        assert_eq!(derive_anchor("Über-mode"), "ber-mode");
    }

    #[test]
    fn test_duplicate_anchors_get_suffixes() {
        let mut anchors = Anchors::new();
        let heading = Heading::parse(2, "Options");
        assert_eq!(anchors.allocate(&heading), "options");
        assert_eq!(anchors.allocate(&heading), "options-1");
        assert_eq!(anchors.allocate(&heading), "options-2");
    }

    #[test]
    fn test_explicit_id_reserves_name() {
        let mut anchors = Anchors::new();
        assert_eq!(anchors.allocate(&Heading::parse(2, "Sync [options]")), "options");
        assert_eq!(anchors.allocate(&Heading::parse(2, "Options")), "options-1");
    }

    #[test]
    fn test_repeated_explicit_id_gets_suffix() {
        let mut anchors = Anchors::new();
        assert_eq!(anchors.allocate(&Heading::parse(2, "One [part]")), "part");
        assert_eq!(anchors.allocate(&Heading::parse(2, "Two [part]")), "part-1");
    }

    #[test]
    fn test_later_explicit_id_wins_over_derived() {
        let anchors: Vec<_> = scan_headings("## Options\n\n## Advanced [options]\n")
            .into_iter()
            .map(|h| h.anchor)
            .collect();
        assert_eq!(anchors, vec!["options-1", "options"]);
    }

    #[test]
    fn test_scan_skips_fenced_code() {
        let text = "# Title\n\n```\n## Not a heading\n```\n\n## Real\n\n### Sub [sub]\n";
        let headings = scan_headings(text);
        let summary: Vec<_> = headings
            .iter()
            .map(|h| (h.heading.level, h.anchor.as_str()))
            .collect();
        assert_eq!(summary, vec![(1, "title"), (2, "real"), (3, "sub")]);
    }

    #[test]
    fn test_first_heading_offset_skips_fences() {
        let text = "# Top\n```\n## code\n```\n## Real\n";
        assert_eq!(first_heading_offset(text, 2), Some(text.find("## Real").unwrap()));
        assert_eq!(first_heading_offset("### Deep\n", 2), None);
    }

    #[test]
    fn test_scan_requires_space_after_hashes() {
        assert!(scan_headings("#hashtag\n####### seven").is_empty());
    }
}
