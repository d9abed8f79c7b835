//! Removal of author-only text.
//!
//! Two kinds of text never reach readers: annotation spans (`{>> … <<}`),
//! removed as the first expansion pass, and author notes (TODO/FIXME lines
//! and trailing notes sections), removed before a page is converted.

use std::sync::LazyLock;

use regex::Regex;

static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{>>.*?<<\}").unwrap());

static AUTHOR_NOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:TODO|FIX(?:ME)?):.*$|\s*\((?:TODO|FIX(?:ME)?):.*?\)").unwrap()
});

static NOTES_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!-- *NOTES *-->|__(?:NOTES|END|TODO)__").unwrap());

/// Remove annotation spans `{>> … <<}`, which may span several lines.
///
/// # Example
///
/// ```
/// use helpdocs_render::strip_annotations;
///
/// assert_eq!(strip_annotations("Keep{>> reviewer\nnote <<} this"), "Keep this");
/// ```
#[must_use]
pub fn strip_annotations(text: &str) -> String {
    ANNOTATION_RE.replace_all(text, "").into_owned()
}

/// Remove author notes from a page.
///
/// Drops `TODO:`, `FIX:` and `FIXME:` lines, inline `(TODO: …)` asides, and
/// everything from the first notes marker (`<!-- NOTES -->`, `__NOTES__`,
/// `__END__` or `__TODO__`) to the end of the page.
#[must_use]
pub fn strip_author_notes(text: &str) -> String {
    let body = NOTES_MARKER_RE
        .find(text)
        .map_or(text, |marker| &text[..marker.start()]);
    AUTHOR_NOTE_RE.replace_all(body, "").into_owned()
}
