//! Directive tag scanning.
//!
//! Open tags are `{% name params %}` (params may span lines), close tags are
//! `{% endname %}` with a case-insensitive name. Single-tag directives must fit
//! on one line and need at least one space after the name.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use super::DirectiveArgs;

static OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{%\s*([^\s%]+)\s*(.*?)\s*%\}").unwrap());

pub(crate) static INLINE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{% *([^\s%]+) +(.*?) *%\}").unwrap());

/// An open tag found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenTag {
    pub range: Range<usize>,
    pub args: DirectiveArgs,
}

/// Find the next open tag at or after `from`.
pub(crate) fn next_open_tag(text: &str, from: usize) -> Option<OpenTag> {
    let caps = OPEN_TAG_RE.captures_at(text, from)?;
    let whole = caps.get(0)?;
    Some(OpenTag {
        range: whole.range(),
        args: DirectiveArgs::new(&caps[1], &caps[2]),
    })
}

/// Find the nearest `{% end<name> %}` at or after `from`.
pub(crate) fn find_close_tag(text: &str, name: &str, from: usize) -> Option<Range<usize>> {
    let pattern = format!(r"\{{%\s*end{}\s*%\}}", regex::escape(name));
    let close = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?;
    close.find_at(text, from).map(|m| m.range())
}
