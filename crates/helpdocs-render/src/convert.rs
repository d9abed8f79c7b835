//! Markdown to HTML conversion.
//!
//! Conversion sits behind the [`MarkdownConverter`] trait so a build can use
//! either the built-in [`CmarkConverter`] or an external program. The built-in
//! converter assigns heading ids with the same allocator the TOC generator
//! uses, so TOC links always resolve.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::anchor::{Anchors, Heading};

/// Error converting markdown to HTML.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to run converter `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Converter `{program}` failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("Converter `{program}` produced invalid UTF-8")]
    InvalidOutput { program: String },
}

/// Converts expanded markdown to an HTML fragment.
pub trait MarkdownConverter {
    fn convert(&self, markdown: &str) -> Result<String, ConvertError>;
}

/// Built-in converter based on pulldown-cmark.
///
/// # Example
///
/// ```
/// use helpdocs_render::{CmarkConverter, MarkdownConverter};
///
/// let html = CmarkConverter::new().convert("## Setup [install]\n\nText").unwrap();
/// assert_eq!(html, "<h2 id=\"install\">Setup</h2>\n<p>Text</p>\n");
/// ```
#[derive(Clone, Debug)]
pub struct CmarkConverter {
    options: Options,
}

impl Default for CmarkConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CmarkConverter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl MarkdownConverter for CmarkConverter {
    fn convert(&self, markdown: &str) -> Result<String, ConvertError> {
        let events = with_heading_ids(Parser::new_ext(markdown, self.options));
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        Ok(out)
    }
}

struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    raw: String,
    inner: Vec<Event<'a>>,
}

enum Item<'a> {
    Event(Event<'a>),
    Heading(Box<PendingHeading<'a>>, Heading),
}

/// Give every heading an id and strip bracketed ids from heading text.
///
/// Explicit ids are reserved across the whole document before any id is
/// derived.
fn with_heading_ids<'a>(parser: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut items = Vec::new();
    let mut pending: Option<PendingHeading<'a>> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                pending = Some(PendingHeading {
                    level,
                    id,
                    classes,
                    attrs,
                    raw: String::new(),
                    inner: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(end_level)) => match pending.take() {
                Some(heading) => {
                    let parsed = Heading::parse(heading.level as u8, &heading.raw);
                    items.push(Item::Heading(Box::new(heading), parsed));
                }
                None => items.push(Item::Event(Event::End(TagEnd::Heading(end_level)))),
            },
            other => match pending.as_mut() {
                Some(heading) => {
                    if let Event::Text(text) | Event::Code(text) = &other {
                        heading.raw.push_str(text);
                    }
                    heading.inner.push(other);
                }
                None => items.push(Item::Event(other)),
            },
        }
    }

    let mut anchors = Anchors::new();
    for item in &items {
        if let Item::Heading(heading, parsed) = item
            && let Some(id) = heading.id.as_deref().or(parsed.explicit_id.as_deref())
        {
            anchors.reserve(id);
        }
    }

    let mut events = Vec::with_capacity(items.len());
    for item in items {
        let (heading, parsed) = match item {
            Item::Event(event) => {
                events.push(event);
                continue;
            }
            Item::Heading(heading, parsed) => (*heading, parsed),
        };
        let anchor = match &heading.id {
            Some(id) => anchors.allocate_id(id),
            None => anchors.allocate(&parsed),
        };
        events.push(Event::Start(Tag::Heading {
            level: heading.level,
            id: Some(CowStr::from(anchor)),
            classes: heading.classes,
            attrs: heading.attrs,
        }));
        if parsed.title == heading.raw.trim() {
            events.extend(heading.inner);
        } else {
            events.push(Event::Text(CowStr::from(parsed.title)));
        }
        events.push(Event::End(TagEnd::Heading(heading.level)));
    }

    events
}
