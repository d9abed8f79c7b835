//! Read-only access to rendered HTML pages.
//!
//! The index builder needs only a handful of capabilities from a page: find an
//! element by id, list headings inside it, read an element's text and its
//! inner HTML. [`HtmlDocument`] names those capabilities; [`XmlDocument`]
//! implements them on top of quick-xml.
//!
//! # Example
//!
//! ```
//! use helpdocs_search::{HtmlDocument, XmlDocument};
//!
//! let doc = XmlDocument::parse(r#"<div id="content"><h2 id="a">Alpha</h2><p>x</p></div>"#).unwrap();
//! let content = doc.element_by_id("content").unwrap();
//! let headings = doc.descendants_by_tag(content, &["h2", "h3"]);
//! assert_eq!(doc.text(headings[0]), "Alpha");
//! assert_eq!(doc.attr(headings[0], "id"), Some("a"));
//! ```

use std::borrow::Cow;
use std::ops::Range;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::decode_entity;

/// Elements that never have content, even when written without `/>`.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Error parsing a page.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("HTML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}

/// Handle to an element inside a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Query capabilities over a parsed HTML page.
pub trait HtmlDocument {
    /// The document's outermost element.
    fn root(&self) -> NodeId;

    /// First element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Descendants of `scope` with one of the given tag names, in document order.
    fn descendants_by_tag(&self, scope: NodeId, tags: &[&str]) -> Vec<NodeId>;

    fn tag(&self, node: NodeId) -> &str;

    fn attr(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Concatenated text of the element and its descendants, entities decoded.
    fn text(&self, node: NodeId) -> String;

    /// Source HTML between the element's start and end tags.
    fn inner_html(&self, node: NodeId) -> &str;
}

#[derive(Debug)]
enum Child {
    Element(NodeId),
    Text(String),
}

#[derive(Debug)]
struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
    inner: Range<usize>,
}

/// HTML page parsed as lenient XML.
///
/// End tag names are not checked against start tags; a stray end tag closes
/// the nearest open element with that name, or is ignored. Void elements such
/// as `<br>` need no closing slash.
#[derive(Debug)]
pub struct XmlDocument {
    source: String,
    elements: Vec<Element>,
}

impl XmlDocument {
    /// Parse an HTML fragment or page.
    pub fn parse(html: &str) -> Result<Self, DocumentError> {
        let source = format!("<root>{html}</root>");
        let elements = parse_elements(&source)?;
        Ok(Self { source, elements })
    }

    fn element(&self, node: NodeId) -> &Element {
        &self.elements[node.0]
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        for child in &self.element(node).children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(id) => self.collect_text(*id, out),
            }
        }
    }

    fn collect_by_tag(&self, node: NodeId, tags: &[&str], out: &mut Vec<NodeId>) {
        for child in &self.element(node).children {
            if let Child::Element(id) = child {
                if tags.contains(&self.element(*id).tag.as_str()) {
                    out.push(*id);
                }
                self.collect_by_tag(*id, tags, out);
            }
        }
    }
}

impl HtmlDocument for XmlDocument {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|el| el.attrs.iter().any(|(k, v)| k == "id" && v == id))
            .map(NodeId)
    }

    fn descendants_by_tag(&self, scope: NodeId, tags: &[&str]) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_by_tag(scope, tags, &mut out);
        out
    }

    fn tag(&self, node: NodeId) -> &str {
        &self.element(node).tag
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn inner_html(&self, node: NodeId) -> &str {
        let inner = &self.element(node).inner;
        self.source.get(inner.clone()).unwrap_or_default()
    }
}

fn parse_elements(source: &str) -> Result<Vec<Element>, DocumentError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = false;
    reader.config_mut().allow_unmatched_ends = true;

    let mut elements: Vec<Element> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    loop {
        let before = position(&reader);
        match reader.read_event()? {
            Event::Start(e) => {
                let after = position(&reader);
                let id = push_element(&mut elements, &stack, &reader, &e, after);
                if !VOID_ELEMENTS.contains(&elements[id].tag.as_str()) {
                    stack.push(id);
                }
            }
            Event::Empty(e) => {
                let after = position(&reader);
                push_element(&mut elements, &stack, &reader, &e, after);
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                append_text(&mut elements, &stack, &text);
            }
            Event::GeneralRef(e) => {
                let name = reader.decoder().decode(&e)?;
                append_text(&mut elements, &stack, &decode_entity(&name));
            }
            Event::CData(e) => {
                append_text(&mut elements, &stack, &String::from_utf8_lossy(&e));
            }
            Event::End(e) => {
                let name = decode_name(&reader, e.name().as_ref());
                if let Some(depth) = stack.iter().rposition(|&i| elements[i].tag == name) {
                    for &open in &stack[depth..] {
                        elements[open].inner.end = before;
                    }
                    stack.truncate(depth);
                }
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    for open in stack {
        elements[open].inner.end = source.len();
    }
    Ok(elements)
}

fn position(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

fn push_element(
    elements: &mut Vec<Element>,
    stack: &[usize],
    reader: &Reader<&[u8]>,
    start: &BytesStart,
    after: usize,
) -> usize {
    let id = elements.len();
    elements.push(Element {
        tag: decode_name(reader, start.name().as_ref()),
        attrs: decode_attrs(reader, start),
        children: Vec::new(),
        inner: after..after,
    });
    if let Some(&parent) = stack.last() {
        elements[parent].children.push(Child::Element(NodeId(id)));
    }
    id
}

fn append_text(elements: &mut [Element], stack: &[usize], text: &str) {
    let Some(&parent) = stack.last() else {
        return;
    };
    let children = &mut elements[parent].children;
    if let Some(Child::Text(last)) = children.last_mut() {
        last.push_str(text);
    } else {
        children.push(Child::Text(text.to_owned()));
    }
}

fn decode_name(reader: &Reader<&[u8]>, name: &[u8]) -> String {
    reader
        .decoder()
        .decode(name)
        .unwrap_or_else(|_| String::from_utf8_lossy(name))
        .to_ascii_lowercase()
}

fn decode_attrs(reader: &Reader<&[u8]>, start: &BytesStart) -> Vec<(String, String)> {
    start
        .attributes()
        .flatten()
        .map(|attr| {
            let key = decode_name(reader, attr.key.as_ref());
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                Cow::into_owned,
            );
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PAGE: &str = r#"<html><body>
<nav id="sidebar"><h2 id="nav">Menu</h2></nav>
<div id="content">
<h1>Sync</h1>
<p>Sync keeps notes <b>up to date</b>.<br>Really.</p>
<h2 id="setup">Setup</h2>
<p>Text &amp; more&nbsp;here &#8984;</p>
<h3 id="details">Details</h3>
</div>
</body></html>"#;

    #[test]
    fn test_element_by_id() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let content = doc.element_by_id("content").unwrap();
        assert_eq!(doc.tag(content), "div");
        assert!(doc.element_by_id("missing").is_none());
    }

    #[test]
    fn test_headings_scoped_to_content() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let content = doc.element_by_id("content").unwrap();
        let headings: Vec<_> = doc
            .descendants_by_tag(content, &["h2", "h3"])
            .into_iter()
            .map(|h| (doc.tag(h).to_owned(), doc.attr(h, "id").map(str::to_owned)))
            .collect();
        assert_eq!(
            headings,
            vec![
                ("h2".to_owned(), Some("setup".to_owned())),
                ("h3".to_owned(), Some("details".to_owned())),
            ]
        );
    }

    #[test]
    fn test_text_decodes_entities() {
        let doc = XmlDocument::parse("<p>Text &amp; more&nbsp;here &#8984;</p>").unwrap();
        assert_eq!(doc.text(doc.root()), "Text & more\u{a0}here \u{2318}");
    }

    #[test]
    fn test_void_element_without_slash() {
        let doc = XmlDocument::parse("<p>a<br>b</p><p id=\"after\">c</p>").unwrap();
        let after = doc.element_by_id("after").unwrap();
        assert_eq!(doc.text(after), "c");
        assert_eq!(doc.text(doc.root()), "abc");
    }

    #[test]
    fn test_inner_html_is_source_slice() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let content = doc.element_by_id("content").unwrap();
        let inner = doc.inner_html(content);
        assert!(inner.starts_with("\n<h1>Sync</h1>"));
        assert!(inner.contains("more&nbsp;here"));
        assert!(inner.ends_with("</h3>\n"));
    }

    #[test]
    fn test_stray_end_tag_ignored() {
        let doc = XmlDocument::parse("<div id=\"x\">a</span>b</div>").unwrap();
        let x = doc.element_by_id("x").unwrap();
        assert_eq!(doc.text(x), "ab");
        assert_eq!(doc.inner_html(x), "a</span>b");
    }

    #[test]
    fn test_unclosed_element_runs_to_end() {
        let doc = XmlDocument::parse("<div id=\"x\"><p>open").unwrap();
        let x = doc.element_by_id("x").unwrap();
        assert_eq!(doc.text(x), "open");
    }
}
