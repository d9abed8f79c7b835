//! Search index model and builder.
//!
//! One [`SearchIndex`] lives for a whole build. Each rendered page is added
//! with [`SearchIndex::add_page`]; at the end the index is serialized for the
//! client-side search and rendered as a flat, sorted keyword listing.

use std::fmt::Write as _;

use serde::{Serialize, Serializer};

use crate::document::{DocumentError, HtmlDocument, XmlDocument};
use crate::stem::{DEFAULT_MIN_STEM_COUNT, find_stems};
use crate::strip::strip_html;

/// Id of the element holding a page's main content.
pub const CONTENT_ID: &str = "content";

/// Heading tags indexed inside the content region.
const INDEXED_HEADINGS: [&str; 2] = ["h2", "h3"];

/// A rendered page handed to the index builder.
#[derive(Clone, Copy, Debug)]
pub struct PageInput<'a> {
    pub title: &'a str,
    /// Page location relative to the output root, e.g. `sync.html`.
    pub location: &'a str,
    pub html: &'a str,
    /// Manual keywords; always indexed regardless of frequency.
    pub keywords: &'a [String],
}

/// Navigation child of an indexed page (one per `h2`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndexSection {
    pub title: String,
    pub loc: String,
}

/// One page of the search index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndexDocument {
    pub title: String,
    pub loc: String,
    #[serde(rename = "tags", serialize_with = "space_joined")]
    pub keywords: Vec<String>,
    pub text: String,
    pub children: Vec<IndexSection>,
}

/// Entry of the flat keyword listing: a page or one of its headings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullIndexEntry {
    pub title: String,
    pub link: String,
    pub keywords: Vec<String>,
}

#[derive(Serialize)]
struct SerializedIndex<'a> {
    pages: &'a [IndexDocument],
}

fn space_joined<S: Serializer>(keywords: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&keywords.join(" "))
}

/// Accumulates index documents and flat listing entries for one build.
#[derive(Debug)]
pub struct SearchIndex {
    min_stem_count: usize,
    pages: Vec<IndexDocument>,
    entries: Vec<FullIndexEntry>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_stem_count: DEFAULT_MIN_STEM_COUNT,
            pages: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Set the minimum number of occurrences for a stem to become a keyword.
    #[must_use]
    pub fn with_min_stem_count(mut self, min_stem_count: usize) -> Self {
        self.min_stem_count = min_stem_count;
        self
    }

    /// Index a rendered page.
    ///
    /// HTML the document parser rejects is indexed from its stripped text,
    /// without sections.
    ///
    /// # Example
    ///
    /// ```
    /// use helpdocs_search::{PageInput, SearchIndex};
    ///
    /// let mut index = SearchIndex::new().with_min_stem_count(1);
    /// let doc = index.add_page(&PageInput {
    ///     title: "Sync",
    ///     location: "sync.html",
    ///     html: r#"<div id="content"><h2 id="setup">Setup</h2><p>Enable syncing.</p></div>"#,
    ///     keywords: &[],
    /// });
    /// assert_eq!(doc.children[0].loc, "sync.html#setup");
    /// assert_eq!(doc.text, "Setup Setup Enable syncing.");
    /// ```
    pub fn add_page(&mut self, page: &PageInput<'_>) -> &IndexDocument {
        match XmlDocument::parse(page.html) {
            Ok(doc) => self.add_document(page, &doc),
            Err(err) => self.add_unparsed(page, &err),
        }
    }

    /// Index a page through any [`HtmlDocument`] implementation.
    pub fn add_document<D: HtmlDocument>(&mut self, page: &PageInput<'_>, doc: &D) -> &IndexDocument {
        let content = doc.element_by_id(CONTENT_ID).unwrap_or_else(|| doc.root());
        let keywords = self.page_keywords(&doc.text(content), page.keywords);
        let mut text = strip_html(doc.inner_html(content));

        self.entries.push(FullIndexEntry {
            title: page.title.to_owned(),
            link: page.location.to_owned(),
            keywords: keywords.clone(),
        });

        let mut children = Vec::new();
        for heading in doc.descendants_by_tag(content, &INDEXED_HEADINGS) {
            let title = doc.text(heading).trim().to_owned();
            let loc = match doc.attr(heading, "id") {
                Some(id) => format!("{}#{id}", page.location),
                None => page.location.to_owned(),
            };
            self.entries.push(FullIndexEntry {
                title: format!("{}: {title}", page.title).trim().to_owned(),
                link: loc.clone(),
                keywords: find_stems(&title, 0),
            });
            if doc.tag(heading) == "h2" {
                children.push(IndexSection { title, loc });
            }
        }

        if !children.is_empty() {
            let sections: Vec<&str> = children.iter().map(|c| c.title.as_str()).collect();
            text = format!("{} {text}", sections.join(" "));
        }

        tracing::debug!(
            page = %page.title,
            keywords = keywords.len(),
            sections = children.len(),
            "Indexed page"
        );
        self.push_page(IndexDocument {
            title: page.title.to_owned(),
            loc: page.location.to_owned(),
            keywords,
            text,
            children,
        })
    }

    fn add_unparsed(&mut self, page: &PageInput<'_>, err: &DocumentError) -> &IndexDocument {
        tracing::warn!(page = %page.title, error = %err, "Could not parse page HTML, indexing plain text");
        let text = strip_html(page.html);
        let keywords = self.page_keywords(&text, page.keywords);
        self.entries.push(FullIndexEntry {
            title: page.title.to_owned(),
            link: page.location.to_owned(),
            keywords: keywords.clone(),
        });
        self.push_page(IndexDocument {
            title: page.title.to_owned(),
            loc: page.location.to_owned(),
            keywords,
            text,
            children: Vec::new(),
        })
    }

    fn push_page(&mut self, doc: IndexDocument) -> &IndexDocument {
        self.pages.push(doc);
        &self.pages[self.pages.len() - 1]
    }

    /// Stems above the floor, followed by manual keywords not already present.
    fn page_keywords(&self, text: &str, manual: &[String]) -> Vec<String> {
        let mut keywords = find_stems(text, self.min_stem_count);
        for keyword in manual {
            let keyword = keyword.trim();
            if !keyword.is_empty() && !keywords.iter().any(|k| k == keyword) {
                keywords.push(keyword.to_owned());
            }
        }
        keywords
    }

    #[must_use]
    pub fn pages(&self) -> &[IndexDocument] {
        &self.pages
    }

    /// Serialize as `{"pages": [...]}`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&SerializedIndex { pages: &self.pages })
    }

    /// Page and heading entries sorted by title, comparing bytes (so
    /// upper-case titles sort before lower-case ones).
    #[must_use]
    pub fn full_index(&self) -> Vec<&FullIndexEntry> {
        let mut entries: Vec<&FullIndexEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.title.cmp(&b.title));
        entries
    }

    /// Render the flat keyword listing as an HTML fragment.
    ///
    /// Each `<li>` carries the entry's keywords as classes for client-side
    /// filtering.
    #[must_use]
    pub fn render_full_index(&self) -> String {
        let mut out = String::from(concat!(
            "<h1>Index</h1>\n",
            r#"<div class="uk-margin"><form action="search.html" class="uk-search uk-search-default">"#,
            r#"<input class="uk-search-input" type="search" placeholder="Keyword Filter" name="filter" id="topicsearch">"#,
            "</form></div>\n",
            "<ul id=\"topiclist\">\n",
        ));
        for entry in self.full_index() {
            let _ = writeln!(
                out,
                r#"<li class="{}"><a href="{}">{}</a></li>"#,
                escape_html(&entry.keywords.join(" ")),
                escape_html(&entry.link),
                escape_html(&entry.title)
            );
        }
        out.push_str("</ul>\n");
        out
    }
}

/// Escape text for use in HTML element content and double-quoted attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SYNC_PAGE: &str = r#"<html><body>
<nav id="toc"><a href="x.html">Sidebar sync sync sync</a></nav>
<div id="content">
<h1>Syncing</h1>
<p>Syncing keeps notes current. Sync runs hourly and sync is fast.</p>
<h2 id="setup">Setup</h2>
<p>Open the settings.</p>
<h3 id="conflicts">Conflicts</h3>
<h2 id="troubleshooting">Troubleshooting</h2>
</div>
</body></html>"#;

    fn page<'a>(title: &'a str, location: &'a str, html: &'a str, keywords: &'a [String]) -> PageInput<'a> {
        PageInput {
            title,
            location,
            html,
            keywords,
        }
    }

    #[test]
    fn test_page_keywords_and_children() {
        let mut index = SearchIndex::new();
        let doc = index.add_page(&page("Sync", "sync.html", SYNC_PAGE, &[])).clone();
        assert_eq!(doc.keywords, vec!["sync"]);
        assert_eq!(
            doc.children,
            vec![
                IndexSection {
                    title: "Setup".to_owned(),
                    loc: "sync.html#setup".to_owned()
                },
                IndexSection {
                    title: "Troubleshooting".to_owned(),
                    loc: "sync.html#troubleshooting".to_owned()
                },
            ]
        );
        assert!(doc.text.starts_with("Setup Troubleshooting Syncing Syncing keeps notes"));
        assert!(!doc.text.contains("Sidebar"));
    }

    #[test]
    fn test_floor_two_vs_three() {
        let html = r#"<div id="content"><p>export exports backup</p></div>"#;
        let mut strict = SearchIndex::new();
        assert!(strict.add_page(&page("A", "a.html", html, &[])).keywords.is_empty());
        let mut loose = SearchIndex::new().with_min_stem_count(2);
        assert_eq!(loose.add_page(&page("A", "a.html", html, &[])).keywords, vec!["export"]);
    }

    #[test]
    fn test_manual_keywords_bypass_floor() {
        let manual = vec!["dropbox".to_owned(), "icloud".to_owned()];
        let html = r#"<div id="content"><p>Nothing relevant.</p></div>"#;
        let mut index = SearchIndex::new();
        let doc = index.add_page(&page("Storage", "storage.html", html, &manual));
        assert_eq!(doc.keywords, vec!["dropbox", "icloud"]);
    }

    #[test]
    fn test_missing_content_region_uses_whole_document() {
        let html = "<p>Archive archived archives</p>";
        let mut index = SearchIndex::new();
        let doc = index.add_page(&page("Archive", "archive.html", html, &[]));
        assert_eq!(doc.keywords, vec!["archiv"]);
        assert_eq!(doc.text, "Archive archived archives");
    }

    #[test]
    fn test_unparseable_html_falls_back_to_stripped_text() {
        let html = r#"<div id="content"><h2 id="a">Notes</h2><p>notes notes</p><!-- unterminated"#;
        let mut index = SearchIndex::new();
        let doc = index.add_page(&page("Broken", "broken.html", html, &[])).clone();
        assert!(doc.children.is_empty());
        assert_eq!(doc.keywords, vec!["note"]);
        assert!(doc.text.starts_with("Notes notes notes"));
        assert_eq!(index.full_index().len(), 1);
    }

    #[test]
    fn test_headings_enter_flat_index() {
        let mut index = SearchIndex::new();
        index.add_page(&page("Sync", "sync.html", SYNC_PAGE, &[]));
        let titles: Vec<_> = index.full_index().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Sync",
                "Sync: Conflicts",
                "Sync: Setup",
                "Sync: Troubleshooting"
            ]
        );
        let conflicts = index.full_index()[1].clone();
        assert_eq!(conflicts.link, "sync.html#conflicts");
        assert_eq!(conflicts.keywords, vec!["conflict"]);
    }

    #[test]
    fn test_full_index_sorts_by_bytes() {
        let mut index = SearchIndex::new();
        for title in ["alpha", "Zeta", "Beta"] {
            index.add_page(&page(title, "p.html", "<p>x</p>", &[]));
        }
        let titles: Vec<_> = index.full_index().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Beta", "Zeta", "alpha"]);
    }

    #[test]
    fn test_json_shape() {
        let mut index = SearchIndex::new();
        let manual = vec!["intro".to_owned()];
        index.add_page(&page(
            "Start",
            "start.html",
            r#"<div id="content"><h2 id="one">One</h2></div>"#,
            &manual,
        ));
        assert_eq!(
            index.to_json().unwrap(),
            r#"{"pages":[{"title":"Start","loc":"start.html","tags":"intro","text":"One One","children":[{"title":"One","loc":"start.html#one"}]}]}"#
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>"), "&lt;b&gt;");
        assert_eq!(escape_html(r#"Q&A "quoted""#), "Q&amp;A &quot;quoted&quot;");
    }

    #[test]
    fn test_render_full_index() {
        let mut index = SearchIndex::new();
        let manual = vec!["intro".to_owned(), "basics".to_owned()];
        index.add_page(&page("Start & Go", "start.html", "<p>x</p>", &manual));
        let html = index.render_full_index();
        assert!(html.starts_with("<h1>Index</h1>\n"));
        assert!(html.contains(
            "<ul id=\"topiclist\">\n<li class=\"intro basics\"><a href=\"start.html\">Start &amp; Go</a></li>\n</ul>\n"
        ));
    }
}
