//! Search index builder for rendered help pages.
//!
//! Turns each page's HTML into an [`IndexDocument`]: stemmed keywords from
//! the `#content` region, a plain-text excerpt and the page's `h2` sections.
//! The finished [`SearchIndex`] serializes to the `search.json` consumed by
//! client-side search and renders a flat keyword listing page.
//!
//! # Example
//!
//! ```
//! use helpdocs_search::{PageInput, SearchIndex};
//!
//! let mut index = SearchIndex::new();
//! let keywords = vec!["intro".to_owned()];
//! index.add_page(&PageInput {
//!     title: "Welcome",
//!     location: "index.html",
//!     html: r#"<div id="content"><p>Hello <b>world</b>!</p></div>"#,
//!     keywords: &keywords,
//! });
//!
//! let json = index.to_json().unwrap();
//! assert!(json.contains(r#""tags":"intro","text":"Hello world !""#));
//! ```

mod document;
mod entities;
mod index;
mod stem;
mod strip;

pub use document::{DocumentError, HtmlDocument, NodeId, XmlDocument};
pub use index::{
    CONTENT_ID, FullIndexEntry, IndexDocument, IndexSection, PageInput, SearchIndex, escape_html,
};
pub use stem::{DEFAULT_MIN_STEM_COUNT, find_stems, is_stopword, stem, stem_counts, tokenize};
pub use strip::strip_html;
