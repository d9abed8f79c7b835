//! Directive expansion for help documentation.
//!
//! Pages are authored as markdown with a small directive language on top:
//! `{% block %}` and `{% tag %}` directives, `{{token}}` key entities,
//! `{{toc}}` markers and `{>> annotation <<}` spans. This crate expands that
//! language into plain markdown for a [`RenderTarget`], and converts the
//! result to HTML.
//!
//! # Example
//!
//! ```
//! use helpdocs_render::{CmarkConverter, MarkdownConverter, RenderTarget, expand};
//!
//! let markdown = expand("Save with {% kbd {{cmd}}S %}.", RenderTarget::Web);
//! assert_eq!(
//!     markdown,
//!     r#"Save with <span class="keycombo"><kbd class="modifierkey">&#8984;</kbd><kbd>S</kbd></span>."#
//! );
//!
//! let html = CmarkConverter::new().convert(&markdown).unwrap();
//! assert!(html.starts_with("<p>Save with"));
//! ```

mod anchor;
mod convert;
pub mod directive;
mod entity;
mod fence;
mod kbd;
mod strip;
mod target;
mod toc;

pub use anchor::{Anchors, Heading, ScannedHeading, derive_anchor, scan_headings};
pub use convert::{CmarkConverter, ConvertError, MarkdownConverter};
pub use entity::{Glyph, render_token, resolve_entities, symbolify};
pub use kbd::{KeyCombo, KeyToken, format_keys};
pub use strip::{strip_annotations, strip_author_notes};
pub use target::{ParseTargetError, RenderTarget};
pub use toc::{ParseTocLevelError, TocEntry, TocLevel, table_of_contents, toc_entries};

/// Expand all directive syntax in `text` for `target`.
///
/// Shorthand for [`directive::DirectiveProcessor::process`] when warnings are
/// not needed.
#[must_use]
pub fn expand(text: &str, target: RenderTarget) -> String {
    directive::DirectiveProcessor::new(target).process(text)
}
