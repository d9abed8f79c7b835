//! Directive expansion pipeline.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::block::expand_blocks;
use super::inline::expand_inline;
use crate::anchor::first_heading_offset;
use crate::entity::resolve_entities;
use crate::strip::strip_annotations;
use crate::target::RenderTarget;
use crate::toc::{TOC_NAV_OPEN, TocLevel, table_of_contents};

static ANY_TOC_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\{\{ *toc(?: [\d,]+)? *\}\}").unwrap());

static TOC_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\{\{ *toc(?: ([1-6](?:,[2-6])?))? *\}\}").unwrap());

/// Expands directive syntax for one render target.
///
/// Passes run in a fixed order: annotation stripping, block directives,
/// single-tag directives, TOC markers, entity tokens. Nothing fails; malformed
/// syntax is left in place or resolved to the nearest match.
///
/// # Example
///
/// ```
/// use helpdocs_render::RenderTarget;
/// use helpdocs_render::directive::DirectiveProcessor;
///
/// let mut processor = DirectiveProcessor::new(RenderTarget::Embedded);
/// let output = processor.process("{% apponly %}Quit with {% kbd {{cmd}}Q %}{% endapponly %}");
/// assert!(output.starts_with(r#"<span class="apponly">Quit with <span class="keycombo">"#));
/// assert!(processor.warnings().is_empty());
/// ```
#[derive(Debug)]
pub struct DirectiveProcessor {
    target: RenderTarget,
    warnings: Vec<String>,
}

impl DirectiveProcessor {
    #[must_use]
    pub fn new(target: RenderTarget) -> Self {
        Self {
            target,
            warnings: Vec::new(),
        }
    }

    /// Expand all directives in `input`.
    pub fn process(&mut self, input: &str) -> String {
        tracing::trace!(render_target = %self.target, len = input.len(), "Expanding directives");
        let text = strip_annotations(input);
        let text = expand_blocks(&text, &mut self.warnings);
        let text = expand_inline(&text, self.target);
        let text = self.expand_toc(&text);
        resolve_entities(&text)
    }

    /// Warnings collected so far (unclosed block directives).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn expand_toc(&self, text: &str) -> String {
        if !self.target.inlines_toc() {
            return ANY_TOC_MARKER_RE.replace_all(text, "").into_owned();
        }

        if TOC_MARKER_RE.is_match(text) {
            return TOC_MARKER_RE
                .replace_all(text, |caps: &Captures| {
                    let level = caps
                        .get(1)
                        .and_then(|m| m.as_str().parse().ok())
                        .unwrap_or_default();
                    table_of_contents(text, level, true)
                })
                .into_owned();
        }

        if text.contains(TOC_NAV_OPEN) {
            return text.to_owned();
        }
        let toc = table_of_contents(text, TocLevel::default(), false);
        match first_heading_offset(text, 2) {
            Some(section) if !toc.is_empty() => {
                let mut out = String::with_capacity(text.len() + toc.len() + 2);
                out.push_str(&text[..section]);
                out.push_str(&toc);
                out.push_str("\n\n");
                out.push_str(&text[section..]);
                out
            }
            _ => text.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SECTIONS: &str = "Intro\n\n## One\n\n## Two\n\n## Three\n\n## Four\n";

    fn expand(text: &str, target: RenderTarget) -> String {
        DirectiveProcessor::new(target).process(text)
    }

    #[test]
    fn test_apponly_tagged_and_todo_removed_in_every_target() {
        let text = "{% apponly %}App{% endapponly %}{% todo %}later{% endtodo %}";
        for target in RenderTarget::ALL {
            assert_eq!(expand(text, target), r#"<span class="apponly">App</span>"#);
        }
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let text = "{>> draft <<}{% apponly %}Hi {% kbd {{cmd}}K %}{% endapponly %}\n\n{% menu File,Open %}";
        for target in RenderTarget::ALL {
            let once = expand(text, target);
            assert_eq!(expand(&once, target), once, "target {target}");
        }
        for target in RenderTarget::ALL {
            let once = expand(SECTIONS, target);
            assert_eq!(expand(&once, target), once, "target {target}");
        }
    }

    #[test]
    fn test_web_removes_toc_markers() {
        assert_eq!(
            expand("A{{toc}}B{{TOC 2,3}}C{{ toc 3 }}D", RenderTarget::Web),
            "ABCD"
        );
    }

    #[test]
    fn test_web_has_no_implicit_toc() {
        assert_eq!(expand(SECTIONS, RenderTarget::Web), SECTIONS);
    }

    #[test]
    fn test_implicit_toc_before_first_section() {
        let out = expand(SECTIONS, RenderTarget::Embedded);
        assert!(out.starts_with("Intro\n\n\n<nav id=\"sectiontoc\""));
        assert!(out.contains("* [Four](#four)\n\n</nav>\n\n\n\n## One"));
    }

    #[test]
    fn test_implicit_toc_not_placed_in_code_block() {
        let text = format!("Intro\n\n```\n## shell prompt\n```\n\n{}", &SECTIONS[7..]);
        let out = expand(&text, RenderTarget::Embedded);
        assert!(out.contains("```\n## shell prompt\n```\n\n\n<nav id=\"sectiontoc\""));
        assert!(out.contains("</nav>\n\n\n\n## One"));
    }

    #[test]
    fn test_no_implicit_toc_for_short_pages() {
        let text = "## One\n\n## Two\n";
        assert_eq!(expand(text, RenderTarget::Print), text);
    }

    #[test]
    fn test_explicit_marker_forces_toc() {
        let out = expand("{{toc}}\n\n## Only\n", RenderTarget::Print);
        assert!(out.starts_with("\n<nav id=\"sectiontoc\""));
        assert!(out.contains("* [Only](#only)"));
    }

    #[test]
    fn test_explicit_marker_level() {
        let out = expand("{{toc 3}}\n\n## Top\n\n### Deep\n", RenderTarget::Embedded);
        assert!(out.contains("* [Deep](#deep)"));
        assert!(!out.contains("* [Top]"));
    }

    #[test]
    fn test_entities_resolved_last() {
        assert_eq!(
            expand("Hit {{return}} then {% kbd {{esc}} %}", RenderTarget::Web),
            r#"Hit &#9166; then <kbd class="single">&#9099;</kbd>"#
        );
    }

    #[test]
    fn test_annotation_hides_directives() {
        assert_eq!(
            expand("a{>> {% apponly %} <<}b", RenderTarget::Web),
            "ab"
        );
    }

    #[test]
    fn test_warnings_collected() {
        let mut processor = DirectiveProcessor::new(RenderTarget::Web);
        processor.process("{% browseronly %}never closed");
        assert_eq!(
            processor.warnings(),
            ["unclosed block directive `{% browseronly %}`"]
        );
    }
}
