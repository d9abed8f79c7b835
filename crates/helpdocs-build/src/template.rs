//! Minimal HTML shell around converted page bodies.
//!
//! The only contract is the `#content` region the search index reads.

use std::fmt::Write;

use helpdocs_render::RenderTarget;
use helpdocs_search::{CONTENT_ID, escape_html};

/// Data for rendering one output page.
pub(crate) struct PageShell<'a> {
    pub title: &'a str,
    pub project: &'a str,
    pub target: RenderTarget,
    pub body: &'a str,
}

/// Render a complete HTML page.
pub(crate) fn render_page(page: &PageShell<'_>) -> String {
    let mut html = String::with_capacity(page.body.len() + 512);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\" />\n");
    let _ = writeln!(
        html,
        "<title>{} - {}</title>",
        escape_html(page.title),
        escape_html(page.project)
    );
    html.push_str("</head>\n");
    let _ = writeln!(html, "<body class=\"{}\">", page.target);
    let _ = writeln!(html, "<div id=\"{CONTENT_ID}\">");
    html.push_str(page.body);
    if !page.body.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_page_wraps_body_in_content_region() {
        let html = render_page(&PageShell {
            title: "Syncing",
            project: "nvUltra",
            target: RenderTarget::Embedded,
            body: "<p>Hello</p>\n",
        });
        assert!(html.contains("<title>Syncing - nvUltra</title>"));
        assert!(html.contains("<body class=\"embedded\">"));
        assert!(html.contains("<div id=\"content\">\n<p>Hello</p>\n</div>"));
    }

    #[test]
    fn render_page_escapes_titles() {
        let html = render_page(&PageShell {
            title: "Q&A",
            project: "<Notes>",
            target: RenderTarget::Web,
            body: "",
        });
        assert!(html.contains("<title>Q&amp;A - &lt;Notes&gt;</title>"));
    }
}
