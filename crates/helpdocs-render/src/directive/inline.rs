//! Single-tag directive expansion: `{% name args %}`.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::parser::INLINE_TAG_RE;
use super::{DirectiveArgs, DirectiveKind, DirectiveOutput};
use crate::kbd::format_keys;
use crate::target::RenderTarget;

static MENU_KEYS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\((.*?)\)$").unwrap());

/// Expand every single-tag directive in `text`. Unknown directives stay verbatim.
pub(crate) fn expand_inline(text: &str, target: RenderTarget) -> String {
    INLINE_TAG_RE
        .replace_all(text, |caps: &Captures| {
            let args = DirectiveArgs::new(&caps[1], &caps[2]);
            let mut out = String::new();
            expand_tag(&args, target).write_to(&mut out, &caps[0]);
            out
        })
        .into_owned()
}

fn expand_tag(args: &DirectiveArgs, target: RenderTarget) -> DirectiveOutput {
    match args.kind() {
        DirectiveKind::Suppressed => DirectiveOutput::Remove,
        DirectiveKind::PrefPane => DirectiveOutput::Replace(prefs_pane(&args.params, target)),
        DirectiveKind::Kbd => DirectiveOutput::Replace(format_keys(&args.params, target)),
        DirectiveKind::Menu => DirectiveOutput::Replace(menu_path(&args.params, target)),
        DirectiveKind::Visibility | DirectiveKind::Unknown => DirectiveOutput::Skip,
    }
}

/// Link to a preference pane: a page per pane for embedded and print output,
/// an in-page anchor for the web.
fn prefs_pane(name: &str, target: RenderTarget) -> String {
    let slug = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    let link = match target {
        RenderTarget::Web => format!("#prefs{slug}"),
        RenderTarget::Embedded | RenderTarget::Print => format!("preferences-{slug}.html"),
    };
    format!(r#"<span class="appmenu">**Preferences**▸[**{name}**]({link}) pane</span>"#)
}

/// Menu path such as `File,Export,PDF ({{cmd}}E)`.
fn menu_path(params: &str, target: RenderTarget) -> String {
    let (path, keys) = match MENU_KEYS_RE.captures(params) {
        Some(caps) => {
            let start = caps.get(0).map_or(params.len(), |m| m.start());
            (&params[..start], Some(format_keys(&caps[1], target)))
        }
        None => (params, None),
    };

    let mut segments = path.split(',').map(str::trim);
    let top = segments.next().unwrap_or_default();
    let mut out = format!(r#"<span class="appmenu">**{top}**"#);
    for segment in segments {
        if target == RenderTarget::Print {
            let _ = write!(out, " *{segment}*");
        } else {
            out.push('▸');
            out.push_str(segment);
        }
    }
    out.push_str("</span>");
    if let Some(keys) = keys {
        let _ = write!(out, " ({keys})");
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_prefs_pane_web_anchor() {
        assert_eq!(
            expand_inline("{% prefspane Sync Options %}", RenderTarget::Web),
            r#"<span class="appmenu">**Preferences**▸[**Sync Options**](#prefssync-options) pane</span>"#
        );
    }

    #[test]
    fn test_prefs_pane_embedded_page() {
        assert_eq!(
            expand_inline("{% prefpane General %}", RenderTarget::Embedded),
            r#"<span class="appmenu">**Preferences**▸[**General**](preferences-general.html) pane</span>"#
        );
    }

    #[test]
    fn test_menu_web() {
        assert_eq!(
            expand_inline("{% menu File,Export,PDF %}", RenderTarget::Web),
            r#"<span class="appmenu">**File**▸Export▸PDF</span>"#
        );
    }

    #[test]
    fn test_menu_print() {
        assert_eq!(
            expand_inline("{% appmenu File, Export %}", RenderTarget::Print),
            r#"<span class="appmenu">**File** *Export*</span>"#
        );
    }

    #[test]
    fn test_menu_with_keys() {
        assert_eq!(
            expand_inline("{% menu File,Save ({{cmd}}S) %}", RenderTarget::Print),
            "<span class=\"appmenu\">**File** *Save*</span> (`\u{2318}S`)"
        );
    }

    #[test]
    fn test_kbd_uses_target() {
        assert_eq!(
            expand_inline("Press {% kbd {{cmd}}S %}.", RenderTarget::Print),
            "Press `\u{2318}S`."
        );
    }

    #[test]
    fn test_suppressed_and_orphan_end_removed() {
        assert_eq!(
            expand_inline("a{% note check this %}b{% endnote x %}c", RenderTarget::Web),
            "abc"
        );
    }

    #[test]
    fn test_unknown_left_verbatim() {
        let text = "{% youtube abc123 %} and {% apponly div %}";
        assert_eq!(expand_inline(text, RenderTarget::Web), text);
    }
}
