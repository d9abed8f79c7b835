//! Block directive expansion: `{% name params %} body {% endname %}`.
//!
//! Each open tag is paired with the nearest close tag of the same name, so
//! same-name nesting is not supported. Bodies of kept blocks are expanded
//! again, which lets differently-named blocks nest. An open tag with no close
//! is left in place for the single-tag pass.

use super::parser::{find_close_tag, next_open_tag};
use super::{DirectiveArgs, DirectiveKind, DirectiveOutput};

/// Expand every block directive in `text`.
///
/// Unclosed visibility tags are reported through `warnings`.
pub(crate) fn expand_blocks(text: &str, warnings: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(open) = next_open_tag(text, pos) {
        let Some(close) = find_close_tag(text, &open.args.name, open.range.end) else {
            if open.args.kind() == DirectiveKind::Visibility {
                tracing::debug!(directive = %open.args.name, offset = open.range.start, "Unclosed block directive");
                warnings.push(format!(
                    "unclosed block directive `{{% {} %}}`",
                    open.args.name
                ));
            }
            pos = open.range.end;
            continue;
        };

        out.push_str(&text[copied..open.range.start]);
        let body = &text[open.range.end..close.start];
        expand_block(&open.args, body, warnings)
            .write_to(&mut out, &text[open.range.start..close.end]);
        copied = close.end;
        pos = close.end;
    }

    out.push_str(&text[copied..]);
    out
}

fn expand_block(args: &DirectiveArgs, body: &str, warnings: &mut Vec<String>) -> DirectiveOutput {
    match args.kind() {
        DirectiveKind::Suppressed => DirectiveOutput::Remove,
        DirectiveKind::Visibility => {
            let body = expand_blocks(body, warnings);
            DirectiveOutput::Replace(wrap_visibility(args, &body))
        }
        _ => DirectiveOutput::Replace(expand_blocks(body, warnings)),
    }
}

/// Wrap a block body in its visibility element.
fn wrap_visibility(args: &DirectiveArgs, body: &str) -> String {
    let (tag, class) = if args.name.eq_ignore_ascii_case("class") {
        ("span", args.params.as_str())
    } else {
        (args.params_or("span"), args.name.as_str())
    };
    let pad = if tag.contains("div") { "\n\n" } else { "" };
    format!(r#"<{tag} class="{class}">{pad}{body}{pad}</{tag}>"#)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn expand(text: &str) -> String {
        expand_blocks(text, &mut Vec::new())
    }

    #[test]
    fn test_apponly_default_span() {
        assert_eq!(
            expand("A {% apponly %}Quit{% endapponly %} B"),
            r#"A <span class="apponly">Quit</span> B"#
        );
    }

    #[test]
    fn test_div_container_padded() {
        assert_eq!(
            expand("{% browseronly div %}Install it.{% endbrowseronly %}"),
            "<div class=\"browseronly\">\n\nInstall it.\n\n</div>"
        );
    }

    #[test]
    fn test_class_uses_params_as_classes() {
        assert_eq!(
            expand("{% class tip wide %}x{% endclass %}"),
            r#"<span class="tip wide">x</span>"#
        );
    }

    #[test]
    fn test_suppressed_blocks_removed_with_body() {
        assert_eq!(expand("a{% todo %}fix\nthis{% endtodo %}b"), "ab");
        assert_eq!(expand("a{% Comment %}x{% ENDCOMMENT %}b"), "ab");
    }

    #[test]
    fn test_unknown_block_passes_body() {
        assert_eq!(expand("{% aside %}text{% endaside %}"), "text");
    }

    #[test]
    fn test_nested_different_names() {
        assert_eq!(
            expand("{% apponly %}a{% note %}n{% endnote %}b{% endapponly %}"),
            r#"<span class="apponly">ab</span>"#
        );
    }

    #[test]
    fn test_same_name_nesting_uses_nearest_close() {
        assert_eq!(
            expand("{% apponly %}a{% apponly %}b{% endapponly %}c{% endapponly %}"),
            r#"<span class="apponly">a{% apponly %}b</span>c{% endapponly %}"#
        );
    }

    #[test]
    fn test_unclosed_tag_left_in_place_with_warning() {
        let mut warnings = Vec::new();
        let out = expand_blocks("{% apponly %}dangling {% kbd F1 %}", &mut warnings);
        assert_eq!(out, "{% apponly %}dangling {% kbd F1 %}");
        assert_eq!(warnings, vec!["unclosed block directive `{% apponly %}`"]);
    }

    #[test]
    fn test_inline_tags_untouched() {
        assert_eq!(expand("Press {% kbd {{cmd}}S %}."), "Press {% kbd {{cmd}}S %}.");
    }
}
