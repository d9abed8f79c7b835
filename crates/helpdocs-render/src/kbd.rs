//! Keyboard combo formatting.
//!
//! A key spec such as `{{cmd}}{{shift}}L` is either a *combo* (one or more
//! `{{word}}` tokens followed by a literal key) or a *single* key. Combos are
//! tokenized into [`KeyToken`]s and rendered per target: rich `<kbd>` markup
//! for web and embedded help, a compact code span for print.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::entity::{Glyph, render_token};
use crate::target::RenderTarget;

static COMBO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\{\{[a-z]+\}\})+[a-z0-9[:punct:]=]").unwrap());

static KEY_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\{\{([a-z]+)\}\}|[a-z0-9[:punct:]=]").unwrap());

static SINGLE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").unwrap());

/// One element of a key combo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyToken {
    /// Modifier key such as command or shift.
    Modifier(Glyph),
    /// Any other `{{word}}` token, kept as written.
    Named(String),
    /// Literal key character.
    Key(char),
    /// `/` or `-` between keys, rendered unstyled.
    Separator(char),
}

/// A parsed key spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyCombo {
    Combo(Vec<KeyToken>),
    Single(String),
}

impl KeyCombo {
    /// Parse a key spec.
    ///
    /// # Example
    ///
    /// ```
    /// use helpdocs_render::{Glyph, KeyCombo, KeyToken};
    ///
    /// let combo = KeyCombo::parse("{{cmd}}{{shift}}L");
    /// assert_eq!(
    ///     combo,
    ///     KeyCombo::Combo(vec![
    ///         KeyToken::Modifier(Glyph::COMMAND),
    ///         KeyToken::Modifier(Glyph::SHIFT),
    ///         KeyToken::Key('L'),
    ///     ])
    /// );
    /// ```
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        if !COMBO_RE.is_match(spec) {
            return Self::Single(spec.to_owned());
        }

        let matches: Vec<Captures> = KEY_TOKEN_RE.captures_iter(spec).collect();
        let last = matches.len().saturating_sub(1);
        let tokens = matches
            .iter()
            .enumerate()
            .map(|(i, caps)| match caps.get(1) {
                Some(word) => Glyph::lookup(word.as_str())
                    .filter(|glyph| glyph.is_modifier())
                    .map_or_else(|| KeyToken::Named(word.as_str().to_owned()), KeyToken::Modifier),
                None => {
                    let ch = caps[0].chars().next().unwrap_or_default();
                    if i < last && matches!(ch, '/' | '-') {
                        KeyToken::Separator(ch)
                    } else {
                        KeyToken::Key(ch)
                    }
                }
            })
            .collect();
        Self::Combo(tokens)
    }

    /// Render for the given target.
    #[must_use]
    pub fn render(&self, target: RenderTarget) -> String {
        if target.compact_keys() {
            self.render_compact()
        } else {
            self.render_rich()
        }
    }

    fn render_rich(&self) -> String {
        match self {
            Self::Single(keys) => format!(r#"<kbd class="single">{keys}</kbd>"#),
            Self::Combo(tokens) => {
                let mut out = String::from(r#"<span class="keycombo">"#);
                for token in tokens {
                    let _ = match token {
                        KeyToken::Modifier(glyph) => {
                            write!(out, r#"<kbd class="modifierkey">{}</kbd>"#, glyph.entity())
                        }
                        KeyToken::Named(word) => write!(out, "<kbd>{}</kbd>", render_token(word)),
                        KeyToken::Key(ch) => write!(out, "<kbd>{}</kbd>", ch.to_ascii_uppercase()),
                        KeyToken::Separator(ch) => write!(out, "{ch}"),
                    };
                }
                out.push_str("</span>");
                out
            }
        }
    }

    fn render_compact(&self) -> String {
        match self {
            Self::Single(keys) => {
                let keys = SINGLE_TOKEN_RE.replace_all(keys, |caps: &Captures| glyph_char(&caps[1]));
                format!("`{keys}`")
            }
            Self::Combo(tokens) => {
                let mut out = String::from("`");
                for token in tokens {
                    match token {
                        KeyToken::Modifier(glyph) => out.push(glyph.symbol()),
                        KeyToken::Named(word) => out.push_str(&glyph_char(word)),
                        KeyToken::Key(ch) => out.push(ch.to_ascii_uppercase()),
                        KeyToken::Separator(_) => {}
                    }
                }
                out.push('`');
                out
            }
        }
    }
}

fn glyph_char(token: &str) -> String {
    Glyph::lookup(token).map_or_else(
        || format!("{{{{{}}}}}", token.trim()),
        |glyph| glyph.symbol().to_string(),
    )
}

/// Parse and render a key spec in one step.
///
/// # Example
///
/// ```
/// use helpdocs_render::{RenderTarget, format_keys};
///
/// assert_eq!(format_keys("{{cmd}}S", RenderTarget::Print), "`\u{2318}S`");
/// assert_eq!(format_keys("F1", RenderTarget::Web), r#"<kbd class="single">F1</kbd>"#);
/// ```
#[must_use]
pub fn format_keys(spec: &str, target: RenderTarget) -> String {
    KeyCombo::parse(spec).render(target)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_combo_rich() {
        assert_eq!(
            format_keys("{{cmd}}{{shift}}L", RenderTarget::Web),
            concat!(
                r#"<span class="keycombo">"#,
                r#"<kbd class="modifierkey">&#8984;</kbd>"#,
                r#"<kbd class="modifierkey">&#8679;</kbd>"#,
                "<kbd>L</kbd></span>"
            )
        );
    }

    #[test]
    fn test_combo_compact() {
        assert_eq!(
            format_keys("{{cmd}}{{shift}}L", RenderTarget::Print),
            "`\u{2318}\u{21E7}L`"
        );
    }

    #[test]
    fn test_lowercase_key_is_uppercased() {
        assert_eq!(
            format_keys("{{ctrl}}c", RenderTarget::Embedded),
            r#"<span class="keycombo"><kbd class="modifierkey">&#8963;</kbd><kbd>C</kbd></span>"#
        );
    }

    #[test]
    fn test_named_tokens_render_as_keys() {
        assert_eq!(
            KeyCombo::parse("{{opt}}{{tab}}1"),
            KeyCombo::Combo(vec![
                KeyToken::Modifier(Glyph::OPTION),
                KeyToken::Named("tab".to_owned()),
                KeyToken::Key('1'),
            ])
        );
        assert_eq!(
            format_keys("{{opt}}{{tab}}1", RenderTarget::Web),
            concat!(
                r#"<span class="keycombo"><kbd class="modifierkey">&#8997;</kbd>"#,
                "<kbd>&#8677;</kbd><kbd>1</kbd></span>"
            )
        );
    }

    #[test]
    fn test_separator_in_middle_passes_through() {
        let combo = KeyCombo::parse("{{cmd}}1-9");
        assert_eq!(
            combo,
            KeyCombo::Combo(vec![
                KeyToken::Modifier(Glyph::COMMAND),
                KeyToken::Key('1'),
                KeyToken::Separator('-'),
                KeyToken::Key('9'),
            ])
        );
        assert_eq!(
            combo.render(RenderTarget::Web),
            r#"<span class="keycombo"><kbd class="modifierkey">&#8984;</kbd><kbd>1</kbd>-<kbd>9</kbd></span>"#
        );
        assert_eq!(combo.render(RenderTarget::Print), "`\u{2318}19`");
    }

    #[test]
    fn test_trailing_dash_is_a_key() {
        assert_eq!(
            KeyCombo::parse("{{cmd}}-"),
            KeyCombo::Combo(vec![KeyToken::Modifier(Glyph::COMMAND), KeyToken::Key('-')])
        );
    }

    #[test]
    fn test_whitespace_between_tokens_skipped() {
        assert_eq!(
            KeyCombo::parse("{{cmd}}K {{cmd}}B"),
            KeyCombo::Combo(vec![
                KeyToken::Modifier(Glyph::COMMAND),
                KeyToken::Key('K'),
                KeyToken::Modifier(Glyph::COMMAND),
                KeyToken::Key('B'),
            ])
        );
    }

    #[test]
    fn test_single_key() {
        assert_eq!(KeyCombo::parse("Space"), KeyCombo::Single("Space".to_owned()));
        assert_eq!(
            format_keys("{{esc}}", RenderTarget::Web),
            r#"<kbd class="single">{{esc}}</kbd>"#
        );
        assert_eq!(format_keys("{{esc}}", RenderTarget::Print), "`\u{238B}`");
        assert_eq!(format_keys("{{hyper}}", RenderTarget::Print), "`{{hyper}}`");
    }
}
