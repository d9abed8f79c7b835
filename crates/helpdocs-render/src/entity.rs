//! Entity token resolution.
//!
//! Authors write key names as `{{token}}` placeholders. Tokens resolve against
//! a fixed, case-insensitive dictionary with aliases (`{{cmd}}`, `{{command}}`
//! and `{{clover}}` all produce the command key glyph). Unknown tokens are
//! written back as `{{token}}` so they stay visible in the output.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static ENTITY_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").unwrap());

static NUMERIC_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d+);").unwrap());

/// A symbolic key glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    name: &'static str,
    symbol: char,
}

impl Glyph {
    pub const APPLE: Self = Self::new("apple", '\u{F8FF}');
    pub const COMMAND: Self = Self::new("command", '\u{2318}');
    pub const CONTROL: Self = Self::new("control", '\u{2303}');
    pub const OPTION: Self = Self::new("option", '\u{2325}');
    pub const SHIFT: Self = Self::new("shift", '\u{21E7}');
    pub const TAB: Self = Self::new("tab", '\u{21E5}');
    pub const CAPS_LOCK: Self = Self::new("capslock", '\u{21EA}');
    pub const EJECT: Self = Self::new("eject", '\u{23CF}');
    pub const RETURN: Self = Self::new("return", '\u{23CE}');
    pub const ENTER: Self = Self::new("enter", '\u{2324}');
    pub const DELETE: Self = Self::new("delete", '\u{232B}');
    pub const FORWARD_DELETE: Self = Self::new("fwddelete", '\u{2326}');
    pub const ESCAPE: Self = Self::new("escape", '\u{238B}');
    pub const RIGHT: Self = Self::new("right", '\u{2192}');
    pub const LEFT: Self = Self::new("left", '\u{2190}');
    pub const UP: Self = Self::new("up", '\u{2191}');
    pub const DOWN: Self = Self::new("down", '\u{2193}');
    pub const PAGE_UP: Self = Self::new("pgup", '\u{21DE}');
    pub const PAGE_DOWN: Self = Self::new("pgdn", '\u{21DF}');
    pub const HOME: Self = Self::new("home", '\u{2196}');
    pub const END: Self = Self::new("end", '\u{2198}');
    pub const CLEAR: Self = Self::new("clear", '\u{2327}');
    pub const GEAR: Self = Self::new("gear", '\u{2699}');

    const fn new(name: &'static str, symbol: char) -> Self {
        Self { name, symbol }
    }

    /// Canonical key name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.name
    }

    /// Unicode character for the glyph.
    #[must_use]
    pub fn symbol(self) -> char {
        self.symbol
    }

    /// Numeric HTML entity, e.g. `&#8984;`.
    #[must_use]
    pub fn entity(self) -> String {
        format!("&#{};", u32::from(self.symbol))
    }

    /// Whether this glyph is a modifier key (command, shift, control, option).
    #[must_use]
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::COMMAND | Self::SHIFT | Self::CONTROL | Self::OPTION
        )
    }

    /// Look up a token name. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use helpdocs_render::Glyph;
    ///
    /// assert_eq!(Glyph::lookup("Clover"), Some(Glyph::COMMAND));
    /// assert_eq!(Glyph::lookup("hyper"), None);
    /// ```
    #[must_use]
    pub fn lookup(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        let glyph = match token.as_str() {
            "apple" => Self::APPLE,
            "comm" | "command" | "cmd" | "clover" => Self::COMMAND,
            "cont" | "control" | "ctl" | "ctrl" => Self::CONTROL,
            "opt" | "option" | "alt" => Self::OPTION,
            "shift" => Self::SHIFT,
            "tab" => Self::TAB,
            "caps" | "capslock" => Self::CAPS_LOCK,
            "eject" => Self::EJECT,
            "return" => Self::RETURN,
            "enter" => Self::ENTER,
            "del" | "delete" | "back" | "backspace" => Self::DELETE,
            "fwddel" | "fwddelete" => Self::FORWARD_DELETE,
            "esc" | "escape" => Self::ESCAPE,
            "r" | "right" => Self::RIGHT,
            "l" | "left" => Self::LEFT,
            "u" | "up" => Self::UP,
            "d" | "down" => Self::DOWN,
            "pgup" => Self::PAGE_UP,
            "pgdn" => Self::PAGE_DOWN,
            "home" => Self::HOME,
            "end" => Self::END,
            "clear" => Self::CLEAR,
            "gear" => Self::GEAR,
            _ => return None,
        };
        Some(glyph)
    }

    fn from_code(code: u32) -> Option<Self> {
        ALL_GLYPHS
            .iter()
            .copied()
            .find(|glyph| u32::from(glyph.symbol) == code)
    }
}

const ALL_GLYPHS: [Glyph; 23] = [
    Glyph::APPLE,
    Glyph::COMMAND,
    Glyph::CONTROL,
    Glyph::OPTION,
    Glyph::SHIFT,
    Glyph::TAB,
    Glyph::CAPS_LOCK,
    Glyph::EJECT,
    Glyph::RETURN,
    Glyph::ENTER,
    Glyph::DELETE,
    Glyph::FORWARD_DELETE,
    Glyph::ESCAPE,
    Glyph::RIGHT,
    Glyph::LEFT,
    Glyph::UP,
    Glyph::DOWN,
    Glyph::PAGE_UP,
    Glyph::PAGE_DOWN,
    Glyph::HOME,
    Glyph::END,
    Glyph::CLEAR,
    Glyph::GEAR,
];

/// Render a single token as an HTML entity, or as `{{token}}` when unknown.
#[must_use]
pub fn render_token(token: &str) -> String {
    match Glyph::lookup(token) {
        Some(glyph) => glyph.entity(),
        None => format!("{{{{{}}}}}", token.trim()),
    }
}

/// Resolve every `{{token}}` placeholder in `text`.
///
/// # Example
///
/// ```
/// use helpdocs_render::resolve_entities;
///
/// assert_eq!(resolve_entities("Press {{ESC}}"), "Press &#9099;");
/// assert_eq!(resolve_entities("{{hyper}}"), "{{hyper}}");
/// ```
#[must_use]
pub fn resolve_entities(text: &str) -> String {
    ENTITY_TOKEN_RE
        .replace_all(text, |caps: &Captures| render_token(&caps[1]))
        .into_owned()
}

/// Replace numeric entities of known key glyphs with their Unicode characters.
///
/// Used for print output, where glyphs often land inside code spans that do
/// not decode entities. Other entities are left alone.
#[must_use]
pub fn symbolify(text: &str) -> Cow<'_, str> {
    NUMERIC_ENTITY_RE.replace_all(text, |caps: &Captures| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(Glyph::from_code)
            .map_or_else(|| caps[0].to_owned(), |glyph| glyph.symbol.to_string())
    })
}
