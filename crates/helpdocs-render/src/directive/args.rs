//! Directive names and parameters.

/// Directive families recognized by the expander.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `apponly`, `browseronly` and `class`: wrap content in a tagged element.
    Visibility,
    /// `note`, `notes`, `comment`, `todo`, `fixme` and their `end…` forms.
    Suppressed,
    /// `prefspane` / `prefpane`.
    PrefPane,
    /// `kbd`.
    Kbd,
    /// `menu` / `appmenu`.
    Menu,
    Unknown,
}

const SUPPRESSED: [&str; 5] = ["note", "notes", "comment", "todo", "fixme"];

impl DirectiveKind {
    /// Classify a directive name. Matching is exact and case-insensitive.
    #[must_use]
    pub fn of(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        let bare = name.strip_prefix("end").unwrap_or(&name);
        if SUPPRESSED.contains(&bare) {
            return Self::Suppressed;
        }
        match name.as_str() {
            "apponly" | "browseronly" | "class" => Self::Visibility,
            "prefspane" | "prefpane" => Self::PrefPane,
            "kbd" => Self::Kbd,
            "menu" | "appmenu" => Self::Menu,
            _ => Self::Unknown,
        }
    }
}

/// Name and parameter string of a `{% name params %}` tag.
///
/// # Example
///
/// ```
/// use helpdocs_render::directive::{DirectiveArgs, DirectiveKind};
///
/// let args = DirectiveArgs::new("apponly", " div ");
/// assert_eq!(args.params, "div");
/// assert_eq!(args.kind(), DirectiveKind::Visibility);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Directive name as written.
    pub name: String,
    /// Trimmed parameter text (may be empty).
    pub params: String,
}

impl DirectiveArgs {
    #[must_use]
    pub fn new(name: &str, params: &str) -> Self {
        Self {
            name: name.to_owned(),
            params: params.trim().to_owned(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DirectiveKind {
        DirectiveKind::of(&self.name)
    }

    /// Parameters, or `default` when none were given.
    #[must_use]
    pub fn params_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.params.is_empty() {
            default
        } else {
            &self.params
        }
    }
}
