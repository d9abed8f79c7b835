//! Directive output types.

/// Result of expanding one directive.
///
/// - [`Replace`](Self::Replace): substitute the directive (and body) with text
/// - [`Remove`](Self::Remove): drop the directive (and body)
/// - [`Skip`](Self::Skip): leave the directive source untouched
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    Replace(String),
    Remove,
    Skip,
}

impl DirectiveOutput {
    /// Append the expansion to `out`, falling back to `source` for [`Skip`](Self::Skip).
    pub(crate) fn write_to(self, out: &mut String, source: &str) {
        match self {
            Self::Replace(text) => out.push_str(&text),
            Self::Remove => {}
            Self::Skip => out.push_str(source),
        }
    }
}
