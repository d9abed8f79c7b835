//! Render targets.
//!
//! Every expansion call is parameterized by the [`RenderTarget`] the page is
//! being produced for. The target decides how preference pane links are
//! resolved, whether key combos use rich markup or compact code spans, and
//! whether a table of contents is inlined into the page.

use std::fmt;
use std::str::FromStr;

/// Output mode for directive expansion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    /// Web page. Navigation lives in a sidebar, so TOC markers are dropped.
    #[default]
    Web,
    /// Embedded help viewer bundled with an application.
    Embedded,
    /// Single compiled document handed to an external print converter.
    Print,
}

impl RenderTarget {
    /// All targets in build order.
    pub const ALL: [Self; 3] = [Self::Web, Self::Embedded, Self::Print];

    /// Lower-case name used in configuration and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Embedded => "embedded",
            Self::Print => "print",
        }
    }

    /// Whether a table of contents is rendered into the page body.
    #[must_use]
    pub fn inlines_toc(self) -> bool {
        !matches!(self, Self::Web)
    }

    /// Whether key combos render as compact code spans instead of `<kbd>` markup.
    #[must_use]
    pub fn compact_keys(self) -> bool {
        matches!(self, Self::Print)
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown target name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown render target `{0}` (expected web, embedded or print)")]
pub struct ParseTargetError(String);

impl FromStr for RenderTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "embedded" | "help" => Ok(Self::Embedded),
            "print" | "pdf" => Ok(Self::Print),
            _ => Err(ParseTargetError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("web".parse(), Ok(RenderTarget::Web));
        assert_eq!("Help".parse(), Ok(RenderTarget::Embedded));
        assert_eq!("pdf".parse(), Ok(RenderTarget::Print));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "epub".parse::<RenderTarget>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown render target `epub` (expected web, embedded or print)"
        );
    }

    #[test]
    fn test_display_round_trips_names() {
        for target in RenderTarget::ALL {
            assert_eq!(target.to_string().parse(), Ok(target));
        }
    }

    #[test]
    fn test_mode_switches() {
        assert!(!RenderTarget::Web.inlines_toc());
        assert!(RenderTarget::Embedded.inlines_toc());
        assert!(RenderTarget::Print.compact_keys());
        assert!(!RenderTarget::Embedded.compact_keys());
    }
}
