//! Code fence tracking for heading scans.
//!
//! Headings inside fenced code blocks are not headings once the page is
//! converted, so the heading scanner must not count them either.

/// Tracks whether a line-by-line scan is inside a fenced code block.
///
/// Fences use three or more backticks or tildes. A fence closes on a line of
/// the same character that is at least as long as the opening run.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` when the line opens or closes a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some((ch, len)) = fence_run(line.trim_start()) else {
            return false;
        };
        match self.open {
            None => {
                self.open = Some((ch, len));
                true
            }
            Some((open_ch, open_len)) => {
                let rest = &line.trim_start()[len * ch.len_utf8()..];
                if ch == open_ch && len >= open_len && rest.trim().is_empty() {
                    self.open = None;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Leading run of fence characters, if it is long enough to be a fence.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_fence() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("```rust"));
        assert!(tracker.in_fence());
        assert!(!tracker.update("## not a heading"));
        assert!(tracker.update("```"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_shorter_or_mismatched_fence_does_not_close() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("````"));
        assert!(!tracker.update("```"));
        assert!(!tracker.update("~~~~"));
        assert!(tracker.in_fence());
        assert!(tracker.update("`````"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_closing_fence_with_info_string_does_not_close() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("~~~"));
        assert!(!tracker.update("~~~ text"));
        assert!(tracker.in_fence());
    }

    #[test]
    fn test_inline_code_is_not_a_fence() {
        let mut tracker = FenceTracker::new();
        assert!(!tracker.update("``inline``"));
        assert!(!tracker.in_fence());
    }
}
