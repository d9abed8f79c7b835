//! Per-page and per-stage build progress.

use std::path::Path;

/// A build step, reported before it runs unless noted otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress<'p> {
    /// A page is about to be built or compiled. `position` is 1-based.
    Page {
        position: usize,
        total: usize,
        title: &'p str,
    },
    /// The search index was written.
    SearchIndex { path: &'p Path, pages: usize },
    /// The flat keyword listing was written into every output directory.
    FullIndex { entries: usize },
    /// The compiled print document was written.
    Compiled { path: &'p Path },
    /// The print command is about to run.
    PrintCommand { program: &'p str },
}

/// Callback receiving [`Progress`] events.
pub type ProgressFn<'a> = dyn Fn(Progress<'_>) + 'a;
