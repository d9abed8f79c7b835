//! Colored status lines on stderr.

use console::{Style, Term};
use helpdocs_build::Progress;

/// Terminal output formatter.
///
/// Everything goes to stderr so `helpdocs expand` can keep stdout for the
/// expanded markdown.
pub(crate) struct Output {
    term: Term,
    success: Style,
    warning: Style,
    error: Style,
    label: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            label: Style::new().cyan().bold(),
        }
    }

    fn line(&self, msg: &str) {
        // A closed stderr leaves nowhere to report the failure.
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.success.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warning.apply_to(msg).to_string());
    }

    /// Print directive warnings, one per line.
    pub(crate) fn warnings(&self, warnings: &[String]) {
        for warning in warnings {
            self.warning(&format!("warning: {warning}"));
        }
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.error.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        self.line(&self.label.apply_to(msg).to_string());
    }

    /// Print a step: highlighted label, then plain detail.
    pub(crate) fn step(&self, label: &str, detail: &str) {
        self.line(&format!("{} {detail}", self.label.apply_to(label)));
    }

    /// Print one build progress event as an indented step.
    pub(crate) fn progress(&self, event: Progress<'_>) {
        let (label, detail) = describe(event);
        self.step(label, &detail);
    }
}

fn describe(event: Progress<'_>) -> (&'static str, String) {
    match event {
        Progress::Page {
            position,
            total,
            title,
        } => ("  Page", format!("[{position}/{total}] {title}")),
        Progress::SearchIndex { path, pages } => {
            ("  Index", format!("{} ({pages} pages)", path.display()))
        }
        Progress::FullIndex { entries } => ("  Listing", format!("{entries} entries")),
        Progress::Compiled { path } => ("  Compiled", path.display().to_string()),
        Progress::PrintCommand { program } => ("  Running", program.to_owned()),
    }
}
