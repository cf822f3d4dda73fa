//! Colored terminal output utilities.

use console::{Style, Term};
use spectext_bundle::PageIssue;

/// Terminal output formatter.
///
/// Everything goes to stderr; stdout is left free for piping.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    fn write_styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.write_styled(&self.green, msg);
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.write_styled(&self.yellow, msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.write_styled(&self.red, msg);
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        self.write_styled(&self.cyan_bold, msg);
    }

    /// Print a skipped page line: missing in yellow, unreadable in red.
    pub(crate) fn page_issue(&self, issue: &PageIssue, line: &str) {
        let line = format!("  {line}");
        match issue {
            PageIssue::Missing { .. } => self.warning(&line),
            PageIssue::Unreadable { .. } => self.error(&line),
        }
    }

    /// Print a dimmed separator line.
    pub(crate) fn separator(&self) {
        self.write_styled(&self.dim, &"-".repeat(60));
    }
}
