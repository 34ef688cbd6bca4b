//! Terminal output utilities for styled CLI output.

use console::{Term, style};
use qrgen_business::{Notice, Notifier, QrResult};
use std::fmt::Display;

/// Terminal output helper for consistent styled output.
#[derive(Clone)]
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Print a success message with a green checkmark.
    pub fn success(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("✓").green().bold(), message)),
        );
    }

    /// Print an error message with a red X.
    pub fn error(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("✗").red().bold(), message)),
        );
    }

    /// Print a warning message with a yellow warning sign.
    pub fn warning(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("⚠").yellow().bold(), message)),
        );
    }

    pub fn print(&self, message: impl Display) {
        drop(self.term.write_line(&message.to_string()));
    }

    pub fn newline(&self) {
        drop(self.term.write_line(""));
    }

    pub fn header(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&style(message).bold().cyan().to_string()),
        );
    }

    pub fn dim(&self, message: impl Display) {
        drop(self.term.write_line(&style(message).dim().to_string()));
    }

    /// Print a labeled value with indentation.
    pub fn labeled_indent(&self, label: impl Display, value: impl Display, indent: usize) {
        let spaces = " ".repeat(indent);
        drop(
            self.term
                .write_line(&format!("{spaces}{}: {}", style(label).dim(), value)),
        );
    }

    /// Print the title and truncated URL of a generated code.
    pub fn result_summary(&self, result: &QrResult) {
        if result.payload.has_title() {
            self.header(result.payload.title());
        }
        self.labeled_indent("URL", result.payload.display_url(), 2);
        self.labeled_indent(
            "Size",
            format!("{}x{}", result.surface.width(), result.surface.height()),
            2,
        );
    }
}

/// Shows export notices on the terminal.
#[derive(Clone, Default)]
pub struct ConsoleNotifier {
    out: Output,
}

impl ConsoleNotifier {
    pub fn new(out: Output) -> Self {
        Self { out }
    }
}

impl Notifier for ConsoleNotifier {
    fn alert(&self, notice: Notice) {
        if notice.is_error() {
            self.out.error(notice);
        } else {
            self.out.warning(notice);
        }
    }
}
