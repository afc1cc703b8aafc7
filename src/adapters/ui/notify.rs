//! Implements NotificationPort: prints the diagnostic in red to stderr.

use crate::domain::Diagnostic;
use crate::ports::NotificationPort;
use crossterm::style::Stylize;
use tracing::warn;

#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationPort for TerminalNotifier {
    fn notify_error(&self, diagnostic: &Diagnostic) {
        warn!(diagnostic = %diagnostic, "operation failed");
        eprintln!("{} {}", "✖ Operation failed:".red().bold(), diagnostic);
    }
}
