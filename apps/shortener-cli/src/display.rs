use std::io::Write;

use domain::DisplaySink;

/// Renders into stdout, one render per line block. Logs go to stderr, so
/// stdout only ever carries what the output element would show.
pub struct TerminalDisplay;

impl DisplaySink for TerminalDisplay {
    fn show(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to write to stdout");
        }
    }
}
