use std::fmt::{self, Display};

use colored::Colorize;

/// Accumulates the human-readable trace of a decoded sequence, one line per field.
///
/// Lines are kept even when decoding fails halfway through an operation, so callers always get
/// everything rendered before the failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceRenderer {
    lines: Vec<String>,
}

impl TraceRenderer {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append the blank line that separates two operations.
    pub fn separator(&mut self) {
        self.lines.push(String::new());
    }

    /// The rendered lines, without terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True if nothing has been rendered.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The full trace, each line terminated by `\n`.
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// Print the trace to stdout, highlighting operation headers.
    pub fn display(&self) {
        for line in &self.lines {
            if line.starts_with("operation ") {
                println!("{}", line.bold().bright_white());
            } else if let Some((label, value)) = line.split_once(':') {
                println!("{}:{}", label.bright_cyan(), value);
            } else {
                println!("{line}");
            }
        }
    }
}

impl Display for TraceRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lines.iter().try_for_each(|line| writeln!(f, "{line}"))
    }
}
