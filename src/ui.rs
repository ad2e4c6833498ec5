//! Terminal display for messages that are not part of the result line.
//!
//! Everything here goes to stderr so stdout stays machine-readable.

use console::style;

/// Format an error message with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}
