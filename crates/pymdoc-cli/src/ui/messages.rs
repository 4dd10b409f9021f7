//! Status message functions for terminal output.

use owo_colors::OwoColorize;

/// Status printer honouring `--quiet` and `--no-color`.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    color: bool,
    quiet: bool,
}

impl Messages {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    /// Print a success message to stderr.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", success_line(message, self.color));
        }
    }

    /// Print a warning message to stderr.
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            eprintln!("⚠ {message}");
        }
    }
}

/// A `✓`-prefixed line, coloured when `color` is set.
pub fn success_line(message: &str, color: bool) -> String {
    if color {
        format!("{} {}", "✓".green().bold(), message)
    } else {
        format!("✓ {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_success_line() {
        assert_eq!(success_line("Wrote 2 files", false), "✓ Wrote 2 files");
    }

    #[test]
    fn test_colored_success_line_keeps_message() {
        let line = success_line("Wrote 2 files", true);
        assert!(line.contains("Wrote 2 files"));
        assert!(line.contains('\u{1b}'));
    }

    #[test]
    fn test_messages_do_not_panic() {
        Messages::new(false, false).success("Success message");
        Messages::new(true, false).warning("Warning message");
        Messages::new(true, true).success("Hidden");
    }
}
