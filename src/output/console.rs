//! Colorized status lines for the terminal.
//!
//! Handlers report progress through the [`Console`] trait instead of
//! calling `println!` directly, which keeps them testable.

use colored::Colorize;

/// Kind of status line, which decides its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Bold banner text
    Heading,
    /// A step that is about to run
    Info,
    Success,
    /// Usable but ambiguous results
    Warning,
    Failure,
    Plain,
}

/// Sink for user-facing status lines.
pub trait Console {
    /// Print one line with the given status.
    fn emit(&self, status: Status, message: &str);

    fn heading(&self, message: &str) {
        self.emit(Status::Heading, message);
    }

    fn info(&self, message: &str) {
        self.emit(Status::Info, message);
    }

    fn success(&self, message: &str) {
        self.emit(Status::Success, message);
    }

    fn warning(&self, message: &str) {
        self.emit(Status::Warning, message);
    }

    fn failure(&self, message: &str) {
        self.emit(Status::Failure, message);
    }

    fn blank(&self) {
        self.emit(Status::Plain, "");
    }
}

/// Writes status lines to stdout.
#[derive(Debug, Clone, Copy)]
pub struct TerminalConsole {
    colorize: bool,
}

impl TerminalConsole {
    pub fn new(colorize: bool) -> Self {
        Self { colorize }
    }

    /// Apply the status color to `message`
    pub fn render(&self, status: Status, message: &str) -> String {
        if !self.colorize {
            return message.to_string();
        }

        match status {
            Status::Heading => message.bold().to_string(),
            Status::Info => message.bright_blue().to_string(),
            Status::Success => message.bright_green().to_string(),
            Status::Warning => message.bright_yellow().to_string(),
            Status::Failure => message.bright_red().to_string(),
            Status::Plain => message.to_string(),
        }
    }
}

impl Console for TerminalConsole {
    fn emit(&self, status: Status, message: &str) {
        println!("{}", self.render(status, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render_without_color() {
        let console = TerminalConsole::new(false);
        assert_eq!(console.render(Status::Failure, "oops"), "oops");
        assert_eq!(console.render(Status::Heading, "Campies"), "Campies");
    }

    #[test]
    fn test_plain_status_is_never_colored() {
        let console = TerminalConsole::new(true);
        assert_eq!(console.render(Status::Plain, "text"), "text");
    }
}
