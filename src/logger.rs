//! Prefixed terminal logger and spinner.
//!
//! Every line carries the tool prefix so registry output is recognizable
//! when interleaved with other build tooling. Debug output is gated behind
//! verbosity; `Logger::silent()` suppresses everything, which test code uses
//! to keep expected-failure paths (parse fallbacks, skipped files) quiet.

use std::io::{self, Write};

use colored::Colorize;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const PREFIX: &str = "shadreg";

#[derive(Debug, Clone)]
pub struct Logger {
    verbose: bool,
    silent: bool,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            silent: false,
        }
    }

    /// A logger that writes nothing. Used by tests exercising soft-failure
    /// paths that would otherwise clutter output.
    pub fn silent() -> Self {
        Self {
            verbose: false,
            silent: true,
        }
    }

    pub fn info(&self, message: &str) {
        if !self.silent {
            println!("{} {}", PREFIX.blue(), message);
        }
    }

    pub fn success(&self, message: &str) {
        if !self.silent {
            println!("{} {} {}", PREFIX.green(), SUCCESS_MARK.green(), message);
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.silent {
            println!("{} {} {}", PREFIX.yellow(), "warning:".bold().yellow(), message);
        }
    }

    pub fn error(&self, message: &str) {
        if !self.silent {
            eprintln!("{} {} {}", PREFIX.red(), FAILURE_MARK.red(), message);
        }
    }

    pub fn debug(&self, message: &str) {
        if self.verbose && !self.silent {
            println!("{} {}", PREFIX.dimmed(), message.dimmed());
        }
    }

    /// Start a spinner for a long-running step.
    pub fn spinner(&self, message: &str) -> Spinner {
        let spinner = Spinner {
            silent: self.silent,
        };
        spinner.draw(message);
        spinner
    }
}

/// Handle for an in-progress step. Redraws in place and finishes with a
/// ✓/✘ line.
pub struct Spinner {
    silent: bool,
}

impl Spinner {
    fn draw(&self, message: &str) {
        if self.silent {
            return;
        }
        print!("\r\x1b[2K{} {}...", PREFIX.blue(), message);
        let _ = io::stdout().flush();
    }

    pub fn update(&self, message: &str) {
        self.draw(message);
    }

    pub fn complete(&self, message: &str) {
        if self.silent {
            return;
        }
        println!("\r\x1b[2K{} {} {}", PREFIX.blue(), SUCCESS_MARK.green(), message);
    }

    pub fn error(&self, message: &str) {
        if self.silent {
            return;
        }
        // Finish the redraw line before switching to stderr
        println!("\r\x1b[2K");
        eprintln!("{} {} {}", PREFIX.red(), FAILURE_MARK.red(), message);
    }
}
