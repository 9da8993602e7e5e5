//! Centralized shell output and progress management.
//!
//! Commands never format status lines themselves; they pass a semantic
//! [`Status`] and a message, and the shell handles alignment and color.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Finished,
    Staged,
    Generated,
    Added,
    Removed,

    // In-progress statuses (cyan)
    Resolving,
    Installing,
    Configuring,
    Building,

    // Warning/error
    Warning,
    Error,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Finished => "Finished",
            Status::Staged => "Staged",
            Status::Generated => "Generated",
            Status::Added => "Added",
            Status::Removed => "Removed",
            Status::Resolving => "Resolving",
            Status::Installing => "Installing",
            Status::Configuring => "Configuring",
            Status::Building => "Building",
            Status::Warning => "Warning",
            Status::Error => "error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Finished
            | Status::Staged
            | Status::Generated
            | Status::Added
            | Status::Removed => "\x1b[1;32m",
            Status::Resolving | Status::Installing | Status::Configuring | Status::Building => {
                "\x1b[1;36m"
            }
            Status::Warning => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
        }
    }
}

/// Shell output handle.
#[derive(Debug, Clone)]
pub struct Shell {
    color: bool,
    quiet: bool,
}

impl Shell {
    /// Create a shell, detecting whether stderr is a terminal.
    pub fn new() -> Self {
        Shell {
            color: io::stderr().is_terminal(),
            quiet: false,
        }
    }

    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    /// Suppress status output (errors still print).
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Whether colored output is enabled.
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Print a right-aligned status line, cargo-style.
    pub fn status(&self, status: Status, message: impl AsRef<str>) {
        if self.quiet && status != Status::Error {
            return;
        }

        let verb = status.as_str();
        let line = if self.color {
            format!(
                "{}{:>12}\x1b[0m {}",
                status.color_code(),
                verb,
                message.as_ref()
            )
        } else {
            format!("{:>12} {}", verb, message.as_ref())
        };

        let _ = writeln!(io::stderr(), "{}", line);
    }

    /// Spinner shown while an external tool runs. Returns a finished,
    /// cleared bar when not attached to a terminal.
    pub fn spinner(&self, message: impl Into<String>) -> ProgressBar {
        if self.quiet || !self.color {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
