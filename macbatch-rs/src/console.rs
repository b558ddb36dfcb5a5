//! Console output sink.
//!
//! The session never prints directly.  Echoed comments, warnings and
//! dispatch diagnostics go through a [`Console`], so hosts can route them to
//! a terminal, a log window, or (in tests) a [`Capture`] buffer.

use std::fmt;

// ── Warnings ──────────────────────────────────────────────────────────────────

/// A non-fatal condition.  Reported, then the macro keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Tokens followed a `\` or `_` continuation marker on the same line.
    TrailingAfterContinuation { line: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::TrailingAfterContinuation { line } => write!(
                f,
                "line {line}: unexpected character after line continuation character"
            ),
        }
    }
}

// ── Console trait ─────────────────────────────────────────────────────────────

/// Where session output goes.
pub trait Console {
    /// Regular output (echoed comments, pause banners).
    fn echo(&mut self, line: &str);
    /// A non-fatal warning.
    fn warn(&mut self, warning: &Warning);
    /// Diagnostics for the error channel.
    fn error(&mut self, line: &str);
}

/// Writes echoes to stdout and warnings/diagnostics to stderr.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn echo(&mut self, line: &str) {
        println!("{line}");
    }

    fn warn(&mut self, warning: &Warning) {
        eprintln!("warning: {warning}");
    }

    fn error(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Records everything in memory.
#[derive(Debug, Default)]
pub struct Capture {
    pub echoed: Vec<String>,
    pub warnings: Vec<Warning>,
    pub errors: Vec<String>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for Capture {
    fn echo(&mut self, line: &str) {
        self.echoed.push(line.to_owned());
    }

    fn warn(&mut self, warning: &Warning) {
        self.warnings.push(warning.clone());
    }

    fn error(&mut self, line: &str) {
        self.errors.push(line.to_owned());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
