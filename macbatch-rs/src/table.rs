//! Known-command table.
//!
//! The executor behind the `macbatch` binary.  It knows nothing about what
//! commands do; it only checks a macro against a list of command paths and
//! their parameter limits, so a macro can be validated before a real run.
//!
//! Table files use the macro syntax itself (comments, quoting, `\`
//! continuation).  Each logical line is `<command-path> [<max-params>]`.

use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::Path;

use thiserror::Error;

use crate::console::Console;
use crate::dispatch::{
    Executor, COMMAND_NOT_FOUND, COMMAND_SUCCEEDED, PARAMETER_OUT_OF_RANGE,
    PARAMETER_UNREADABLE,
};
use crate::reader::{MacroReader, EXIT};
use crate::tokenize::tokenize;

/// Built-in command that changes the verbose level.
pub const VERBOSE_COMMAND: &str = "/control/verbose";

/// A malformed table entry.
#[derive(Debug, Error)]
#[error("line {line}: {message}")]
pub struct TableError {
    pub line: usize,
    pub message: String,
}

/// Registered command paths with an optional parameter limit.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: HashMap<String, Option<usize>>,
    verbose: i32,
    /// Commands accepted so far, in order.
    applied: Vec<String>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) a command.  `None` means any parameter count.
    pub fn register(&mut self, path: impl Into<String>, max_params: Option<usize>) {
        self.commands.insert(path.into(), max_params);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.commands.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// An empty table accepts every command.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn set_verbose(&mut self, level: i32) {
        self.verbose = level;
    }

    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    /// Parse a table from any buffered source.
    ///
    /// Returns the table and the entries that could not be parsed; bad
    /// entries are skipped rather than aborting the load.
    pub fn load<R: BufRead>(
        source: R,
        console: &mut dyn Console,
    ) -> io::Result<(Self, Vec<TableError>)> {
        let mut table = CommandTable::new();
        let mut errors = Vec::new();
        let mut reader = MacroReader::new(source);

        loop {
            let entry = reader.read_command(console)?;
            if entry == EXIT {
                if reader.at_eof() {
                    break;
                }
                continue;
            }
            if entry.starts_with('#') {
                continue;
            }
            let tokens = tokenize(&entry);
            let line = reader.command_line();
            match tokens.as_slice() {
                [path] => table.register(*path, None),
                [path, max] => match max.parse() {
                    Ok(n) => table.register(*path, Some(n)),
                    Err(_) => errors.push(TableError {
                        line,
                        message: format!("invalid parameter count '{max}' for {path}"),
                    }),
                },
                _ => errors.push(TableError {
                    line,
                    message: format!("expected '<command> [<max-params>]', got '{entry}'"),
                }),
            }
        }

        Ok((table, errors))
    }

    /// Read and parse a table file from disk.
    pub fn load_file(
        path: &Path,
        console: &mut dyn Console,
    ) -> io::Result<(Self, Vec<TableError>)> {
        let file = std::fs::File::open(path)?;
        Self::load(io::BufReader::new(file), console)
    }
}

impl Executor for CommandTable {
    fn apply(&mut self, command: &str) -> i32 {
        let tokens = tokenize(command);
        let Some((&path, params)) = tokens.split_first() else {
            return COMMAND_SUCCEEDED;
        };

        if path == VERBOSE_COMMAND {
            return match params {
                [] => COMMAND_SUCCEEDED,
                [level] => match level.parse() {
                    Ok(level) => {
                        self.verbose = level;
                        COMMAND_SUCCEEDED
                    }
                    Err(_) => PARAMETER_UNREADABLE,
                },
                _ => PARAMETER_OUT_OF_RANGE + 1,
            };
        }

        if !self.commands.is_empty() {
            match self.commands.get(path) {
                None => return COMMAND_NOT_FOUND,
                Some(Some(max)) if params.len() > *max => {
                    return PARAMETER_OUT_OF_RANGE + *max as i32;
                }
                Some(_) => {}
            }
        }

        if self.verbose >= 1 {
            println!("> {command}");
        }
        self.applied.push(command.to_owned());
        COMMAND_SUCCEEDED
    }

    fn verbose_level(&self) -> i32 {
        self.verbose
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
