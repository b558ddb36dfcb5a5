//! Logical-command assembly from a macro source.
//!
//! A macro is read one physical line at a time.  Each line is normalised
//! (tabs become spaces, surrounding spaces and a trailing `\r` are removed)
//! and tokenized; the surviving tokens are joined with single spaces.
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `# …` at start of line | comment; returned verbatim for optional echo |
//! | `… # …` | trailing comment; dropped |
//! | `… \` or `… _` | the next physical line continues this command |
//!
//! A blank line while a continuation is pending ends the command.  A comment
//! line while a continuation is pending is returned on its own and the
//! partial command is dropped.
//!
//! Lines are read without a length limit.

use std::io::{self, BufRead};

use crate::console::{Console, Warning};
use crate::tokenize::tokenize;

/// Returned by [`MacroReader::read_command`] at end of input, and also for a
/// literal `exit` line.  Callers cannot tell the two apart.
pub const EXIT: &str = "exit";

/// Reads logical commands from a buffered source.
#[derive(Debug)]
pub struct MacroReader<R> {
    source: R,
    eof: bool,
    /// Physical lines consumed so far.
    line_no: usize,
    /// Line on which the last returned command started.
    command_line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> MacroReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            eof: false,
            line_no: 0,
            command_line: 0,
            buf: Vec::new(),
        }
    }

    /// `true` once the source is exhausted.
    pub fn at_eof(&self) -> bool {
        self.eof
    }

    /// Number of physical lines read so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// 1-based line where the most recently returned command began.
    pub fn command_line(&self) -> usize {
        self.command_line
    }

    /// Assemble and return the next logical command.
    ///
    /// Comment lines come back verbatim (starting with `#`).  [`EXIT`] is
    /// returned once the source is exhausted with nothing pending.
    pub fn read_command(&mut self, console: &mut dyn Console) -> io::Result<String> {
        let mut total = String::new();
        let mut continued = false;

        while !self.eof {
            let raw = self.next_physical_line()?.replace('\t', " ");
            let line = raw.trim_matches(' ').trim_end_matches('\r');

            // skip null line if single line
            if !continued && line.is_empty() {
                continue;
            }

            if line.starts_with('#') {
                self.command_line = self.line_no;
                return Ok(line.to_owned());
            }

            if total.is_empty() {
                self.command_line = self.line_no;
            }

            let tokens = tokenize(line);
            continued = false;
            for (i, tok) in tokens.iter().enumerate() {
                if tok.starts_with('#') {
                    break;
                }
                if tok.starts_with('\\') || tok.starts_with('_') {
                    continued = true;
                    if i != tokens.len() - 1 {
                        console.warn(&Warning::TrailingAfterContinuation { line: self.line_no });
                    }
                    break;
                }
                total.push_str(tok);
                total.push(' ');
            }

            if continued {
                continue;
            }
            if !total.is_empty() {
                break;
            }
        }

        let total = total.trim_matches(' ');
        if self.eof && total.is_empty() {
            return Ok(EXIT.to_owned());
        }
        Ok(total.to_owned())
    }

    /// Read one physical line, without its newline.
    ///
    /// A zero-byte read or a final line with no newline sets `eof`.  Invalid
    /// UTF-8 is replaced rather than rejected.
    fn next_physical_line(&mut self) -> io::Result<String> {
        self.buf.clear();
        let n = self.source.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            self.eof = true;
            return Ok(String::new());
        }
        self.line_no += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        } else {
            self.eof = true;
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        tracing::trace!(line_no = self.line_no, %line, "read macro line");
        Ok(line)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
