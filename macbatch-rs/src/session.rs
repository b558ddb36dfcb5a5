//! Batch macro session.
//!
//! A [`Session`] pulls logical commands from its [`MacroReader`] and hands
//! them to an [`Executor`] until the macro ends.  When it finishes, control
//! goes back to the session that started it: `run` returns that `previous`
//! handle so hosts can stack sessions (a macro that pauses into another).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::console::Console;
use crate::dispatch::{dispatch, Executor};
use crate::error::SessionError;
use crate::reader::{MacroReader, EXIT};

pub struct Session<R, P> {
    /// `None` for an inert session.
    reader: Option<MacroReader<R>>,
    previous: P,
}

impl<P: Clone> Session<BufReader<File>, P> {
    /// Open `path` for reading.  Failure is fatal for this session.
    pub fn open(path: impl AsRef<Path>, previous: P) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SessionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "macro session opened");
        Ok(Self::from_reader(BufReader::new(file), previous))
    }
}

impl<R: BufRead, P: Clone> Session<R, P> {
    pub fn from_reader(source: R, previous: P) -> Self {
        Self {
            reader: Some(MacroReader::new(source)),
            previous,
        }
    }

    /// A session with no source.  [`run`](Self::run) hands straight back to
    /// `previous`.
    pub fn inert(previous: P) -> Self {
        Self { reader: None, previous }
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    pub fn previous(&self) -> &P {
        &self.previous
    }

    /// Run the macro to its end and return the previous session.
    ///
    /// Comments are echoed only at executor verbosity 2.  The first command
    /// that does not succeed stops the session with its error.
    pub fn run(
        &mut self,
        executor: &mut dyn Executor,
        console: &mut dyn Console,
    ) -> Result<P, SessionError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(self.previous.clone());
        };

        loop {
            let command = reader.read_command(console)?;
            if command == EXIT {
                break;
            }

            if command.starts_with('#') {
                if executor.verbose_level() == 2 {
                    console.echo(&command);
                }
                continue;
            }

            let line = reader.command_line();
            dispatch(executor, &command, console).check(&command, line)?;
        }

        tracing::debug!(lines = reader.line_no(), "macro session finished");
        Ok(self.previous.clone())
    }

    /// [`run`](Self::run) bracketed by pause banners naming `prompt`.
    ///
    /// The closing banner is only written when the macro finishes normally.
    pub fn pause(
        &mut self,
        prompt: &str,
        executor: &mut dyn Executor,
        console: &mut dyn Console,
    ) -> Result<P, SessionError> {
        console.echo(&format!("Pause session <{prompt}> start."));
        let previous = self.run(executor, console)?;
        console.echo(&format!("Pause session <{prompt}> Terminate."));
        Ok(previous)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Capture, Warning};
    use crate::dispatch::{COMMAND_NOT_FOUND, COMMAND_SUCCEEDED};

    /// Succeeds for everything except commands in `fail`, which get `code`.
    #[derive(Default)]
    struct Script {
        applied: Vec<String>,
        fail: Vec<(&'static str, i32)>,
        verbose: i32,
    }

    impl Executor for Script {
        fn apply(&mut self, command: &str) -> i32 {
            self.applied.push(command.to_owned());
            self.fail
                .iter()
                .find(|(c, _)| *c == command)
                .map_or(COMMAND_SUCCEEDED, |&(_, code)| code)
        }

        fn verbose_level(&self) -> i32 {
            self.verbose
        }
    }

    fn session(src: &'static str) -> Session<&'static [u8], &'static str> {
        Session::from_reader(src.as_bytes(), "terminal")
    }

    #[test]
    fn runs_every_command_and_returns_previous() {
        let mut exec = Script::default();
        let mut console = Capture::new();
        let prev = session("/a\n/b 1 \\\n 2\n").run(&mut exec, &mut console).unwrap();
        assert_eq!(prev, "terminal");
        assert_eq!(exec.applied, ["/a", "/b 1 2"]);
    }

    #[test]
    fn exit_line_stops_reading() {
        let mut exec = Script::default();
        let mut console = Capture::new();
        session("/a\nexit\n/b\n").run(&mut exec, &mut console).unwrap();
        assert_eq!(exec.applied, ["/a"]);
    }

    #[test]
    fn comments_echoed_only_at_verbose_two() {
        for (verbose, expect) in [(0, 0), (1, 0), (2, 1), (3, 0)] {
            let mut exec = Script { verbose, ..Script::default() };
            let mut console = Capture::new();
            session("# hello\n/a\n").run(&mut exec, &mut console).unwrap();
            assert_eq!(console.echoed.len(), expect, "verbose {verbose}");
            assert_eq!(exec.applied, ["/a"]);
        }
    }

    #[test]
    fn fatal_status_stops_session() {
        let mut exec = Script {
            fail: vec![("/missing", COMMAND_NOT_FOUND)],
            ..Script::default()
        };
        let mut console = Capture::new();
        let err = session("/a\n\n/missing\n/b\n")
            .run(&mut exec, &mut console)
            .unwrap_err();
        assert!(matches!(
            &err,
            SessionError::CommandNotFound { command, line: 3 } if command == "/missing"
        ));
        assert_eq!(exec.applied, ["/a", "/missing"]);
    }

    #[test]
    fn illegal_parameter_reports_index() {
        let mut exec = Script {
            fail: vec![("/gun/energy x", 401)],
            ..Script::default()
        };
        let mut console = Capture::new();
        let err = session("/gun/energy x\n").run(&mut exec, &mut console).unwrap_err();
        assert!(matches!(err, SessionError::IllegalParameter { index: 1, line: 1, .. }));
        assert_eq!(console.errors, ["(1) </gun/energy x>"]);
    }

    #[test]
    fn continuation_warning_does_not_stop_session() {
        let mut exec = Script::default();
        let mut console = Capture::new();
        session("/a \\ oops\n1\n/b\n").run(&mut exec, &mut console).unwrap();
        assert_eq!(exec.applied, ["/a 1", "/b"]);
        assert_eq!(console.warnings, [Warning::TrailingAfterContinuation { line: 1 }]);
    }

    #[test]
    fn inert_session_defers_to_previous() {
        let mut exec = Script::default();
        let mut console = Capture::new();
        let mut s: Session<&[u8], u32> = Session::inert(7);
        assert!(!s.is_open());
        assert_eq!(s.run(&mut exec, &mut console).unwrap(), 7);
        assert!(exec.applied.is_empty());
    }

    #[test]
    fn open_missing_file_is_fatal_init() {
        let err = Session::open("/definitely/not/here.mac", ()).err().unwrap();
        assert!(matches!(err, SessionError::Open { .. }));
    }

    #[test]
    fn pause_brackets_run() {
        let mut exec = Script::default();
        let mut console = Capture::new();
        session("/a\n").pause("G4_pause", &mut exec, &mut console).unwrap();
        assert_eq!(
            console.echoed,
            ["Pause session <G4_pause> start.", "Pause session <G4_pause> Terminate."]
        );
    }

    #[test]
    fn pause_skips_terminate_banner_on_error() {
        let mut exec = Script {
            fail: vec![("/a", 200)],
            ..Script::default()
        };
        let mut console = Capture::new();
        assert!(session("/a\n").pause("p", &mut exec, &mut console).is_err());
        assert_eq!(console.echoed, ["Pause session <p> start."]);
    }
}
