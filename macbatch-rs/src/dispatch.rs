//! Command dispatch and status classification.
//!
//! The [`Executor`] owns command semantics; this module only forwards the
//! assembled string and sorts the numeric result into a [`DispatchStatus`].

use crate::console::Console;
use crate::error::SessionError;

// ── Status codes ──────────────────────────────────────────────────────────────

pub const COMMAND_SUCCEEDED: i32 = 0;
pub const COMMAND_NOT_FOUND: i32 = 100;
pub const ILLEGAL_APPLICATION_STATE: i32 = 200;
/// Parameter out of range; the offending parameter index is added.
pub const PARAMETER_OUT_OF_RANGE: i32 = 300;
/// Parameter could not be parsed; the offending parameter index is added.
pub const PARAMETER_UNREADABLE: i32 = 400;

// ── Executor ──────────────────────────────────────────────────────────────────

/// The collaborator that actually runs commands.
pub trait Executor {
    /// Apply one command and return its status code.
    fn apply(&mut self, command: &str) -> i32;

    /// Current verbosity.  Comment lines are echoed at level 2.
    fn verbose_level(&self) -> i32;
}

// ── Classification ────────────────────────────────────────────────────────────

/// Classified executor result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    Succeeded,
    NotFound,
    IllegalState,
    /// Any other code.  Carries `code mod 100`, the parameter index.
    IllegalParameter(u32),
}

impl DispatchStatus {
    /// Classify a raw status code.  Every `i32` maps to exactly one class.
    pub fn from_code(code: i32) -> Self {
        match code {
            COMMAND_SUCCEEDED => DispatchStatus::Succeeded,
            COMMAND_NOT_FOUND => DispatchStatus::NotFound,
            ILLEGAL_APPLICATION_STATE => DispatchStatus::IllegalState,
            other => DispatchStatus::IllegalParameter(other.rem_euclid(100) as u32),
        }
    }

    pub fn is_success(self) -> bool {
        self == DispatchStatus::Succeeded
    }

    /// Turn a failed status into the fatal error for `command`.
    pub fn check(self, command: &str, line: usize) -> Result<(), SessionError> {
        let command = command.to_owned();
        match self {
            DispatchStatus::Succeeded => Ok(()),
            DispatchStatus::NotFound => Err(SessionError::CommandNotFound { command, line }),
            DispatchStatus::IllegalState => Err(SessionError::IllegalState { command, line }),
            DispatchStatus::IllegalParameter(index) => {
                Err(SessionError::IllegalParameter { command, index, line })
            }
        }
    }
}

/// Forward `command` verbatim to `executor` and classify the result.
///
/// Illegal-parameter results also write `(<index>) <<command>>` to the
/// console's error channel.
pub fn dispatch(
    executor: &mut dyn Executor,
    command: &str,
    console: &mut dyn Console,
) -> DispatchStatus {
    let code = executor.apply(command);
    let status = DispatchStatus::from_code(code);
    tracing::debug!(command, code, ?status, "dispatched");
    if let DispatchStatus::IllegalParameter(index) = status {
        console.error(&format!("({index}) <{command}>"));
    }
    status
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Capture;

    /// Returns a fixed code and remembers what it was given.
    struct Fixed {
        code: i32,
        seen: Vec<String>,
    }

    impl Executor for Fixed {
        fn apply(&mut self, command: &str) -> i32 {
            self.seen.push(command.to_owned());
            self.code
        }

        fn verbose_level(&self) -> i32 {
            0
        }
    }

    #[test]
    fn classify_known_codes() {
        assert_eq!(DispatchStatus::from_code(0), DispatchStatus::Succeeded);
        assert_eq!(DispatchStatus::from_code(100), DispatchStatus::NotFound);
        assert_eq!(DispatchStatus::from_code(200), DispatchStatus::IllegalState);
    }

    #[test]
    fn classify_parameter_codes() {
        assert_eq!(DispatchStatus::from_code(301), DispatchStatus::IllegalParameter(1));
        assert_eq!(DispatchStatus::from_code(402), DispatchStatus::IllegalParameter(2));
        assert_eq!(DispatchStatus::from_code(500), DispatchStatus::IllegalParameter(0));
        assert_eq!(DispatchStatus::from_code(7), DispatchStatus::IllegalParameter(7));
    }

    #[test]
    fn classify_negative_code_index_in_range() {
        assert_eq!(DispatchStatus::from_code(-1), DispatchStatus::IllegalParameter(99));
        assert_eq!(DispatchStatus::from_code(i32::MIN), DispatchStatus::IllegalParameter(52));
    }

    #[test]
    fn dispatch_forwards_verbatim() {
        let mut exec = Fixed { code: 0, seen: Vec::new() };
        let mut console = Capture::new();
        let status = dispatch(&mut exec, "/echo  \"a  b\"", &mut console);
        assert!(status.is_success());
        assert_eq!(exec.seen, ["/echo  \"a  b\""]);
        assert!(console.errors.is_empty());
    }

    #[test]
    fn illegal_parameter_writes_diagnostic() {
        let mut exec = Fixed { code: 302, seen: Vec::new() };
        let mut console = Capture::new();
        let status = dispatch(&mut exec, "/gun/energy 1 X", &mut console);
        assert_eq!(status, DispatchStatus::IllegalParameter(2));
        assert_eq!(console.errors, ["(2) </gun/energy 1 X>"]);
    }

    #[test]
    fn not_found_has_no_diagnostic() {
        let mut exec = Fixed { code: 100, seen: Vec::new() };
        let mut console = Capture::new();
        assert_eq!(dispatch(&mut exec, "/nope", &mut console), DispatchStatus::NotFound);
        assert!(console.errors.is_empty());
    }

    #[test]
    fn check_maps_to_errors() {
        assert!(DispatchStatus::Succeeded.check("/a", 1).is_ok());
        assert!(matches!(
            DispatchStatus::NotFound.check("/a", 3),
            Err(SessionError::CommandNotFound { line: 3, .. })
        ));
        assert!(matches!(
            DispatchStatus::IllegalState.check("/a", 1),
            Err(SessionError::IllegalState { .. })
        ));
        assert!(matches!(
            DispatchStatus::IllegalParameter(4).check("/a", 1),
            Err(SessionError::IllegalParameter { index: 4, .. })
        ));
    }
}
