use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::unistd::Pid;
use thiserror::Error;

/// Errors produced by the job-execution and process-supervision core.
///
/// Every variant is recoverable from the interpreter's point of view: the
/// failing command is reported and the interactive loop keeps running.
#[derive(Error, Debug)]
pub enum ShellError {
    /// A `<` or `>` token with no path following it.
    #[error("missing path after `{0}`")]
    MalformedRedirection(char),

    /// A redirection target could not be opened. Only ever fatal to the
    /// child that tried to open it.
    #[error("cannot open {path}: {source}")]
    FileOpen { path: String, source: Errno },

    /// Process creation itself failed; no child exists.
    #[error("failed to create process: {0}")]
    LaunchFailed(Errno),

    /// The job table has no free slot; the launch is refused before any
    /// process is created.
    #[error("job table full ({capacity} jobs), refusing to launch")]
    TableFull { capacity: usize },

    /// A blocking wait failed unexpectedly. The last foreground status is
    /// left untouched rather than corrupted.
    #[error("wait failed for pid {pid}: {source}")]
    Wait { pid: Pid, source: Errno },
}

/// How a child process ended, as decoded from its wait status.
///
/// The exit code is the 8-bit wait-status byte; a signal-terminated process
/// is reported by its signal number. This is also the value the `status`
/// builtin prints for the most recent foreground job.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Termination {
    Exited(u8),
    Signaled(Signal),
}

impl Termination {
    /// Map to a process exit code using the usual 128+n convention for
    /// signal-terminated children.
    pub fn exit_code(&self) -> u8 {
        match self {
            Termination::Exited(code) => *code,
            Termination::Signaled(signal) => 128u8.wrapping_add(*signal as i32 as u8),
        }
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Termination::Exited(code) => write!(formatter, "exit value {code}"),
            Termination::Signaled(signal) => {
                write!(formatter, "terminated by signal {}", *signal as i32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn termination_display() {
        assert_eq!(Termination::Exited(0).to_string(), "exit value 0");
        assert_eq!(Termination::Exited(127).to_string(), "exit value 127");
        assert_eq!(
            Termination::Signaled(Signal::SIGINT).to_string(),
            "terminated by signal 2"
        );
        assert_eq!(
            Termination::Signaled(Signal::SIGTERM).to_string(),
            "terminated by signal 15"
        );
    }

    #[test]
    fn termination_exit_code() {
        assert_eq!(Termination::Exited(3).exit_code(), 3);
        assert_eq!(Termination::Signaled(Signal::SIGTERM).exit_code(), 143);
        assert_eq!(Termination::Signaled(Signal::SIGKILL).exit_code(), 137);
    }

    #[test]
    fn error_display_names_the_failing_piece() {
        let err = ShellError::MalformedRedirection('<');
        assert_eq!(err.to_string(), "missing path after `<`");

        let err = ShellError::FileOpen {
            path: "missing.txt".to_string(),
            source: Errno::ENOENT,
        };
        assert!(err.to_string().contains("missing.txt"));

        let err = ShellError::TableFull { capacity: 1000 };
        assert!(err.to_string().contains("1000"));
    }
}
