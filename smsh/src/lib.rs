pub mod builtin;
pub mod errors;
pub mod parser;
pub mod process;
pub mod repl;
pub mod shell;

/// Error type used to unwind the interactive loop on a normal exit.
///
/// Exiting travels up through the same `anyhow::Result` plumbing as real
/// errors so that builtins do not need a dedicated control-flow channel; the
/// loop downcasts and treats it as a clean stop.
#[derive(Debug)]
pub enum ShellExit {
    ExitCommand,
    EndOfInput,
}

impl std::fmt::Display for ShellExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellExit::ExitCommand => write!(f, "exit by exit command"),
            ShellExit::EndOfInput => write!(f, "exit by end of input"),
        }
    }
}

impl std::error::Error for ShellExit {}
