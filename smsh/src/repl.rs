use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::ShellExit;
use crate::errors::display_user_error;
use crate::shell::Shell;

const PROMPT: &str = ": ";

/// The interactive read-eval loop. All interesting state lives in the
/// `Shell`; this only owns the prompt and the line buffer.
pub struct Repl<'a> {
    shell: &'a mut Shell,
}

impl<'a> Repl<'a> {
    pub fn new(shell: &'a mut Shell) -> Self {
        Repl { shell }
    }

    /// Prompt until `exit` or end of input. Background completions are
    /// surfaced before every prompt, so a finished job is announced no later
    /// than the next interaction.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            self.shell.check_background_jobs();

            print!("{PROMPT}");
            io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                debug!(
                    "{}, cleaning up {} jobs",
                    ShellExit::EndOfInput,
                    self.shell.job_count()
                );
                self.shell.exit();
                return Ok(());
            }

            if let Err(err) = self.shell.eval_line(line.trim_end_matches('\n')) {
                if err.downcast_ref::<ShellExit>().is_some() {
                    return Ok(());
                }
                display_user_error(&err);
            }
        }
    }
}
