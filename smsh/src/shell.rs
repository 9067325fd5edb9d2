use anyhow::{Result, bail};
use nix::sys::signal::Signal;
use nix::unistd::Pid;
use smsh_types::{ShellError, Termination};
use tracing::{debug, warn};

use crate::builtin;
use crate::parser;
use crate::process::{JobTable, fork, redirect, signal, wait};

/// Top-level session state: the job table, the last foreground status, and
/// the SIGINT disposition captured at startup. All of it is owned here and
/// handed to the process components by reference; there are no ambient
/// globals to coordinate.
pub struct Shell {
    jobs: JobTable,
    last_status: Termination,
    interrupt: signal::ForegroundDefault,
}

impl Shell {
    pub fn new() -> Result<Self> {
        let interrupt = signal::install()?;
        Ok(Shell {
            jobs: JobTable::new(),
            last_status: Termination::Exited(0),
            interrupt,
        })
    }

    /// Termination of the most recent foreground job, read by `status`.
    pub fn last_status(&self) -> Termination {
        self.last_status
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Run one already-read line: comments and blanks are dropped, builtins
    /// dispatch by exact name, anything else goes to the launcher.
    pub fn eval_line(&mut self, line: &str) -> Result<()> {
        let tokens = parser::tokenize(line);
        if parser::is_blank_or_comment(&tokens) {
            return Ok(());
        }
        if let Some(command) = builtin::lookup(&tokens[0]) {
            debug!("builtin: {}", tokens[0]);
            return command(self, &tokens);
        }
        self.run_external(tokens)
    }

    fn run_external(&mut self, tokens: Vec<String>) -> Result<()> {
        let (argv, plan) = redirect::resolve(tokens)?;
        if argv.is_empty() {
            bail!("missing command");
        }
        // Refuse before forking so a child can never exist untracked.
        if self.jobs.is_full() {
            return Err(ShellError::TableFull {
                capacity: self.jobs.capacity(),
            }
            .into());
        }

        let background = plan.background;
        let pid = fork::fork_process(&argv, &plan, &self.interrupt)?;
        self.jobs.insert(pid)?;

        if background {
            println!("background pid is {pid}");
        } else {
            self.wait_foreground(pid)?;
        }
        self.check_background_jobs();
        Ok(())
    }

    /// Block on the one outstanding foreground job and record how it ended.
    /// On a wait failure the status record and the job table are left as
    /// they were; whoever reaped the pid already did the bookkeeping.
    fn wait_foreground(&mut self, pid: Pid) -> Result<()> {
        let termination = wait::wait_foreground(pid)?;
        self.jobs.remove(pid);
        self.last_status = termination;
        if let Termination::Signaled(signal) = termination {
            println!("terminated by signal {}", signal as i32);
        }
        Ok(())
    }

    /// Drain finished background jobs and report each one. Called at the top
    /// of every loop iteration and after every command execution.
    pub fn check_background_jobs(&mut self) {
        for (pid, termination) in wait::drain(&mut self.jobs) {
            println!("background pid {pid} is done: {termination}");
        }
    }

    /// Best-effort kill of everything still tracked, without waiting for
    /// confirmation. Runs on `exit` and on end of input, just before the
    /// interpreter process itself ends.
    pub fn exit(&mut self) {
        for pid in self.jobs.pids() {
            debug!("killing outstanding job pid {}", pid);
            if let Err(err) = signal::send_signal(pid, Signal::SIGKILL) {
                warn!("failed to kill pid {}: {}", pid, err);
            }
            self.jobs.remove(pid);
        }
    }
}
