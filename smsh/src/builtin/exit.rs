use anyhow::Result;

use crate::ShellExit;
use crate::shell::Shell;

/// `exit` — put down every outstanding job, then unwind the loop.
pub fn command(shell: &mut Shell, _argv: &[String]) -> Result<()> {
    shell.exit();
    Err(ShellExit::ExitCommand.into())
}
