use anyhow::Result;

use crate::shell::Shell;

/// `status` — print how the most recent foreground job ended. Before any
/// foreground job has run this reports `exit value 0`.
pub fn command(shell: &mut Shell, _argv: &[String]) -> Result<()> {
    println!("{}", shell.last_status());
    Ok(())
}
