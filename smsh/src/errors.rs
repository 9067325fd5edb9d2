use tracing::debug;

use crate::ShellExit;

/// Print an error the way the user should see it: one `smsh:` line, no
/// backtrace. Normal-exit markers are not errors and stay silent.
pub fn display_user_error(err: &anyhow::Error) {
    if let Some(exit) = err.downcast_ref::<ShellExit>() {
        debug!("shell exiting normally: {}", exit);
        return;
    }
    eprintln!("smsh: {err}");
}
