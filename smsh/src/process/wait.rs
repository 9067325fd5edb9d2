use nix::errno::Errno;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use smsh_types::{ShellError, Termination};
use tracing::{debug, warn};

use super::job::JobTable;

fn decode(status: WaitStatus) -> Option<(Pid, Termination)> {
    match status {
        WaitStatus::Exited(pid, code) => Some((pid, Termination::Exited(code as u8))),
        WaitStatus::Signaled(pid, signal, _core_dumped) => {
            Some((pid, Termination::Signaled(signal)))
        }
        status => {
            debug!("ignoring wait status {:?}", status);
            None
        }
    }
}

/// One non-blocking wait for any terminated child.
fn reap_one() -> Option<(Pid, Termination)> {
    match waitpid(None, Some(WaitPidFlag::WNOHANG)) {
        Ok(WaitStatus::StillAlive) => None,
        Ok(status) => decode(status),
        Err(Errno::ECHILD) => None,
        Err(err) => {
            warn!("waitpid(any) failed: {}", err);
            None
        }
    }
}

/// Reap every child that has terminated since the last drain, untracking
/// each one. Never blocks; an empty result just means nothing finished yet.
pub fn drain(jobs: &mut JobTable) -> Vec<(Pid, Termination)> {
    let mut reaped = Vec::new();
    while let Some((pid, termination)) = reap_one() {
        debug!("reaped pid {} -> {:?}", pid, termination);
        jobs.remove(pid);
        reaped.push((pid, termination));
    }
    reaped
}

/// Block on exactly one child until it terminates.
///
/// A failed wait (for example the pid was already reaped elsewhere) is
/// surfaced as `ShellError::Wait`; the caller must not update any status
/// record from it.
pub fn wait_foreground(pid: Pid) -> Result<Termination, ShellError> {
    debug!("blocking wait on foreground pid {}", pid);
    loop {
        match waitpid(pid, None) {
            Ok(status) => {
                if let Some((_pid, termination)) = decode(status) {
                    debug!("foreground pid {} -> {:?}", pid, termination);
                    return Ok(termination);
                }
                // Stopped/Continued are not requested without WUNTRACED,
                // but tolerate a spurious wakeup by waiting again.
            }
            Err(source) => return Err(ShellError::Wait { pid, source }),
        }
    }
}
