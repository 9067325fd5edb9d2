use anyhow::{Context as _, Result};
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, kill, sigaction};
use nix::unistd::Pid;
use tracing::debug;

/// The SIGINT disposition the shell displaced at startup.
///
/// Captured once, then threaded into every spawn: foreground children
/// re-install it before exec so Ctrl-C kills them instead of the shell;
/// background children simply inherit the ignoring disposition and never see
/// a prompt-level interrupt.
#[derive(Clone, Copy)]
pub struct ForegroundDefault {
    action: SigAction,
}

impl ForegroundDefault {
    /// Re-install the captured disposition. Only ever called in a child
    /// branch; the interactive process keeps ignoring SIGINT for its whole
    /// lifetime.
    pub(crate) fn restore(&self) -> nix::Result<()> {
        unsafe { sigaction(Signal::SIGINT, &self.action) }?;
        Ok(())
    }
}

/// Make the interactive process ignore SIGINT so Ctrl-C at the prompt does
/// not kill the shell, capturing the disposition that foreground children
/// must get back.
pub fn install() -> Result<ForegroundDefault> {
    debug!("ignoring SIGINT in the interactive process");
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    let previous =
        unsafe { sigaction(Signal::SIGINT, &ignore) }.context("failed to ignore SIGINT")?;
    Ok(ForegroundDefault { action: previous })
}

/// Best-effort signal delivery, used by exit cleanup to put down jobs that
/// are still outstanding.
pub(crate) fn send_signal(pid: Pid, signal: Signal) -> Result<()> {
    debug!("sending {:?} to pid {}", signal, pid);
    kill(pid, signal).with_context(|| format!("failed to send {signal:?} to pid {pid}"))
}
