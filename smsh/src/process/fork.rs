use std::ffi::CString;
use std::path::Path;
use std::process::exit;

use libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::errno::Errno;
use nix::fcntl::{OFlag, open};
use nix::sys::stat::Mode;
use nix::unistd::{ForkResult, Pid, close, dup2, execvp, fork};
use smsh_types::ShellError;
use tracing::debug;

use super::redirect::RedirectPlan;
use super::signal::ForegroundDefault;

const DEV_NULL: &str = "/dev/null";

/// Spawn one child for `argv` with the stream wiring in `plan`.
///
/// The parent returns the child's pid without blocking; tracking and waiting
/// belong to the caller. The child branch never returns: it either becomes
/// the requested program or exits non-zero after reporting its own failure.
/// No redirection fd is ever opened on the parent side.
pub fn fork_process(
    argv: &[String],
    plan: &RedirectPlan,
    interrupt: &ForegroundDefault,
) -> Result<Pid, ShellError> {
    debug!("forking for {:?} plan: {:?}", argv, plan);
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => {
            debug!("forked child pid {}", child);
            Ok(child)
        }
        Ok(ForkResult::Child) => exec_child(argv, plan, interrupt),
        Err(source) => Err(ShellError::LaunchFailed(source)),
    }
}

/// Child-side setup and exec. Every failure path terminates this process;
/// the interpreter only ever learns about it through the wait status.
fn exec_child(argv: &[String], plan: &RedirectPlan, interrupt: &ForegroundDefault) -> ! {
    // Foreground children die on Ctrl-C again; background children keep the
    // ignoring disposition inherited from the shell.
    if !plan.background {
        if let Err(err) = interrupt.restore() {
            eprintln!("smsh: failed to restore SIGINT disposition: {err}");
            exit(1);
        }
    }

    match &plan.input {
        Some(path) => redirect_stream(path, OFlag::O_RDONLY, STDIN_FILENO),
        // A background job must not read the terminal.
        None if plan.background => redirect_stream(DEV_NULL, OFlag::O_RDONLY, STDIN_FILENO),
        None => {}
    }

    match &plan.output {
        Some(path) => redirect_stream(
            path,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
            STDOUT_FILENO,
        ),
        // Nor pollute it.
        None if plan.background => redirect_stream(DEV_NULL, OFlag::O_WRONLY, STDOUT_FILENO),
        None => {}
    }

    let program = match CString::new(argv[0].as_str()) {
        Ok(program) => program,
        Err(_) => {
            eprintln!("smsh: {}: invalid program name", argv[0]);
            exit(1);
        }
    };
    let args: Vec<CString> = match argv.iter().map(|arg| CString::new(arg.as_str())).collect() {
        Ok(args) => args,
        Err(_) => {
            eprintln!("smsh: {}: invalid argument", argv[0]);
            exit(1);
        }
    };

    if let Err(err) = execvp(&program, &args) {
        match err {
            Errno::ENOENT => {
                eprintln!("smsh: {}: command not found", argv[0]);
                exit(127);
            }
            Errno::EACCES => {
                eprintln!("smsh: {}: permission denied", argv[0]);
                exit(126);
            }
            err => {
                eprintln!("smsh: {}: {}", argv[0], err);
                exit(1);
            }
        }
    }
    // execvp replaced the image on success, so this is unreachable; exit
    // anyway rather than fall back into the interpreter's code.
    exit(1);
}

/// Open `path` and splice it onto `target`. Child branch only: an open or
/// dup failure ends this process immediately, before any exec.
fn redirect_stream(path: &str, oflag: OFlag, target: i32) {
    let fd = match open(Path::new(path), oflag, Mode::from_bits_truncate(0o644)) {
        Ok(fd) => fd,
        Err(source) => {
            eprintln!(
                "smsh: {}",
                ShellError::FileOpen {
                    path: path.to_string(),
                    source,
                }
            );
            exit(1);
        }
    };
    if let Err(err) = dup2(fd, target) {
        eprintln!("smsh: cannot redirect {path}: {err}");
        exit(1);
    }
    if fd != target {
        let _ = close(fd);
    }
}
