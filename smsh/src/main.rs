use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use smsh::ShellExit;
use smsh::errors::display_user_error;
use smsh::repl::Repl;
use smsh::shell::Shell;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Run a single command line, then exit
    #[arg(short, long)]
    command: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut shell = match Shell::new() {
        Ok(shell) => shell,
        Err(err) => {
            eprintln!("smsh: {err}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command.as_deref() {
        Some(command) => run_command(&mut shell, command),
        None => run_interactive(&mut shell),
    }
}

fn run_interactive(shell: &mut Shell) -> ExitCode {
    match Repl::new(shell).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            display_user_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Non-interactive `-c` mode: one line, same exit cleanup, and the process
/// exit code mirrors the last foreground status.
fn run_command(shell: &mut Shell, command: &str) -> ExitCode {
    let code = match shell.eval_line(command) {
        Ok(()) => ExitCode::from(shell.last_status().exit_code()),
        Err(err) if err.downcast_ref::<ShellExit>().is_some() => ExitCode::SUCCESS,
        Err(err) => {
            display_user_error(&err);
            ExitCode::FAILURE
        }
    };
    shell.exit();
    code
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SMSH_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
