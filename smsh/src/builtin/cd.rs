use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::shell::Shell;

/// `cd [dir]` — with no argument, change to the home directory.
pub fn command(_shell: &mut Shell, argv: &[String]) -> Result<()> {
    let dir = match argv.get(1) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")),
    };
    debug!("cd to {:?}", dir);
    std::env::set_current_dir(&dir).with_context(|| format!("cd: {}", dir.display()))
}
