use anyhow::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::shell::Shell;

mod cd;
mod exit;
mod status;

/// Builtin command function signature. `argv[0]` is the builtin's own name.
pub type BuiltinCommand = fn(&mut Shell, &[String]) -> Result<()>;

/// Registry of builtin commands, keyed by exact name. Dispatch is a whole-
/// string lookup: `cdx` is an external command, never a fuzzy match for `cd`.
static BUILTIN_COMMAND: Lazy<HashMap<&'static str, BuiltinCommand>> = Lazy::new(|| {
    let mut builtin: HashMap<&'static str, BuiltinCommand> = HashMap::new();
    builtin.insert("cd", cd::command);
    builtin.insert("exit", exit::command);
    builtin.insert("status", status::command);
    builtin
});

pub fn lookup(name: &str) -> Option<BuiltinCommand> {
    BUILTIN_COMMAND.get(name).copied()
}
