use smsh_types::ShellError;
use tracing::debug;

/// How a command's standard streams are wired and whether it runs in the
/// background. Paths are kept verbatim; they resolve against the working
/// directory at exec time, not at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedirectPlan {
    pub input: Option<String>,
    pub output: Option<String>,
    pub background: bool,
}

/// Extract redirection targets and the background marker from a token list.
///
/// Scans once, left to right: `< path` and `> path` record the path and drop
/// both tokens; a bare `&` sets the background flag wherever it appears
/// (permissive legacy behavior, not just as the final token). Everything else
/// is passed through as the argument vector for exec.
///
/// Takes ownership of the tokens and returns a freshly built argument vector;
/// the original sequence is consumed.
pub fn resolve(tokens: Vec<String>) -> Result<(Vec<String>, RedirectPlan), ShellError> {
    let mut plan = RedirectPlan::default();
    let mut argv = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        match token.as_str() {
            "<" => match iter.next() {
                Some(path) => plan.input = Some(path),
                None => return Err(ShellError::MalformedRedirection('<')),
            },
            ">" => match iter.next() {
                Some(path) => plan.output = Some(path),
                None => return Err(ShellError::MalformedRedirection('>')),
            },
            "&" => plan.background = true,
            _ => argv.push(token),
        }
    }

    debug!("resolved argv: {:?} plan: {:?}", argv, plan);
    Ok((argv, plan))
}
