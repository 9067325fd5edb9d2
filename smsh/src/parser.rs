/// Split a raw input line into whitespace-delimited tokens. No quoting or
/// escaping; a token is exactly what the user typed between blanks.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(|s| s.to_string()).collect()
}

/// Blank lines and comment lines are skipped before any dispatch. A line
/// whose first token starts with `#` is a comment.
pub fn is_blank_or_comment(tokens: &[String]) -> bool {
    match tokens.first() {
        Some(first) => first.starts_with('#'),
        None => true,
    }
}
