//! Shell control and redirection operators.

/// Every token treated as an operator when re-emitting a command.
pub const SHELL_OPERATORS: &[&str] = &[">", ">>", "<", "|", "2>", "1>", "&>", "&&", "||", ";"];

/// Check whether a token is a control/redirection operator (exact match).
pub fn is_shell_operator(token: &str) -> bool {
    SHELL_OPERATORS.contains(&token)
}
