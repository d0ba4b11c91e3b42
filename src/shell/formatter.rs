//! Pretty-printing of a command as a line-continued block.

use super::operators::is_shell_operator;
use super::quote::quote_arg;
use super::tokenizer::{TokenizeError, tokenize};

/// Separator placed between the visual lines of a formatted command.
pub const CONTINUATION: &str = " \\\n  ";

/// A command rendered for inclusion in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedCommand {
    /// The text to emit (no trailing newline).
    pub text: String,
    /// Set when the command could not be tokenized and `text` is the raw line.
    pub passthrough: Option<TokenizeError>,
}

/// Format a raw command line.
///
/// Falls back to the unmodified line when its quoting is unbalanced.
pub fn format_command(command: &str) -> FormattedCommand {
    match tokenize(command) {
        Ok(tokens) => FormattedCommand {
            text: format_tokens(&tokens),
            passthrough: None,
        },
        Err(err) => FormattedCommand {
            text: command.to_string(),
            passthrough: Some(err),
        },
    }
}

/// Join tokens into one logical command, one flag or operator per line.
///
/// A flag-like unit absorbs the following token as its value unless that
/// token is itself a flag or an operator. Flags that take no value will
/// still absorb a following positional argument; the shell reads the
/// result identically either way.
pub fn format_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut lines = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter().map(AsRef::<str>::as_ref).peekable();

    while let Some(token) = iter.next() {
        let mut line = if is_shell_operator(token) {
            token.to_string()
        } else {
            quote_arg(token).into_owned()
        };

        if line.starts_with('-') {
            if let Some(value) =
                iter.next_if(|next| !next.starts_with('-') && !is_shell_operator(next))
            {
                line.push(' ');
                line.push_str(&quote_arg(value));
            }
        }

        lines.push(line);
    }

    lines.join(CONTINUATION)
}
