//! Shell command lexing and re-emission.

mod formatter;
mod operators;
mod quote;
mod tokenizer;

pub use formatter::{CONTINUATION, FormattedCommand, format_command, format_tokens};
pub use operators::{SHELL_OPERATORS, is_shell_operator};
pub use quote::quote_arg;
pub use tokenizer::{TokenizeError, tokenize};
