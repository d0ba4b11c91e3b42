//! Shell-style tokenization (shlex-like).

use thiserror::Error;

/// Reasons a command line could not be split into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unterminated single quote")]
    UnterminatedSingleQuote,

    #[error("unterminated double quote")]
    UnterminatedDoubleQuote,

    #[error("trailing backslash with nothing to escape")]
    TrailingEscape,
}

/// Tokenize a shell command into words, respecting quotes and escapes.
///
/// Quote delimiters are removed. Inside double quotes a backslash only
/// escapes `$`, `` ` ``, `"`, `\` and newline. A backslash-newline pair
/// outside single quotes is a line continuation and vanishes. An unquoted
/// `#` at the start of a word comments out the rest of the line. Only
/// space, tab, CR and LF separate words.
pub fn tokenize(input: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // `''` is a word even though `current` stays empty.
    let mut in_word = false;
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if in_single_quote {
            if c == '\'' {
                in_single_quote = false;
            } else {
                current.push(c);
            }
            continue;
        }

        if in_double_quote {
            match c {
                '"' => in_double_quote = false,
                '\\' => match chars.next() {
                    Some('\n') => {}
                    Some(next @ ('$' | '`' | '"' | '\\')) => current.push(next),
                    Some(next) => {
                        current.push('\\');
                        current.push(next);
                    }
                    None => return Err(TokenizeError::UnterminatedDoubleQuote),
                },
                _ => current.push(c),
            }
            continue;
        }

        // Outside quotes
        match c {
            '\\' => match chars.next() {
                Some('\n') => {}
                Some(next) => {
                    current.push(next);
                    in_word = true;
                }
                None => return Err(TokenizeError::TrailingEscape),
            },
            '\'' => {
                in_single_quote = true;
                in_word = true;
            }
            '"' => {
                in_double_quote = true;
                in_word = true;
            }
            '#' if !in_word => {
                // Skip to end of line
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        break;
                    }
                }
            }
            ' ' | '\t' | '\n' | '\r' => {
                if in_word {
                    tokens.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            _ => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_single_quote {
        return Err(TokenizeError::UnterminatedSingleQuote);
    }
    if in_double_quote {
        return Err(TokenizeError::UnterminatedDoubleQuote);
    }
    if in_word {
        tokens.push(current);
    }

    Ok(tokens)
}
