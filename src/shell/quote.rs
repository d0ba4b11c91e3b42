//! Re-quoting of arguments for safe re-emission.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Arguments made only of these characters are emitted bare.
static SAFE_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_\-./@=:,+]+$").expect("safe-arg pattern is valid"));

/// Quote an argument so a POSIX shell parses it back to exactly `arg`.
///
/// Path-like arguments come back unchanged; anything else is wrapped in
/// single quotes with embedded `'` written as `'\''`.
pub fn quote_arg(arg: &str) -> Cow<'_, str> {
    if arg.is_empty() {
        return Cow::Borrowed("''");
    }
    if SAFE_ARG.is_match(arg) {
        return Cow::Borrowed(arg);
    }
    Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
}
