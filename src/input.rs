//! Reading command lines from the input file.

use std::io::{self, BufRead};

/// One command taken from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// 1-based physical line number in the input.
    pub number: usize,
    /// The command text, trimmed of surrounding whitespace.
    pub text: String,
}

/// Iterator over the commands of an input stream.
///
/// Blank lines and lines starting with `#` are skipped. Bytes that are not
/// valid UTF-8 are replaced with U+FFFD rather than failing the read.
pub struct CommandLines<R> {
    reader: R,
    buf: Vec<u8>,
    number: usize,
}

impl<R: BufRead> CommandLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            number: 0,
        }
    }
}

impl<R: BufRead> Iterator for CommandLines<R> {
    type Item = io::Result<CommandLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.number += 1;

            let line = String::from_utf8_lossy(&self.buf);
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            return Some(Ok(CommandLine {
                number: self.number,
                text: text.to_string(),
            }));
        }
    }
}
