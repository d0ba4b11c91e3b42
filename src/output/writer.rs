//! Writing scripts to disk.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Permission bits for generated scripts (rw-r--r--).
#[cfg(unix)]
const SCRIPT_MODE: u32 = 0o644;

/// Create or truncate `path` and write `content` to it.
pub fn write_script(path: &Path, content: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SCRIPT_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()
}
