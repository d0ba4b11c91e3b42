//! Job naming and script placement.

mod filename;
mod name;

pub use filename::{SCRIPT_EXTENSION, resolve_script_path};
pub use name::{TRIMMED_EXTENSIONS, derive_job_name};
