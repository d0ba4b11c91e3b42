//! Script rendering and persistence.

mod script;
mod writer;

pub use script::render_script;
pub use writer::write_script;
