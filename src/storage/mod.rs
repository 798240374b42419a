// Local storage module.
// Config, log, and download locations, plus atomic file writes.

pub mod paths;
pub mod store;

pub use paths::*;
pub use store::{read_text, write_bytes};
