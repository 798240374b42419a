// Review generator API module.
// Provides the HTTP client, transport seam, and endpoint types.

pub mod client;
pub mod endpoints;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use client::{ReviewClient, Transport};
pub use types::*;
