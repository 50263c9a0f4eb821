//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module; `wiring` holds the
//! connection setup they share.

pub mod jobs;
pub mod migrate;
pub mod seed;
pub mod serve;
pub mod wiring;
