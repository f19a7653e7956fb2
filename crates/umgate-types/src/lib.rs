//! Shared types, the record adapter trait, and core utilities for umgate.
//!
//! Adapter crates depend only on this crate, so they build in parallel with
//! the access-control core.

pub mod error;
pub mod prelude;
pub mod record_adapter;
pub mod schema;
pub mod types;
pub mod utils;

// vim: ts=4
