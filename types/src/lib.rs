//! Fundamental types for the tally ledger.
//!
//! This crate defines the types shared across the workspace: holder
//! identities and timestamps. Both follow the explicit-parameter discipline:
//! the caller identity and the current time are always passed into an
//! operation, never read from ambient state.

pub mod address;
pub mod time;

pub use address::HolderAddress;
pub use time::Timestamp;
