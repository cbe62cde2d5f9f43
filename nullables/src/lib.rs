//! Nullable infrastructure for deterministic testing.
//!
//! The ledger's external dependencies — the clock and the balance lookup —
//! are already explicit (time is a parameter, weight is a trait). This crate
//! provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the system clock or any external service
//!
//! Usage: drive `now` from a [`NullClock`] and inject a
//! [`NullWeightProvider`] in tests.

pub mod clock;
pub mod weight;

pub use clock::NullClock;
pub use weight::NullWeightProvider;
