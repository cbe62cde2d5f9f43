//! Weighted proposal-voting ledger.
//!
//! A deterministic state machine: a fixed admin registers time-bounded
//! proposals, holders cast one vote each weighted by an external balance
//! lookup, and anyone finalizes a proposal once its window closes.
//!
//! Key principles:
//! - Caller identity and current time are explicit arguments on every
//!   operation — no ambient state, no internal clock.
//! - Every operation fully commits or fully aborts; a failure never leaves
//!   a partial mutation behind.
//! - Voting weight is re-queried from the [`WeightProvider`] at vote time,
//!   never cached across calls.

pub mod error;
pub mod event;
pub mod ledger;
pub mod proposal;
pub mod snapshot;
pub mod weight;

pub use error::LedgerError;
pub use event::{EventBus, LedgerEvent};
pub use ledger::ProposalLedger;
pub use proposal::{Proposal, ProposalId, ProposalStatus};
pub use snapshot::LedgerSnapshot;
pub use weight::WeightProvider;
