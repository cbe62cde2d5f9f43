//! Proposal records and their lifecycle.

use serde::{Deserialize, Serialize};
use tally_types::Timestamp;

/// A proposal's identifier: its zero-based position in the append-only
/// sequence, stable for the life of the ledger.
pub type ProposalId = u64;

/// A single vote-able item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// What is being voted on. Immutable after creation.
    pub description: String,
    /// Accumulated weighted tally. Only increases, and only while open.
    pub vote_count: u128,
    /// End of the voting window, fixed at creation.
    pub deadline: Timestamp,
    /// Whether the proposal has been finalized. False→true exactly once.
    pub executed: bool,
}

impl Proposal {
    pub fn new(description: impl Into<String>, deadline: Timestamp) -> Self {
        Self {
            description: description.into(),
            vote_count: 0,
            deadline,
            executed: false,
        }
    }

    /// Whether the voting window is open at `now` (half-open: strictly
    /// before the deadline).
    pub fn is_open(&self, now: Timestamp) -> bool {
        now < self.deadline
    }

    /// Derived lifecycle status at `now`.
    pub fn status(&self, now: Timestamp) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Finalized
        } else if self.is_open(now) {
            ProposalStatus::Open
        } else {
            ProposalStatus::Closed
        }
    }
}

/// The lifecycle status of a proposal, derived from its record and an
/// explicit `now`.
///
/// `Open → Closed` happens by the passage of time alone; `Closed → Finalized`
/// is the only executing transition and it is terminal. There is no path
/// back to `Open` and none that skips `Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Voting window open: `now < deadline`, not executed.
    Open,
    /// Window elapsed, awaiting finalization.
    Closed,
    /// Executed. Terminal.
    Finalized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_deadline_and_execution() {
        let mut p = Proposal::new("raise the cap", Timestamp::new(100));
        assert_eq!(p.status(Timestamp::new(99)), ProposalStatus::Open);
        assert_eq!(p.status(Timestamp::new(100)), ProposalStatus::Closed);
        p.executed = true;
        assert_eq!(p.status(Timestamp::new(100)), ProposalStatus::Finalized);
        // Execution wins even against a clock that went backwards.
        assert_eq!(p.status(Timestamp::new(0)), ProposalStatus::Finalized);
    }
}
