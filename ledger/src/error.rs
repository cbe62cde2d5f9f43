use crate::proposal::ProposalId;
use tally_types::{HolderAddress, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("holder {0} is not authorized to create proposals")]
    Unauthorized(HolderAddress),

    #[error("duration {duration_secs}s overflows the deadline at {now}")]
    InvalidDuration { duration_secs: u64, now: Timestamp },

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("voting on proposal {0} has closed")]
    VotingClosed(ProposalId),

    #[error("holder {holder} has already voted on proposal {id}")]
    AlreadyVoted { id: ProposalId, holder: HolderAddress },

    #[error("holder {0} has no voting power")]
    NoVotingPower(HolderAddress),

    #[error("voting on proposal {0} is still open")]
    VotingStillOpen(ProposalId),

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("vote tally overflow on proposal {0}")]
    TallyOverflow(ProposalId),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
