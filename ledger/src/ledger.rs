//! The proposal ledger — proposal lifecycle and vote-tallying state machine.

use std::collections::{HashMap, HashSet};

use crate::error::LedgerError;
use crate::event::{EventBus, LedgerEvent};
use crate::proposal::{Proposal, ProposalId};
use crate::weight::WeightProvider;
use tally_types::{HolderAddress, Timestamp};

/// The weighted governance-voting ledger.
///
/// Owns the append-only proposal sequence, the per-proposal vote records,
/// and the admin identity fixed at construction. The [`WeightProvider`] is
/// the one injected collaborator; it has read-only external state and no
/// write access back into the ledger.
///
/// Execution is strictly serialized: every operation takes `&mut self` (or
/// `&self` for reads), runs to completion, and either fully commits or fully
/// aborts with no observable change.
pub struct ProposalLedger<W> {
    admin: HolderAddress,
    proposals: Vec<Proposal>,
    /// Per-proposal set of holders whose vote has been recorded.
    /// Write-once per (proposal, holder); never cleared.
    voters: HashMap<ProposalId, HashSet<HolderAddress>>,
    weight_provider: W,
    events: EventBus,
}

impl<W: WeightProvider> ProposalLedger<W> {
    /// Create an empty ledger. The admin identity is permanent — there is
    /// no update operation.
    pub fn new(admin: HolderAddress, weight_provider: W) -> Self {
        Self {
            admin,
            proposals: Vec::new(),
            voters: HashMap::new(),
            weight_provider,
            events: EventBus::new(),
        }
    }

    /// The identity permitted to create proposals.
    pub fn admin(&self) -> &HolderAddress {
        &self.admin
    }

    /// The injected balance-lookup collaborator.
    pub fn weight_provider(&self) -> &W {
        &self.weight_provider
    }

    /// Subscribe to ledger events. Listeners run inline after each
    /// successful mutation.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// Register a new proposal whose voting window runs from `now` for
    /// `duration_secs`. Admin only. Returns the new proposal's id.
    pub fn create_proposal(
        &mut self,
        caller: &HolderAddress,
        description: impl Into<String>,
        duration_secs: u64,
        now: Timestamp,
    ) -> Result<ProposalId, LedgerError> {
        if *caller != self.admin {
            return Err(LedgerError::Unauthorized(caller.clone()));
        }
        let deadline = now
            .checked_add_secs(duration_secs)
            .ok_or(LedgerError::InvalidDuration { duration_secs, now })?;

        let id = self.proposals.len() as ProposalId;
        let proposal = Proposal::new(description, deadline);
        let event = LedgerEvent::ProposalCreated {
            id,
            description: proposal.description.clone(),
            deadline,
        };
        self.proposals.push(proposal);

        tracing::info!(id, %deadline, "proposal created");
        self.events.emit(&event);
        Ok(id)
    }

    /// Cast `caller`'s vote on a proposal, weighted by their balance at this
    /// instant. One successful vote per (proposal, holder), ever. Returns
    /// the weight applied.
    pub fn cast_vote(
        &mut self,
        caller: &HolderAddress,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        let proposal = self
            .proposals
            .get(id as usize)
            .ok_or(LedgerError::ProposalNotFound(id))?;
        if !proposal.is_open(now) {
            return Err(LedgerError::VotingClosed(id));
        }
        if self
            .voters
            .get(&id)
            .is_some_and(|set| set.contains(caller))
        {
            return Err(LedgerError::AlreadyVoted {
                id,
                holder: caller.clone(),
            });
        }
        let weight = self.weight_provider.balance_of(caller);
        if weight == 0 {
            // Rejected before any record is written, so `has_voted` stays
            // meaningful: true only for identities that moved the tally.
            return Err(LedgerError::NoVotingPower(caller.clone()));
        }

        // All checks passed. Compute the new tally before touching any
        // state, so an overflow aborts with no partial mutation.
        let new_count = proposal
            .vote_count
            .checked_add(weight)
            .ok_or(LedgerError::TallyOverflow(id))?;
        self.proposals[id as usize].vote_count = new_count;
        self.voters.entry(id).or_default().insert(caller.clone());

        tracing::debug!(id, voter = %caller, weight, tally = new_count, "vote recorded");
        self.events.emit(&LedgerEvent::Voted {
            id,
            voter: caller.clone(),
            weight,
        });
        Ok(weight)
    }

    /// Finalize a proposal whose voting window has elapsed. Callable by any
    /// identity — only creation is admin-gated. Terminal: succeeds at most
    /// once per proposal.
    pub fn finalize_proposal(
        &mut self,
        caller: &HolderAddress,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(LedgerError::ProposalNotFound(id))?;
        if proposal.is_open(now) {
            return Err(LedgerError::VotingStillOpen(id));
        }
        if proposal.executed {
            return Err(LedgerError::AlreadyExecuted(id));
        }
        proposal.executed = true;

        tracing::info!(id, executed_by = %caller, "proposal executed");
        self.events.emit(&LedgerEvent::ProposalExecuted { id });
        Ok(())
    }

    /// Read a proposal's record.
    pub fn get_proposal(&self, id: ProposalId) -> Result<&Proposal, LedgerError> {
        self.proposals
            .get(id as usize)
            .ok_or(LedgerError::ProposalNotFound(id))
    }

    /// Number of proposals ever created.
    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Whether `holder` has a recorded vote on the proposal.
    pub fn has_voted(&self, id: ProposalId, holder: &HolderAddress) -> Result<bool, LedgerError> {
        if (id as usize) >= self.proposals.len() {
            return Err(LedgerError::ProposalNotFound(id));
        }
        Ok(self
            .voters
            .get(&id)
            .is_some_and(|set| set.contains(holder)))
    }

    pub(crate) fn state(&self) -> (&HolderAddress, &[Proposal], &HashMap<ProposalId, HashSet<HolderAddress>>) {
        (&self.admin, &self.proposals, &self.voters)
    }

    pub(crate) fn from_state(
        admin: HolderAddress,
        proposals: Vec<Proposal>,
        voters: HashMap<ProposalId, HashSet<HolderAddress>>,
        weight_provider: W,
    ) -> Self {
        Self {
            admin,
            proposals,
            voters,
            weight_provider,
            events: EventBus::new(),
        }
    }
}
