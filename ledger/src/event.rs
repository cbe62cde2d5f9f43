//! Events emitted on successful ledger transitions for subscribers.

use crate::proposal::ProposalId;
use tally_types::{HolderAddress, Timestamp};

/// Ledger-level events that observers can subscribe to via the [`EventBus`].
///
/// Emitted only after the corresponding state mutation has committed; a
/// failed operation emits nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A proposal was registered by the admin.
    ProposalCreated {
        id: ProposalId,
        description: String,
        deadline: Timestamp,
    },
    /// A weighted vote was recorded.
    Voted {
        id: ProposalId,
        voter: HolderAddress,
        weight: u128,
    },
    /// A proposal was finalized after its window closed.
    ProposalExecuted { id: ProposalId },
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline on the mutating call; keep handlers fast to
/// avoid stalling the operation that emitted the event.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
