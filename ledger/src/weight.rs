//! Voting-weight lookup — the ledger's one external collaborator.

use tally_types::HolderAddress;

/// Balance lookup by holder identity.
///
/// Must be a pure, read-only function of ledger-external state at call time.
/// The ledger never caches the result: each vote re-queries the current
/// weight, so voting power can change between proposal creation and a given
/// vote. Weight is evaluated at vote time by design.
pub trait WeightProvider {
    /// The voting weight of `holder` right now. Zero means no voting power.
    fn balance_of(&self, holder: &HolderAddress) -> u128;
}

/// Allow injecting a borrowed provider, so a test can keep its handle on the
/// double it hands to the ledger.
impl<W: WeightProvider + ?Sized> WeightProvider for &W {
    fn balance_of(&self, holder: &HolderAddress) -> u128 {
        (**self).balance_of(holder)
    }
}
