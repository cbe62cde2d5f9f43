//! Holder identity type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque holder identity, attributed by the surrounding execution
/// environment on every call.
///
/// The ledger never inspects the contents — identities are only compared for
/// equality (admin check, duplicate-vote check) and forwarded to the weight
/// provider for balance lookup.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HolderAddress(String);

impl HolderAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HolderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HolderAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for HolderAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
