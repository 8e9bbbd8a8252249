//! Identifiers for members, content items and privileged services.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::WalletAddress;

/// Stable identity of a member. Assigned from 1 upwards and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(u64);

impl MemberId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member#{}", self.0)
    }
}

/// Identity of an item inside one content registry.
///
/// Each registry counts independently, so an `ItemId` is only meaningful
/// together with its [`crate::RegistryKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(u64);

impl ItemId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Identity of a privileged service (a registry or the governance engine).
///
/// Services authenticate each other by comparing `ServiceId`s against the
/// allow-list recorded at configuration time.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whoever is making a call: an end user's wallet or a peer service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principal {
    Wallet(WalletAddress),
    Service(ServiceId),
}

impl Principal {
    /// The wallet behind this principal, if it is one.
    pub fn wallet(&self) -> Option<&WalletAddress> {
        match self {
            Self::Wallet(address) => Some(address),
            Self::Service(_) => None,
        }
    }

    /// Whether this principal is the given service.
    pub fn is_service(&self, id: &ServiceId) -> bool {
        matches!(self, Self::Service(s) if s == id)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet(address) => write!(f, "{address}"),
            Self::Service(id) => write!(f, "service:{id}"),
        }
    }
}

impl From<WalletAddress> for Principal {
    fn from(address: WalletAddress) -> Self {
        Self::Wallet(address)
    }
}

impl From<ServiceId> for Principal {
    fn from(id: ServiceId) -> Self {
        Self::Service(id)
    }
}

/// Opaque reference to off-system content (profile, abstract, body...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentCid(String);

impl ContentCid {
    pub fn new(cid: impl Into<String>) -> Self {
        Self(cid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
