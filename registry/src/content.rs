//! Content registry interface.

use agora_types::{ItemId, Principal, RegistryKind, ServiceId, WalletAddress};

use crate::error::RegistryError;

/// What the governance core needs from a content registry.
pub trait ContentRegistry {
    /// The identity this registry presents to its peers.
    fn identity(&self) -> &ServiceId;

    fn kind(&self) -> RegistryKind;

    fn item_exists(&self, item: ItemId) -> bool;

    fn is_banned(&self, item: ItemId) -> Result<bool, RegistryError>;

    fn author_of(&self, item: ItemId) -> Result<WalletAddress, RegistryError>;

    /// Flag an item as banned. Governance only.
    fn ban_item(&mut self, caller: &Principal, item: ItemId) -> Result<(), RegistryError>;
}
