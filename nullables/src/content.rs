//! Nullable content registry.

use agora_registry::{ContentRegistry, RegistryError};
use agora_types::{ItemId, Principal, RegistryKind, ServiceId, WalletAddress};

struct NullItem {
    author: WalletAddress,
    banned: bool,
}

/// An in-memory content registry of one kind.
///
/// Items are seeded directly; `ban_item` only accepts the governance
/// identity, like the real registries.
pub struct NullContent {
    identity: ServiceId,
    kind: RegistryKind,
    governance: ServiceId,
    items: Vec<NullItem>,
    refuse_next: bool,
    bans: Vec<ItemId>,
}

impl NullContent {
    /// A registry whose identity is the kind's name, governed by
    /// `"governance"`.
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            identity: ServiceId::new(kind.name()),
            kind,
            governance: ServiceId::new("governance"),
            items: Vec::new(),
            refuse_next: false,
            bans: Vec::new(),
        }
    }

    /// Present a different identity, e.g. to impersonate a trusted registry.
    pub fn with_identity(mut self, identity: ServiceId) -> Self {
        self.identity = identity;
        self
    }

    /// Seed an item and return its id (counted from 1).
    pub fn with_item(&mut self, author: WalletAddress) -> ItemId {
        self.items.push(NullItem {
            author,
            banned: false,
        });
        ItemId::new(self.items.len() as u64)
    }

    pub fn refuse_next_mutation(&mut self) {
        self.refuse_next = true;
    }

    /// Items banned through `ban_item`, oldest first.
    pub fn bans(&self) -> &[ItemId] {
        &self.bans
    }

    fn get(&self, item: ItemId) -> Result<&NullItem, RegistryError> {
        item.get()
            .checked_sub(1)
            .and_then(|i| self.items.get(i as usize))
            .ok_or(RegistryError::ItemNotFound {
                registry: self.kind,
                item,
            })
    }
}

impl ContentRegistry for NullContent {
    fn identity(&self) -> &ServiceId {
        &self.identity
    }

    fn kind(&self) -> RegistryKind {
        self.kind
    }

    fn item_exists(&self, item: ItemId) -> bool {
        self.get(item).is_ok()
    }

    fn is_banned(&self, item: ItemId) -> Result<bool, RegistryError> {
        Ok(self.get(item)?.banned)
    }

    fn author_of(&self, item: ItemId) -> Result<WalletAddress, RegistryError> {
        Ok(self.get(item)?.author.clone())
    }

    fn ban_item(&mut self, caller: &Principal, item: ItemId) -> Result<(), RegistryError> {
        if std::mem::take(&mut self.refuse_next) || !caller.is_service(&self.governance) {
            return Err(RegistryError::unauthorized(caller));
        }
        if self.is_banned(item)? {
            return Err(RegistryError::ItemBanned {
                registry: self.kind,
                item,
            });
        }
        let index = (item.get() - 1) as usize;
        self.items[index].banned = true;
        self.bans.push(item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::ErrorKind;

    fn addr(n: u8) -> WalletAddress {
        WalletAddress::new(format!("0x{:040x}", n))
    }

    #[test]
    fn ban_item_once() {
        let mut content = NullContent::new(RegistryKind::Article);
        let id = content.with_item(addr(1));
        let governance = Principal::Service(ServiceId::new("governance"));

        content.ban_item(&governance, id).unwrap();
        assert!(content.is_banned(id).unwrap());
        let err = content.ban_item(&governance, id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(content.bans(), &[id]);
    }

    #[test]
    fn missing_item_is_not_found() {
        let content = NullContent::new(RegistryKind::Review);
        assert!(!content.item_exists(ItemId::new(1)));
        assert!(!content.item_exists(ItemId::new(0)));
        assert_eq!(
            content.author_of(ItemId::new(1)).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
