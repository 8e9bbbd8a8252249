//! Generic registry core shared by articles, reviews and comments.

use agora_registry::{ContentRegistry, PeerBinding, RegistryError};
use agora_types::{ItemId, Principal, RegistryKind, ServiceId, WalletAddress};
use serde::{Deserialize, Serialize};

use crate::arena::ItemArena;
use crate::events::ContentEvent;
use crate::item::Item;

/// A registry's peer set: at minimum, who governs it.
pub trait Peers {
    fn governance(&self) -> &ServiceId;
}

/// Items of one kind plus the peers allowed to touch them.
///
/// Kind-specific entry points (`publish`, `post`, `attach_*`) live on the
/// concrete aliases [`crate::Articles`], [`crate::Reviews`] and
/// [`crate::Comments`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registry<T, P> {
    pub(crate) identity: ServiceId,
    pub(crate) items: ItemArena<T>,
    pub(crate) peers: PeerBinding<P>,
    #[serde(skip)]
    pub(crate) pending_events: Vec<ContentEvent>,
}

impl<T: Item, P: Peers> Registry<T, P> {
    pub fn new(identity: ServiceId, initializer: Principal) -> Self {
        Self {
            identity,
            items: ItemArena::new(),
            peers: PeerBinding::new(initializer),
            pending_events: Vec::new(),
        }
    }

    /// Bind peers. Once only, by the initializer.
    pub fn configure(&mut self, caller: &Principal, peers: P) -> Result<(), RegistryError> {
        self.peers.configure(caller, peers)
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.get(id)
    }

    /// Number of items ever created.
    pub fn len(&self) -> u64 {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items authored by `author`. Authorship never changes hands.
    pub fn items_of(&self, author: &WalletAddress) -> Vec<ItemId> {
        self.items.ids_by_author(author)
    }

    pub fn drain_events(&mut self) -> Vec<ContentEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub(crate) fn item(&self, id: ItemId) -> Result<&T, RegistryError> {
        self.items.get(id).ok_or(RegistryError::ItemNotFound {
            registry: T::KIND,
            item: id,
        })
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Result<&mut T, RegistryError> {
        self.items.get_mut(id).ok_or(RegistryError::ItemNotFound {
            registry: T::KIND,
            item: id,
        })
    }

    /// Fail unless `caller` is the peer selected by `pick`.
    pub(crate) fn require_peer(
        &self,
        caller: &Principal,
        pick: impl FnOnce(&P) -> &ServiceId,
    ) -> Result<(), RegistryError> {
        let peers = self.peers.peers()?;
        if caller.is_service(pick(peers)) {
            Ok(())
        } else {
            Err(RegistryError::unauthorized(caller))
        }
    }

    /// Fail unless `other` presents the identity selected by `pick`.
    pub(crate) fn require_trusted<R: ContentRegistry + ?Sized>(
        &self,
        other: &R,
        pick: impl FnOnce(&P) -> &ServiceId,
    ) -> Result<(), RegistryError> {
        let peers = self.peers.peers()?;
        if other.identity() == pick(peers) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized {
                caller: other.identity().to_string(),
            })
        }
    }

    /// The principal this registry uses when calling its peers.
    pub(crate) fn as_caller(&self) -> Principal {
        Principal::Service(self.identity.clone())
    }
}

impl<T: Item, P: Peers> ContentRegistry for Registry<T, P> {
    fn identity(&self) -> &ServiceId {
        &self.identity
    }

    fn kind(&self) -> RegistryKind {
        T::KIND
    }

    fn item_exists(&self, item: ItemId) -> bool {
        self.items.get(item).is_some()
    }

    fn is_banned(&self, item: ItemId) -> Result<bool, RegistryError> {
        Ok(self.item(item)?.is_banned())
    }

    fn author_of(&self, item: ItemId) -> Result<WalletAddress, RegistryError> {
        Ok(self.item(item)?.author().clone())
    }

    fn ban_item(&mut self, caller: &Principal, item: ItemId) -> Result<(), RegistryError> {
        self.require_peer(caller, |p| p.governance())?;
        let record = self.item_mut(item)?;
        if record.is_banned() {
            return Err(RegistryError::ItemBanned {
                registry: T::KIND,
                item,
            });
        }
        record.mark_banned();

        tracing::info!(registry = %T::KIND, item = %item, "content banned");
        self.pending_events.push(ContentEvent::ItemBanned {
            registry: T::KIND,
            item,
        });
        Ok(())
    }
}

/// The wallet of an approved caller, who becomes the author of new content.
pub(crate) fn approved_author(
    members: &dyn agora_registry::MembershipRegistry,
    caller: &Principal,
) -> Result<WalletAddress, RegistryError> {
    agora_registry::require_approved(members, caller)?;
    caller
        .wallet()
        .cloned()
        .ok_or_else(|| RegistryError::NotApproved(caller.to_string()))
}
