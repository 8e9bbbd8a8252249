//! Arena storage with a per-registry monotonic id counter.

use agora_types::{ItemId, WalletAddress};
use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Items stored at `id - 1`. Ids start at 1 and are never reused.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemArena<T> {
    items: Vec<T>,
}

impl<T: Item> ItemArena<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The id the next pushed item must carry.
    pub fn next_id(&self) -> ItemId {
        ItemId::new(self.items.len() as u64 + 1)
    }

    /// Append an item built for [`Self::next_id`].
    pub fn push(&mut self, item: T) -> ItemId {
        debug_assert_eq!(item.id(), self.next_id());
        let id = item.id();
        self.items.push(item);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        id.get()
            .checked_sub(1)
            .and_then(|index| self.items.get(index as usize))
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        id.get()
            .checked_sub(1)
            .and_then(|index| self.items.get_mut(index as usize))
    }

    pub fn len(&self) -> u64 {
        self.items.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids of every item authored by `author`, oldest first.
    pub fn ids_by_author(&self, author: &WalletAddress) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| item.author() == author)
            .map(Item::id)
            .collect()
    }
}

impl<T: Item> Default for ItemArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
