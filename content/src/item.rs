//! Content item records.

use agora_types::{ContentCid, ItemId, RegistryKind, WalletAddress};
use serde::{Deserialize, Serialize};

/// Behaviour shared by every kind of content item.
pub trait Item {
    const KIND: RegistryKind;

    fn id(&self) -> ItemId;

    fn author(&self) -> &WalletAddress;

    fn is_banned(&self) -> bool;

    fn mark_banned(&mut self);
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Article {
    pub id: ItemId,
    pub author: WalletAddress,
    pub co_authors: Vec<WalletAddress>,
    pub abstract_cid: ContentCid,
    pub content_cid: ContentCid,
    pub banned: bool,
    pub reviews: Vec<ItemId>,
    pub comments: Vec<ItemId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Review {
    pub id: ItemId,
    pub author: WalletAddress,
    pub article: ItemId,
    pub content_cid: ContentCid,
    pub banned: bool,
    pub comments: Vec<ItemId>,
}

/// What a comment is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentTarget {
    Article(ItemId),
    Review(ItemId),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: ItemId,
    pub author: WalletAddress,
    pub target: CommentTarget,
    pub content_cid: ContentCid,
    pub banned: bool,
}

macro_rules! impl_item {
    ($ty:ty, $kind:expr) => {
        impl Item for $ty {
            const KIND: RegistryKind = $kind;

            fn id(&self) -> ItemId {
                self.id
            }

            fn author(&self) -> &WalletAddress {
                &self.author
            }

            fn is_banned(&self) -> bool {
                self.banned
            }

            fn mark_banned(&mut self) {
                self.banned = true;
            }
        }
    };
}

impl_item!(Article, RegistryKind::Article);
impl_item!(Review, RegistryKind::Review);
impl_item!(Comment, RegistryKind::Comment);
