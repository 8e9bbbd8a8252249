//! Events emitted by the content registries.

use agora_types::{ItemId, RegistryKind, WalletAddress};
use serde::{Deserialize, Serialize};

use crate::item::CommentTarget;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentEvent {
    Published {
        author: WalletAddress,
        article: ItemId,
    },
    ReviewPosted {
        author: WalletAddress,
        review: ItemId,
        article: ItemId,
    },
    CommentPosted {
        author: WalletAddress,
        comment: ItemId,
        target: CommentTarget,
    },
    ItemBanned {
        registry: RegistryKind,
        item: ItemId,
    },
}
