//! Content registries for the Agora platform.
//!
//! Three registries (articles, reviews, comments) each own their items and
//! count ids independently from 1. They reference each other: an article
//! lists the reviews and comments attached to it, a review lists its comments.
//! Those back-references are written only through entry points that check the
//! caller against the peer identities bound at configuration time.
//!
//! Banning is the one mutation governance performs, through
//! [`agora_registry::ContentRegistry::ban_item`].

pub mod arena;
pub mod articles;
pub mod comments;
pub mod events;
pub mod item;
pub mod registry;
pub mod reviews;

pub use articles::{ArticlePeers, Articles};
pub use comments::{CommentPeers, Comments};
pub use events::ContentEvent;
pub use item::{Article, Comment, CommentTarget, Item, Review};
pub use registry::{Peers, Registry};
pub use reviews::{ReviewPeers, Reviews};
