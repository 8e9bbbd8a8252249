//! Article registry.

use agora_registry::{MembershipRegistry, RegistryError};
use agora_types::{ContentCid, ItemId, Principal, ServiceId, WalletAddress};
use serde::{Deserialize, Serialize};

use crate::events::ContentEvent;
use crate::item::Article;
use crate::registry::{approved_author, Peers, Registry};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePeers {
    pub governance: ServiceId,
    /// May attach review ids to articles.
    pub reviews: ServiceId,
    /// May attach comment ids to articles.
    pub comments: ServiceId,
}

impl Peers for ArticlePeers {
    fn governance(&self) -> &ServiceId {
        &self.governance
    }
}

pub type Articles = Registry<Article, ArticlePeers>;

impl Registry<Article, ArticlePeers> {
    /// Publish an article authored by the (approved) caller.
    pub fn publish(
        &mut self,
        members: &dyn MembershipRegistry,
        caller: &Principal,
        co_authors: Vec<WalletAddress>,
        abstract_cid: ContentCid,
        content_cid: ContentCid,
    ) -> Result<ItemId, RegistryError> {
        let author = approved_author(members, caller)?;
        let id = self.items.push(Article {
            id: self.items.next_id(),
            author: author.clone(),
            co_authors,
            abstract_cid,
            content_cid,
            banned: false,
            reviews: Vec::new(),
            comments: Vec::new(),
        });

        tracing::info!(article = %id, author = %author, "article published");
        self.pending_events
            .push(ContentEvent::Published { author, article: id });
        Ok(id)
    }

    /// Record that `review` was posted on `article`. Reviews registry only.
    pub fn attach_review(
        &mut self,
        caller: &Principal,
        article: ItemId,
        review: ItemId,
    ) -> Result<(), RegistryError> {
        self.require_peer(caller, |p| &p.reviews)?;
        self.item_mut(article)?.reviews.push(review);
        Ok(())
    }

    /// Record that `comment` was posted on `article`. Comments registry only.
    pub fn attach_comment(
        &mut self,
        caller: &Principal,
        article: ItemId,
        comment: ItemId,
    ) -> Result<(), RegistryError> {
        self.require_peer(caller, |p| &p.comments)?;
        self.item_mut(article)?.comments.push(comment);
        Ok(())
    }
}
