//! Review registry.

use agora_registry::{MembershipRegistry, RegistryError};
use agora_types::{ContentCid, ItemId, Principal, RegistryKind, ServiceId};
use serde::{Deserialize, Serialize};

use crate::articles::Articles;
use crate::events::ContentEvent;
use crate::item::Review;
use crate::registry::{approved_author, Peers, Registry};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPeers {
    pub governance: ServiceId,
    /// The article registry reviews attach to.
    pub articles: ServiceId,
    /// May attach comment ids to reviews.
    pub comments: ServiceId,
}

impl Peers for ReviewPeers {
    fn governance(&self) -> &ServiceId {
        &self.governance
    }
}

pub type Reviews = Registry<Review, ReviewPeers>;

impl Registry<Review, ReviewPeers> {
    /// Post a review on a live article and link it from the article.
    pub fn post(
        &mut self,
        members: &dyn MembershipRegistry,
        articles: &mut Articles,
        caller: &Principal,
        content_cid: ContentCid,
        article: ItemId,
    ) -> Result<ItemId, RegistryError> {
        let author = approved_author(members, caller)?;
        self.require_trusted(&*articles, |p| &p.articles)?;
        let target = articles.get(article).ok_or(RegistryError::ItemNotFound {
            registry: RegistryKind::Article,
            item: article,
        })?;
        if target.banned {
            return Err(RegistryError::ItemBanned {
                registry: RegistryKind::Article,
                item: article,
            });
        }

        let id = self.items.next_id();
        articles.attach_review(&self.as_caller(), article, id)?;
        self.items.push(Review {
            id,
            author: author.clone(),
            article,
            content_cid,
            banned: false,
            comments: Vec::new(),
        });

        tracing::info!(review = %id, article = %article, author = %author, "review posted");
        self.pending_events.push(ContentEvent::ReviewPosted {
            author,
            review: id,
            article,
        });
        Ok(id)
    }

    /// Record that `comment` was posted on `review`. Comments registry only.
    pub fn attach_comment(
        &mut self,
        caller: &Principal,
        review: ItemId,
        comment: ItemId,
    ) -> Result<(), RegistryError> {
        self.require_peer(caller, |p| &p.comments)?;
        self.item_mut(review)?.comments.push(comment);
        Ok(())
    }
}
