//! Comment registry.

use agora_registry::{MembershipRegistry, RegistryError};
use agora_types::{ContentCid, ItemId, Principal, RegistryKind, ServiceId};
use serde::{Deserialize, Serialize};

use crate::articles::Articles;
use crate::events::ContentEvent;
use crate::item::{Comment, CommentTarget};
use crate::registry::{approved_author, Peers, Registry};
use crate::reviews::Reviews;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPeers {
    pub governance: ServiceId,
    pub articles: ServiceId,
    pub reviews: ServiceId,
}

impl Peers for CommentPeers {
    fn governance(&self) -> &ServiceId {
        &self.governance
    }
}

pub type Comments = Registry<Comment, CommentPeers>;

impl Registry<Comment, CommentPeers> {
    /// Post a comment on a live article or review and link it from there.
    pub fn post(
        &mut self,
        members: &dyn MembershipRegistry,
        articles: &mut Articles,
        reviews: &mut Reviews,
        caller: &Principal,
        content_cid: ContentCid,
        target: CommentTarget,
    ) -> Result<ItemId, RegistryError> {
        let author = approved_author(members, caller)?;
        self.require_trusted(&*articles, |p| &p.articles)?;
        self.require_trusted(&*reviews, |p| &p.reviews)?;

        let id = self.items.next_id();
        let me = self.as_caller();
        match target {
            CommentTarget::Article(article) => {
                let banned = articles.get(article).map(|a| a.banned);
                check_live(RegistryKind::Article, article, banned)?;
                articles.attach_comment(&me, article, id)?;
            }
            CommentTarget::Review(review) => {
                let banned = reviews.get(review).map(|r| r.banned);
                check_live(RegistryKind::Review, review, banned)?;
                reviews.attach_comment(&me, review, id)?;
            }
        }
        self.items.push(Comment {
            id,
            author: author.clone(),
            target,
            content_cid,
            banned: false,
        });

        tracing::info!(comment = %id, on = ?target, author = %author, "comment posted");
        self.pending_events.push(ContentEvent::CommentPosted {
            author,
            comment: id,
            target,
        });
        Ok(id)
    }
}

fn check_live(
    registry: RegistryKind,
    item: ItemId,
    banned: Option<bool>,
) -> Result<(), RegistryError> {
    match banned {
        None => Err(RegistryError::ItemNotFound { registry, item }),
        Some(true) => Err(RegistryError::ItemBanned { registry, item }),
        Some(false) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::articles::ArticlePeers;
    use crate::reviews::ReviewPeers;
    use agora_nullables::NullMembers;
    use agora_registry::ContentRegistry;
    use agora_types::{ErrorKind, WalletAddress};

    fn addr(n: u8) -> WalletAddress {
        WalletAddress::new(format!("0x{:040x}", n))
    }

    fn wallet(n: u8) -> Principal {
        Principal::Wallet(addr(n))
    }

    fn service(name: &str) -> Principal {
        Principal::Service(ServiceId::new(name))
    }

    fn cid() -> ContentCid {
        ContentCid::new("Qmfdfxchesocnfdfrfdf54SDDFsDS")
    }

    struct Fixture {
        members: NullMembers,
        articles: Articles,
        reviews: Reviews,
        comments: Comments,
    }

    fn setup() -> Fixture {
        let deployer = service("deployer");
        let mut members = NullMembers::new();
        members.with_approved(addr(1));
        members.with_approved(addr(2));

        let mut articles = Articles::new(ServiceId::new("articles"), deployer.clone());
        let mut reviews = Reviews::new(ServiceId::new("reviews"), deployer.clone());
        let mut comments = Comments::new(ServiceId::new("comments"), deployer.clone());
        articles
            .configure(
                &deployer,
                ArticlePeers {
                    governance: ServiceId::new("governance"),
                    reviews: ServiceId::new("reviews"),
                    comments: ServiceId::new("comments"),
                },
            )
            .unwrap();
        reviews
            .configure(
                &deployer,
                ReviewPeers {
                    governance: ServiceId::new("governance"),
                    articles: ServiceId::new("articles"),
                    comments: ServiceId::new("comments"),
                },
            )
            .unwrap();
        comments
            .configure(
                &deployer,
                CommentPeers {
                    governance: ServiceId::new("governance"),
                    articles: ServiceId::new("articles"),
                    reviews: ServiceId::new("reviews"),
                },
            )
            .unwrap();

        articles
            .publish(&members, &wallet(1), vec![addr(7), addr(8)], cid(), cid())
            .unwrap();
        reviews
            .post(&members, &mut articles, &wallet(1), cid(), ItemId::new(1))
            .unwrap();
        Fixture {
            members,
            articles,
            reviews,
            comments,
        }
    }

    #[test]
    fn comments_attach_to_article_and_review() {
        let mut f = setup();
        let on_article = f
            .comments
            .post(
                &f.members,
                &mut f.articles,
                &mut f.reviews,
                &wallet(2),
                cid(),
                CommentTarget::Article(ItemId::new(1)),
            )
            .unwrap();
        let on_review = f
            .comments
            .post(
                &f.members,
                &mut f.articles,
                &mut f.reviews,
                &wallet(2),
                cid(),
                CommentTarget::Review(ItemId::new(1)),
            )
            .unwrap();

        assert_eq!(on_article, ItemId::new(1));
        assert_eq!(on_review, ItemId::new(2));
        assert_eq!(f.articles.get(ItemId::new(1)).unwrap().comments, vec![on_article]);
        assert_eq!(f.reviews.get(ItemId::new(1)).unwrap().comments, vec![on_review]);

        let comment = f.comments.get(on_article).unwrap();
        assert_eq!(comment.author, addr(2));
        assert_eq!(comment.target, CommentTarget::Article(ItemId::new(1)));
        assert_eq!(f.comments.len(), 2);
    }

    #[test]
    fn comment_requires_approved_member() {
        let mut f = setup();
        let err = f
            .comments
            .post(
                &f.members,
                &mut f.articles,
                &mut f.reviews,
                &wallet(3),
                cid(),
                CommentTarget::Article(ItemId::new(1)),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(f.comments.is_empty());
    }

    #[test]
    fn comment_on_banned_review_rejected() {
        let mut f = setup();
        f.reviews
            .ban_item(&service("governance"), ItemId::new(1))
            .unwrap();
        let err = f
            .comments
            .post(
                &f.members,
                &mut f.articles,
                &mut f.reviews,
                &wallet(2),
                cid(),
                CommentTarget::Review(ItemId::new(1)),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert!(f.reviews.get(ItemId::new(1)).unwrap().comments.is_empty());
    }

    #[test]
    fn comment_on_missing_article_rejected() {
        let mut f = setup();
        let err = f
            .comments
            .post(
                &f.members,
                &mut f.articles,
                &mut f.reviews,
                &wallet(2),
                cid(),
                CommentTarget::Article(ItemId::new(3)),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn ban_comment_flags_only_that_comment() {
        let mut f = setup();
        let id = f
            .comments
            .post(
                &f.members,
                &mut f.articles,
                &mut f.reviews,
                &wallet(2),
                cid(),
                CommentTarget::Article(ItemId::new(1)),
            )
            .unwrap();
        f.comments.ban_item(&service("governance"), id).unwrap();
        assert!(f.comments.is_banned(id).unwrap());
        assert!(!f.articles.is_banned(ItemId::new(1)).unwrap());
    }
}
