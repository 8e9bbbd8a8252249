//! The single-writer host that owns every registry and the engine.

use std::path::Path;

use agora_content::{
    ArticlePeers, Articles, CommentPeers, CommentTarget, Comments, ReviewPeers, Reviews,
};
use agora_governance::{Action, GovernanceEngine, TrustedRegistries, VoteOutcome};
use agora_members::{MemberPeers, Members};
use agora_registry::{ContentRegistry, GovernanceHost, MembershipRegistry};
use agora_types::{
    ContentCid, ItemId, MemberId, Principal, PublicKey, RegistryKind, ServiceId, Signature,
    WalletAddress,
};
use serde::{Deserialize, Serialize};

use crate::config::PlatformConfig;
use crate::error::PlatformError;
use crate::events::PlatformEvent;

pub const MEMBERS: &str = "members";
pub const ARTICLES: &str = "articles";
pub const REVIEWS: &str = "reviews";
pub const COMMENTS: &str = "comments";
pub const GOVERNANCE: &str = "governance";

/// Every registry the governance engine can act on.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registries {
    pub members: Members,
    pub articles: Articles,
    pub reviews: Reviews,
    pub comments: Comments,
}

impl GovernanceHost for Registries {
    fn members(&self) -> &dyn MembershipRegistry {
        &self.members
    }

    fn members_mut(&mut self) -> &mut dyn MembershipRegistry {
        &mut self.members
    }

    fn content(&self, kind: RegistryKind) -> Option<&dyn ContentRegistry> {
        let registry: &dyn ContentRegistry = match kind {
            RegistryKind::Article => &self.articles,
            RegistryKind::Review => &self.reviews,
            RegistryKind::Comment => &self.comments,
        };
        Some(registry)
    }

    fn content_mut(&mut self, kind: RegistryKind) -> Option<&mut dyn ContentRegistry> {
        let registry: &mut dyn ContentRegistry = match kind {
            RegistryKind::Article => &mut self.articles,
            RegistryKind::Review => &mut self.reviews,
            RegistryKind::Comment => &mut self.comments,
        };
        Some(registry)
    }
}

/// The whole platform state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Platform {
    registries: Registries,
    governance: GovernanceEngine,
}

impl Platform {
    /// Build every registry and run the one-time configuration phase.
    ///
    /// `deployer` owns bootstrap admission and is the initializer of every
    /// peer binding. Configuration cannot be repeated afterwards.
    pub fn new(config: &PlatformConfig, deployer: Principal) -> Result<Self, PlatformError> {
        config.validate()?;
        let governance_id = ServiceId::new(GOVERNANCE);

        let mut members = Members::new(
            ServiceId::new(MEMBERS),
            deployer.clone(),
            config.founding_members,
            deployer.clone(),
        );
        let mut articles = Articles::new(ServiceId::new(ARTICLES), deployer.clone());
        let mut reviews = Reviews::new(ServiceId::new(REVIEWS), deployer.clone());
        let mut comments = Comments::new(ServiceId::new(COMMENTS), deployer.clone());
        let mut governance =
            GovernanceEngine::new(governance_id.clone(), &config.governance, deployer.clone());

        members.configure(
            &deployer,
            MemberPeers {
                governance: governance_id.clone(),
            },
        )?;
        articles.configure(
            &deployer,
            ArticlePeers {
                governance: governance_id.clone(),
                reviews: ServiceId::new(REVIEWS),
                comments: ServiceId::new(COMMENTS),
            },
        )?;
        reviews.configure(
            &deployer,
            ReviewPeers {
                governance: governance_id.clone(),
                articles: ServiceId::new(ARTICLES),
                comments: ServiceId::new(COMMENTS),
            },
        )?;
        comments.configure(
            &deployer,
            CommentPeers {
                governance: governance_id,
                articles: ServiceId::new(ARTICLES),
                reviews: ServiceId::new(REVIEWS),
            },
        )?;
        governance.configure(
            &deployer,
            TrustedRegistries {
                articles: ServiceId::new(ARTICLES),
                reviews: ServiceId::new(REVIEWS),
                comments: ServiceId::new(COMMENTS),
            },
        )?;

        tracing::info!(
            founding_members = config.founding_members,
            interested_party = ?config.governance.interested_party,
            "platform initialised"
        );
        Ok(Self {
            registries: Registries {
                members,
                articles,
                reviews,
                comments,
            },
            governance,
        })
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn members(&self) -> &Members {
        &self.registries.members
    }

    pub fn articles(&self) -> &Articles {
        &self.registries.articles
    }

    pub fn reviews(&self) -> &Reviews {
        &self.registries.reviews
    }

    pub fn comments(&self) -> &Comments {
        &self.registries.comments
    }

    pub fn governance(&self) -> &GovernanceEngine {
        &self.governance
    }

    // ── Members ────────────────────────────────────────────────────────

    pub fn register(
        &mut self,
        caller: &Principal,
        name_cid: ContentCid,
        profile_cid: ContentCid,
        recovery_key: Option<PublicKey>,
    ) -> Result<MemberId, PlatformError> {
        Ok(self
            .registries
            .members
            .register(caller, name_cid, profile_cid, recovery_key)?)
    }

    pub fn bootstrap_admit(&mut self, caller: &Principal, id: MemberId) -> Result<(), PlatformError> {
        Ok(self.registries.members.bootstrap_admit(caller, id)?)
    }

    pub fn add_own_wallet(
        &mut self,
        caller: &Principal,
        address: WalletAddress,
    ) -> Result<(), PlatformError> {
        Ok(self.registries.members.add_own_wallet(caller, address)?)
    }

    pub fn edit_profile(
        &mut self,
        caller: &Principal,
        profile_cid: ContentCid,
    ) -> Result<(), PlatformError> {
        Ok(self.registries.members.edit_profile(caller, profile_cid)?)
    }

    pub fn recover_with_key(
        &mut self,
        id: MemberId,
        new_address: WalletAddress,
        signature: &Signature,
    ) -> Result<(), PlatformError> {
        Ok(self
            .registries
            .members
            .recover_with_key(id, new_address, signature)?)
    }

    // ── Content ────────────────────────────────────────────────────────

    pub fn publish_article(
        &mut self,
        caller: &Principal,
        co_authors: Vec<WalletAddress>,
        abstract_cid: ContentCid,
        content_cid: ContentCid,
    ) -> Result<ItemId, PlatformError> {
        let r = &mut self.registries;
        Ok(r
            .articles
            .publish(&r.members, caller, co_authors, abstract_cid, content_cid)?)
    }

    pub fn post_review(
        &mut self,
        caller: &Principal,
        content_cid: ContentCid,
        article: ItemId,
    ) -> Result<ItemId, PlatformError> {
        let r = &mut self.registries;
        Ok(r
            .reviews
            .post(&r.members, &mut r.articles, caller, content_cid, article)?)
    }

    pub fn post_comment(
        &mut self,
        caller: &Principal,
        content_cid: ContentCid,
        target: CommentTarget,
    ) -> Result<ItemId, PlatformError> {
        let r = &mut self.registries;
        Ok(r.comments.post(
            &r.members,
            &mut r.articles,
            &mut r.reviews,
            caller,
            content_cid,
            target,
        )?)
    }

    // ── Governance ─────────────────────────────────────────────────────

    pub fn vote(&mut self, caller: &Principal, action: Action) -> Result<VoteOutcome, PlatformError> {
        Ok(self.governance.vote(&mut self.registries, caller, action)?)
    }

    pub fn vote_to_admit(
        &mut self,
        caller: &Principal,
        member: MemberId,
    ) -> Result<VoteOutcome, PlatformError> {
        self.vote(caller, Action::AdmitMember(member))
    }

    pub fn vote_to_ban(
        &mut self,
        caller: &Principal,
        member: MemberId,
    ) -> Result<VoteOutcome, PlatformError> {
        self.vote(caller, Action::BanMember(member))
    }

    pub fn vote_to_recover(
        &mut self,
        caller: &Principal,
        member: MemberId,
        new_address: WalletAddress,
    ) -> Result<VoteOutcome, PlatformError> {
        self.vote(
            caller,
            Action::RecoverAccount {
                member,
                new_address,
            },
        )
    }

    pub fn vote_to_ban_content(
        &mut self,
        caller: &Principal,
        registry: RegistryKind,
        item: ItemId,
    ) -> Result<VoteOutcome, PlatformError> {
        self.vote(caller, Action::BanContent { registry, item })
    }

    /// Current threshold `action` would be measured against.
    pub fn threshold_for(&self, action: &Action) -> Result<u64, PlatformError> {
        Ok(self.governance.threshold_for(&self.registries, action)?)
    }

    /// Events raised since the last call: members first, then content, then
    /// governance.
    pub fn drain_events(&mut self) -> Vec<PlatformEvent> {
        let r = &mut self.registries;
        let mut events: Vec<PlatformEvent> = r
            .members
            .drain_events()
            .into_iter()
            .map(PlatformEvent::Member)
            .collect();
        events.extend(
            r.articles
                .drain_events()
                .into_iter()
                .chain(r.reviews.drain_events())
                .chain(r.comments.drain_events())
                .map(PlatformEvent::Content),
        );
        events.extend(
            self.governance
                .drain_events()
                .into_iter()
                .map(PlatformEvent::Governance),
        );
        events
    }

    // ── Persistence ────────────────────────────────────────────────────

    /// Encode the whole state. Undrained events are not included.
    pub fn snapshot(&self) -> Result<Vec<u8>, PlatformError> {
        bincode::serialize(self).map_err(|e| PlatformError::Snapshot(e.to_string()))
    }

    pub fn restore(bytes: &[u8]) -> Result<Self, PlatformError> {
        let platform: Self =
            bincode::deserialize(bytes).map_err(|e| PlatformError::Snapshot(e.to_string()))?;
        tracing::info!(
            members = platform.members().member_count(),
            proposals = platform.governance.ledger().len(),
            "platform restored from snapshot"
        );
        Ok(platform)
    }

    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), PlatformError> {
        std::fs::write(path, self.snapshot()?)?;
        Ok(())
    }

    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self, PlatformError> {
        Self::restore(&std::fs::read(path)?)
    }
}
