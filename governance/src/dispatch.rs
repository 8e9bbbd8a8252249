//! Eligibility checks and the single registry mutation a proposal triggers.

use agora_registry::{ContentRegistry, GovernanceHost, RegistryError};
use agora_types::{ItemId, MemberId, MemberStatus, Principal, RegistryKind, ServiceId};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;
use crate::events::GovernanceEvent;
use crate::proposal::Action;

/// Content registry identities governance accepts, bound once at setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedRegistries {
    pub articles: ServiceId,
    pub reviews: ServiceId,
    pub comments: ServiceId,
}

impl TrustedRegistries {
    pub fn get(&self, kind: RegistryKind) -> &ServiceId {
        match kind {
            RegistryKind::Article => &self.articles,
            RegistryKind::Review => &self.reviews,
            RegistryKind::Comment => &self.comments,
        }
    }
}

/// Routes a finalized action to the registry that owns its target.
pub struct ActionDispatcher<'a> {
    identity: &'a ServiceId,
    trusted: &'a TrustedRegistries,
}

impl<'a> ActionDispatcher<'a> {
    pub fn new(identity: &'a ServiceId, trusted: &'a TrustedRegistries) -> Self {
        Self { identity, trusted }
    }

    /// Whether `action`'s target is still in a state the action applies to.
    ///
    /// Runs on every vote, so a proposal whose target changed state stops
    /// accepting votes.
    pub fn check_eligible<H: GovernanceHost + ?Sized>(
        &self,
        host: &H,
        action: &Action,
    ) -> Result<(), GovernanceError> {
        match action {
            Action::AdmitMember(member) => expect_status(host, *member, MemberStatus::Pending),
            Action::BanMember(member) => expect_status(host, *member, MemberStatus::Approved),
            Action::RecoverAccount {
                member,
                new_address,
            } => {
                expect_status(host, *member, MemberStatus::Approved)?;
                if host.members().is_registered(new_address) {
                    return Err(RegistryError::WalletAlreadyRegistered(new_address.clone()).into());
                }
                Ok(())
            }
            Action::BanContent { registry, item } => {
                let content = self.trusted_content(host, *registry)?;
                check_bannable(content, *item)
            }
        }
    }

    /// Perform the action's one mutation and return the event announcing it.
    pub fn dispatch<H: GovernanceHost + ?Sized>(
        &self,
        host: &mut H,
        action: &Action,
    ) -> Result<GovernanceEvent, GovernanceError> {
        let caller = Principal::Service(self.identity.clone());
        let event = match action {
            Action::AdmitMember(member) => {
                host.members_mut().admit(&caller, *member)?;
                GovernanceEvent::Admitted { member: *member }
            }
            Action::BanMember(member) => {
                host.members_mut().ban(&caller, *member)?;
                GovernanceEvent::Banned { member: *member }
            }
            Action::RecoverAccount {
                member,
                new_address,
            } => {
                host.members_mut()
                    .add_wallet(&caller, *member, new_address.clone())?;
                GovernanceEvent::AccountRecovered {
                    member: *member,
                    address: new_address.clone(),
                }
            }
            Action::BanContent { registry, item } => {
                self.trusted_content(&*host, *registry)?;
                let content = host
                    .content_mut(*registry)
                    .ok_or(GovernanceError::UntrustedRegistry(*registry))?;
                content.ban_item(&caller, *item)?;
                GovernanceEvent::ContentBanned {
                    registry: *registry,
                    item: *item,
                }
            }
        };
        Ok(event)
    }

    fn trusted_content<'h, H: GovernanceHost + ?Sized>(
        &self,
        host: &'h H,
        kind: RegistryKind,
    ) -> Result<&'h dyn ContentRegistry, GovernanceError> {
        match host.content(kind) {
            Some(content) if content.identity() == self.trusted.get(kind) => Ok(content),
            _ => Err(GovernanceError::UntrustedRegistry(kind)),
        }
    }
}

fn expect_status<H: GovernanceHost + ?Sized>(
    host: &H,
    member: MemberId,
    expected: MemberStatus,
) -> Result<(), GovernanceError> {
    let actual = host.members().status_of(member)?;
    if actual != expected {
        return Err(RegistryError::InvalidStatus {
            member,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}

fn check_bannable(content: &dyn ContentRegistry, item: ItemId) -> Result<(), GovernanceError> {
    if content.is_banned(item)? {
        return Err(RegistryError::ItemBanned {
            registry: content.kind(),
            item,
        }
        .into());
    }
    Ok(())
}
