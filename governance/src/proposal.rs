//! Governance actions and the proposals that collect votes for them.

use agora_types::{ItemId, MemberId, RegistryKind, WalletAddress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The four kinds of proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    AdmitMember,
    BanMember,
    RecoverAccount,
    BanContent,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdmitMember => "admit_member",
            Self::BanMember => "ban_member",
            Self::RecoverAccount => "recover_account",
            Self::BanContent => "ban_content",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a proposal is about.
///
/// Recovery proposals are keyed by member *and* replacement address, so votes
/// for different addresses never add up.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TargetKey {
    Member(MemberId),
    Recovery {
        member: MemberId,
        address: WalletAddress,
    },
    Content {
        registry: RegistryKind,
        item: ItemId,
    },
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(member) => write!(f, "{member}"),
            Self::Recovery { member, address } => write!(f, "{member} -> {address}"),
            Self::Content { registry, item } => write!(f, "{registry}/{item}"),
        }
    }
}

/// Ledger key: one proposal per (kind, target).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProposalKey {
    pub kind: ActionKind,
    pub target: TargetKey,
}

impl fmt::Display for ProposalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.kind, self.target)
    }
}

/// An action a member votes for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    AdmitMember(MemberId),
    BanMember(MemberId),
    RecoverAccount {
        member: MemberId,
        new_address: WalletAddress,
    },
    BanContent {
        registry: RegistryKind,
        item: ItemId,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::AdmitMember(_) => ActionKind::AdmitMember,
            Self::BanMember(_) => ActionKind::BanMember,
            Self::RecoverAccount { .. } => ActionKind::RecoverAccount,
            Self::BanContent { .. } => ActionKind::BanContent,
        }
    }

    pub fn key(&self) -> ProposalKey {
        let target = match self {
            Self::AdmitMember(member) | Self::BanMember(member) => TargetKey::Member(*member),
            Self::RecoverAccount {
                member,
                new_address,
            } => TargetKey::Recovery {
                member: *member,
                address: new_address.clone(),
            },
            Self::BanContent { registry, item } => TargetKey::Content {
                registry: *registry,
                item: *item,
            },
        };
        ProposalKey {
            kind: self.kind(),
            target,
        }
    }
}

/// Votes collected for one key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Members who voted, each at most once.
    pub voters: BTreeSet<MemberId>,
    /// Set by the vote that reached the threshold. Never cleared.
    pub finalized: bool,
}

impl Proposal {
    pub fn vote_count(&self) -> u64 {
        self.voters.len() as u64
    }

    pub fn has_voted(&self, voter: MemberId) -> bool {
        self.voters.contains(&voter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admit_and_ban_keys_differ() {
        let m = MemberId::new(3);
        assert_ne!(Action::AdmitMember(m).key(), Action::BanMember(m).key());
        assert_eq!(Action::BanMember(m).key().target, TargetKey::Member(m));
    }

    #[test]
    fn recovery_key_includes_address() {
        let m = MemberId::new(1);
        let a = WalletAddress::new(format!("0x{:040x}", 1));
        let b = WalletAddress::new(format!("0x{:040x}", 2));
        let to_a = Action::RecoverAccount {
            member: m,
            new_address: a,
        };
        let to_b = Action::RecoverAccount {
            member: m,
            new_address: b,
        };
        assert_ne!(to_a.key(), to_b.key());
        assert_eq!(to_a.kind(), ActionKind::RecoverAccount);
    }

    #[test]
    fn display_names_the_target() {
        let key = Action::BanContent {
            registry: RegistryKind::Review,
            item: ItemId::new(4),
        }
        .key();
        assert_eq!(key.to_string(), "ban_content of reviews/item#4");
    }
}
