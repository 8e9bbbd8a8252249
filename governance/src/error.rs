use agora_registry::RegistryError;
use agora_types::{ErrorKind, MemberId, RegistryKind};
use thiserror::Error;

use crate::proposal::ProposalKey;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("{0} must be an approved member to vote")]
    NotApprovedMember(String),

    #[error("{voter} is the subject of {key} and cannot vote on it")]
    InterestedParty { voter: MemberId, key: ProposalKey },

    #[error("{voter} already voted on {key}")]
    AlreadyVoted { voter: MemberId, key: ProposalKey },

    #[error("{0} is already finalized")]
    ProposalFinalized(ProposalKey),

    #[error("the {0} registry is not trusted by governance")]
    UntrustedRegistry(RegistryKind),

    #[error("invalid governance parameter: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotApprovedMember(_)
            | Self::InterestedParty { .. }
            | Self::UntrustedRegistry(_) => ErrorKind::Authorization,
            Self::AlreadyVoted { .. } => ErrorKind::DuplicateVote,
            Self::ProposalFinalized(_) | Self::InvalidParams(_) => ErrorKind::State,
            Self::Registry(e) => e.kind(),
        }
    }
}
