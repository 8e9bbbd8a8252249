use agora_types::{ErrorKind, ItemId, MemberId, MemberStatus, RegistryKind, WalletAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{caller} is not allowed to call this entry point")]
    Unauthorized { caller: String },

    #[error("{0} must be an approved member to use this feature")]
    NotApproved(String),

    #[error("bootstrap admission is closed, ownership belongs to governance")]
    BootstrapClosed,

    #[error("recovery proof for {0} is missing or invalid")]
    InvalidRecoveryProof(MemberId),

    #[error("{0} does not exist")]
    MemberNotFound(MemberId),

    #[error("wallet {0} is not registered")]
    WalletNotFound(WalletAddress),

    #[error("{registry} {item} does not exist")]
    ItemNotFound { registry: RegistryKind, item: ItemId },

    #[error("{member} is {actual}, expected {expected}")]
    InvalidStatus {
        member: MemberId,
        expected: MemberStatus,
        actual: MemberStatus,
    },

    #[error("wallet {0} is already registered")]
    WalletAlreadyRegistered(WalletAddress),

    #[error("{registry} {item} does not exist or is already banned")]
    ItemBanned { registry: RegistryKind, item: ItemId },

    #[error("peers have not been configured yet")]
    NotConfigured,

    #[error("peers have already been configured")]
    AlreadyConfigured,
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. }
            | Self::NotApproved(_)
            | Self::BootstrapClosed
            | Self::InvalidRecoveryProof(_) => ErrorKind::Authorization,
            Self::MemberNotFound(_) | Self::WalletNotFound(_) | Self::ItemNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::InvalidStatus { .. }
            | Self::WalletAlreadyRegistered(_)
            | Self::ItemBanned { .. }
            | Self::NotConfigured
            | Self::AlreadyConfigured => ErrorKind::State,
        }
    }

    pub fn unauthorized(caller: &agora_types::Principal) -> Self {
        Self::Unauthorized {
            caller: caller.to_string(),
        }
    }
}
