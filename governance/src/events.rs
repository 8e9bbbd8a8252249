//! Events emitted by the governance engine.

use agora_types::{ItemId, MemberId, RegistryKind, WalletAddress};
use serde::{Deserialize, Serialize};

use crate::proposal::{ActionKind, TargetKey};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    /// Every accepted vote. `count` includes this vote.
    Voted {
        kind: ActionKind,
        target: TargetKey,
        voter: MemberId,
        count: u64,
    },
    Admitted {
        member: MemberId,
    },
    Banned {
        member: MemberId,
    },
    AccountRecovered {
        member: MemberId,
        address: WalletAddress,
    },
    ContentBanned {
        registry: RegistryKind,
        item: ItemId,
    },
}
