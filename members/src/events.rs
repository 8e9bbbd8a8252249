//! Events emitted by the member registry.

use agora_types::{ContentCid, MemberId, ServiceId, WalletAddress};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberEvent {
    Registered {
        address: WalletAddress,
        member: MemberId,
    },
    Approved {
        member: MemberId,
    },
    Banned {
        member: MemberId,
    },
    /// A member attached another wallet themselves.
    WalletAdded {
        address: WalletAddress,
        member: MemberId,
    },
    /// A wallet was attached by governance vote or a recovery proof.
    ProfileRecovered {
        address: WalletAddress,
        member: MemberId,
    },
    ProfileEdited {
        address: WalletAddress,
        member: MemberId,
        profile_cid: ContentCid,
    },
    /// Bootstrap admission ended; governance is now the only admitter.
    OwnershipTransferred {
        governance: ServiceId,
    },
}
