//! The member record.

use agora_types::{ContentCid, MemberId, MemberStatus, PublicKey, WalletAddress};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// Every wallet that acts for this member. The first one registered it.
    pub wallets: Vec<WalletAddress>,
    pub status: MemberStatus,
    pub name_cid: ContentCid,
    pub profile_cid: ContentCid,
    /// Ed25519 key allowed to sign recovery claims, if the member set one.
    pub recovery_key: Option<PublicKey>,
    /// Bumped on every successful key-based recovery.
    pub recovery_nonce: u64,
}

impl Member {
    /// The wallet the member registered with.
    pub fn original_wallet(&self) -> Option<&WalletAddress> {
        self.wallets.first()
    }
}
