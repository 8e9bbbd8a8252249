//! Key-based account recovery claims.
//!
//! A claim binds `(member, new_address, nonce)` under a fixed domain tag. The
//! nonce is the member's recovery counter, so a signature is only valid once.

use agora_types::{MemberId, PrivateKey, PublicKey, Signature, WalletAddress};

use crate::hash::blake2b_256_multi;
use crate::sign::{sign_message, verify_signature};

const RECOVERY_DOMAIN: &[u8] = b"agora-recovery-v1";

/// Digest a recovery claim is signed over.
pub fn recovery_digest(member: MemberId, new_address: &WalletAddress, nonce: u64) -> [u8; 32] {
    blake2b_256_multi(&[
        RECOVERY_DOMAIN,
        &member.get().to_le_bytes(),
        new_address.as_str().as_bytes(),
        &nonce.to_le_bytes(),
    ])
}

/// Sign a recovery claim with the member's recovery key.
pub fn sign_recovery(
    member: MemberId,
    new_address: &WalletAddress,
    nonce: u64,
    private_key: &PrivateKey,
) -> Signature {
    sign_message(&recovery_digest(member, new_address, nonce), private_key)
}

/// Check a recovery claim against the registered recovery key.
pub fn verify_recovery(
    member: MemberId,
    new_address: &WalletAddress,
    nonce: u64,
    signature: &Signature,
    public_key: &PublicKey,
) -> bool {
    verify_signature(&recovery_digest(member, new_address, nonce), signature, public_key)
}
