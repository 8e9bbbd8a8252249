//! Cryptographic primitives for the Agora platform.
//!
//! - **Ed25519** for signing and verifying recovery claims
//! - **Blake2b** for domain-separated digests of those claims
//!
//! Recovery is signature based: a member registers a public key and later
//! proves control of the matching private key. Nothing secret is ever stored.

pub mod hash;
pub mod keys;
pub mod recovery;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{keypair_from_private, keypair_from_seed, public_from_private};
pub use recovery::{recovery_digest, sign_recovery, verify_recovery};
pub use sign::{sign_message, verify_signature};
