//! Fundamental types for the Agora platform.
//!
//! Defines the types shared across every other crate in the workspace:
//! member and item identifiers, wallet addresses, principals, statuses,
//! recovery keys and the common error classification.

pub mod address;
pub mod error;
pub mod ids;
pub mod keys;
pub mod state;

pub use address::WalletAddress;
pub use error::{ErrorKind, TypesError};
pub use ids::{ContentCid, ItemId, MemberId, Principal, ServiceId};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use state::{MemberStatus, RegistryKind};
