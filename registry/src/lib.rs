//! Registry interfaces for the Agora platform.
//!
//! The governance core never owns members or content. It talks to them
//! through these traits, and every implementation (the real registries, the
//! nullables used in tests) is written against them.

pub mod binding;
pub mod content;
pub mod error;
pub mod host;
pub mod membership;

pub use binding::PeerBinding;
pub use content::ContentRegistry;
pub use error::RegistryError;
pub use host::GovernanceHost;
pub use membership::{require_approved, MembershipRegistry};
