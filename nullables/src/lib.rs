//! Nullable registries for deterministic testing.
//!
//! The governance core only sees registries through the traits in
//! `agora-registry`. This crate provides in-memory implementations that:
//! - Can be put into any state programmatically
//! - Record every mutation they accept
//! - Can be told to refuse the next mutation, to exercise rollback paths
//!
//! Usage: build a [`NullHost`], seed it, and hand it to the engine.

pub mod content;
pub mod host;
pub mod members;

pub use content::NullContent;
pub use host::NullHost;
pub use members::{MemberCall, NullMembers};
