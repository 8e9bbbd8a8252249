//! Error taxonomy shared across crates.

use thiserror::Error;

/// Coarse classification every error in the workspace maps onto.
///
/// Callers match on this to tell causes apart without depending on each
/// crate's concrete error enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller is not allowed to perform the call.
    Authorization,
    /// Caller already voted on this exact proposal.
    DuplicateVote,
    /// Target is not in the status the call requires.
    State,
    /// Target does not exist in its owning registry.
    NotFound,
}

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),
}
