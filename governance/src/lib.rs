//! Quorum governance for the Agora platform.
//!
//! Approved members vote on four kinds of proposal: admit a pending member,
//! ban a member, recover a member's account onto a new wallet, ban a piece of
//! content. The threshold is computed live from the approved membership at
//! every vote. The vote that reaches it triggers exactly one mutation in the
//! target registry, and the proposal is closed for good.
//!
//! Key principle: a vote is all or nothing. Validation, threshold and
//! dispatch all happen before the ledger records anything.

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod params;
pub mod proposal;
pub mod quorum;

pub use dispatch::{ActionDispatcher, TrustedRegistries};
pub use engine::{GovernanceEngine, VoteOutcome};
pub use error::GovernanceError;
pub use events::GovernanceEvent;
pub use ledger::ProposalLedger;
pub use params::GovernanceParams;
pub use proposal::{Action, ActionKind, Proposal, ProposalKey, TargetKey};
pub use quorum::{Electorate, InterestedPartyPolicy, QuorumEngine};
