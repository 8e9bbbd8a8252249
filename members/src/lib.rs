//! Member registry for the Agora platform.
//!
//! Members register with a wallet and wait in `Pending` until admitted. The
//! first `founding_members` are admitted by the deploying owner; once that many
//! are approved, ownership passes to governance for good and every further
//! status change arrives through governance votes.

pub mod events;
pub mod member;
pub mod registry;

pub use events::MemberEvent;
pub use member::Member;
pub use registry::{MemberPeers, Members};
