use agora_content::ContentEvent;
use agora_governance::GovernanceEvent;
use agora_members::MemberEvent;
use serde::{Deserialize, Serialize};

/// Any event raised inside the platform, tagged by origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformEvent {
    Member(MemberEvent),
    Content(ContentEvent),
    Governance(GovernanceEvent),
}
