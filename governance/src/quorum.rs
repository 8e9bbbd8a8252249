//! Live quorum computation.
//!
//! The threshold is never stored. Each vote recomputes it from the current
//! approved membership, so a proposal opened with five approved members needs
//! six votes once a sixth member is admitted.

use agora_registry::GovernanceHost;
use agora_types::{MemberId, MemberStatus};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;
use crate::params::GovernanceParams;
use crate::proposal::{ActionKind, ProposalKey, TargetKey};

/// How the subject of a proposal is treated.
///
/// The subject is the member being banned or recovered, or the author of the
/// content being banned. Admission has no subject among the electorate since
/// the candidate is still pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestedPartyPolicy {
    /// The subject does not count towards the threshold. The subject of a
    /// ban cannot vote on it; a member being recovered can still vote for
    /// their own recovery.
    #[default]
    Exclude,
    /// Every approved member counts, the subject included.
    Include,
}

/// Who may vote on a proposal right now, and how many votes close it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Electorate {
    /// Approved subject left out of the threshold.
    pub subject: Option<MemberId>,
    /// Approved member barred from voting on this proposal.
    pub barred: Option<MemberId>,
    pub threshold: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuorumEngine {
    policy: InterestedPartyPolicy,
    minimum_threshold: u64,
}

impl QuorumEngine {
    pub fn new(params: &GovernanceParams) -> Self {
        Self {
            policy: params.interested_party,
            minimum_threshold: params.minimum_threshold,
        }
    }

    pub fn policy(&self) -> InterestedPartyPolicy {
        self.policy
    }

    /// The electorate for `key` given the host's current membership.
    pub fn electorate<H: GovernanceHost + ?Sized>(
        &self,
        host: &H,
        key: &ProposalKey,
    ) -> Result<Electorate, GovernanceError> {
        let members = host.members();
        let approved = members.approved_member_count();

        let subject = match self.policy {
            InterestedPartyPolicy::Include => None,
            InterestedPartyPolicy::Exclude => interested_party(host, key)?
                .filter(|id| members.status_of(*id).is_ok_and(|s| s == MemberStatus::Approved)),
        };
        let barred = subject.filter(|_| key.kind != ActionKind::RecoverAccount);
        let electorate = approved - u64::from(subject.is_some());

        Ok(Electorate {
            subject,
            barred,
            threshold: electorate.max(self.minimum_threshold),
        })
    }

    pub fn threshold_for<H: GovernanceHost + ?Sized>(
        &self,
        host: &H,
        key: &ProposalKey,
    ) -> Result<u64, GovernanceError> {
        Ok(self.electorate(host, key)?.threshold)
    }

    pub fn reached(count: u64, threshold: u64) -> bool {
        count >= threshold
    }
}

/// The member a proposal is about, if it is about one.
fn interested_party<H: GovernanceHost + ?Sized>(
    host: &H,
    key: &ProposalKey,
) -> Result<Option<MemberId>, GovernanceError> {
    match (&key.kind, &key.target) {
        (ActionKind::AdmitMember, _) => Ok(None),
        (_, TargetKey::Member(member)) => Ok(Some(*member)),
        (_, TargetKey::Recovery { member, .. }) => Ok(Some(*member)),
        (_, TargetKey::Content { registry, item }) => {
            let Some(content) = host.content(*registry) else {
                return Ok(None);
            };
            let author = content.author_of(*item)?;
            Ok(host.members().member_id_of(&author).ok())
        }
    }
}
