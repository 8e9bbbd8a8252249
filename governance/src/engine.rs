//! Core governance engine: takes votes, closes proposals, dispatches actions.

use agora_registry::{require_approved, GovernanceHost, PeerBinding, RegistryError};
use agora_types::{ItemId, MemberId, Principal, RegistryKind, ServiceId, WalletAddress};
use serde::{Deserialize, Serialize};

use crate::dispatch::{ActionDispatcher, TrustedRegistries};
use crate::error::GovernanceError;
use crate::events::GovernanceEvent;
use crate::ledger::ProposalLedger;
use crate::params::GovernanceParams;
use crate::proposal::{Action, ActionKind, ProposalKey, TargetKey};
use crate::quorum::QuorumEngine;

/// Result of an accepted vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteOutcome {
    /// Votes on the proposal, this one included.
    pub count: u64,
    /// Threshold the vote was measured against.
    pub threshold: u64,
    /// Whether this vote closed the proposal and triggered the action.
    pub finalized: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceEngine {
    identity: ServiceId,
    quorum: QuorumEngine,
    ledger: ProposalLedger,
    trusted: PeerBinding<TrustedRegistries>,
    #[serde(skip)]
    pending_events: Vec<GovernanceEvent>,
}

impl GovernanceEngine {
    /// `identity` is the principal the engine presents to registries;
    /// `initializer` is the only principal allowed to call [`Self::configure`].
    pub fn new(identity: ServiceId, params: &GovernanceParams, initializer: Principal) -> Self {
        Self {
            identity,
            quorum: QuorumEngine::new(params),
            ledger: ProposalLedger::new(),
            trusted: PeerBinding::new(initializer),
            pending_events: Vec::new(),
        }
    }

    pub fn identity(&self) -> &ServiceId {
        &self.identity
    }

    /// Bind the content registries governance may ban items in. Once only.
    pub fn configure(
        &mut self,
        caller: &Principal,
        trusted: TrustedRegistries,
    ) -> Result<(), GovernanceError> {
        self.trusted.configure(caller, trusted)?;
        tracing::info!(identity = %self.identity, "governance configured");
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.trusted.is_configured()
    }

    pub fn ledger(&self) -> &ProposalLedger {
        &self.ledger
    }

    pub fn quorum(&self) -> &QuorumEngine {
        &self.quorum
    }

    /// Cast `caller`'s vote for `action`.
    ///
    /// Nothing is recorded unless the whole vote succeeds: the voter is an
    /// approved member, the target is still eligible, the voter has not voted
    /// on this open proposal, and, if this vote reaches the threshold, the
    /// target registry accepted the mutation.
    ///
    /// The threshold is only compared when a vote is cast. A proposal whose
    /// count already meets a threshold that has since shrunk stays open until
    /// an approved member who has not voted on it votes. If every approved
    /// member has voted, it stays open for good.
    pub fn vote<H: GovernanceHost + ?Sized>(
        &mut self,
        host: &mut H,
        caller: &Principal,
        action: Action,
    ) -> Result<VoteOutcome, GovernanceError> {
        let trusted = self.trusted.peers()?;
        let voter = require_approved(host.members(), caller).map_err(|e| match e {
            RegistryError::NotApproved(who) => GovernanceError::NotApprovedMember(who),
            other => other.into(),
        })?;

        // A finalized proposal's target is never eligible again.
        let dispatcher = ActionDispatcher::new(&self.identity, trusted);
        dispatcher.check_eligible(&*host, &action)?;
        let key = action.key();
        let count = self.ledger.check_vote(&key, voter)?;

        let electorate = self.quorum.electorate(&*host, &key)?;
        if electorate.barred == Some(voter) {
            return Err(GovernanceError::InterestedParty { voter, key });
        }
        let finalized = QuorumEngine::reached(count, electorate.threshold);

        let finalize_event = if finalized {
            match dispatcher.dispatch(host, &action) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(proposal = %key, error = %e, "dispatch rejected, vote not recorded");
                    return Err(e);
                }
            }
        } else {
            None
        };

        self.ledger.commit_vote(&key, voter, finalized)?;
        tracing::debug!(
            proposal = %key,
            voter = %voter,
            count,
            threshold = electorate.threshold,
            "vote recorded"
        );
        self.pending_events.push(GovernanceEvent::Voted {
            kind: key.kind,
            target: key.target.clone(),
            voter,
            count,
        });
        if let Some(event) = finalize_event {
            tracing::info!(proposal = %key, votes = count, "proposal finalized");
            self.pending_events.push(event);
        }

        Ok(VoteOutcome {
            count,
            threshold: electorate.threshold,
            finalized,
        })
    }

    pub fn vote_to_admit<H: GovernanceHost + ?Sized>(
        &mut self,
        host: &mut H,
        caller: &Principal,
        member: MemberId,
    ) -> Result<VoteOutcome, GovernanceError> {
        self.vote(host, caller, Action::AdmitMember(member))
    }

    pub fn vote_to_ban<H: GovernanceHost + ?Sized>(
        &mut self,
        host: &mut H,
        caller: &Principal,
        member: MemberId,
    ) -> Result<VoteOutcome, GovernanceError> {
        self.vote(host, caller, Action::BanMember(member))
    }

    pub fn vote_to_recover<H: GovernanceHost + ?Sized>(
        &mut self,
        host: &mut H,
        caller: &Principal,
        member: MemberId,
        new_address: WalletAddress,
    ) -> Result<VoteOutcome, GovernanceError> {
        self.vote(
            host,
            caller,
            Action::RecoverAccount {
                member,
                new_address,
            },
        )
    }

    pub fn vote_to_ban_content<H: GovernanceHost + ?Sized>(
        &mut self,
        host: &mut H,
        caller: &Principal,
        registry: RegistryKind,
        item: ItemId,
    ) -> Result<VoteOutcome, GovernanceError> {
        self.vote(host, caller, Action::BanContent { registry, item })
    }

    /// Current threshold for `action`, as the next vote would see it.
    pub fn threshold_for<H: GovernanceHost + ?Sized>(
        &self,
        host: &H,
        action: &Action,
    ) -> Result<u64, GovernanceError> {
        self.quorum.threshold_for(host, &action.key())
    }

    pub fn votes_to_admit(&self, member: MemberId) -> u64 {
        self.ledger.vote_count(&member_key(ActionKind::AdmitMember, member))
    }

    pub fn votes_to_ban(&self, member: MemberId) -> u64 {
        self.ledger.vote_count(&member_key(ActionKind::BanMember, member))
    }

    pub fn votes_to_recover(&self, member: MemberId, new_address: &WalletAddress) -> u64 {
        self.ledger.vote_count(&ProposalKey {
            kind: ActionKind::RecoverAccount,
            target: TargetKey::Recovery {
                member,
                address: new_address.clone(),
            },
        })
    }

    pub fn votes_to_ban_content(&self, registry: RegistryKind, item: ItemId) -> u64 {
        self.ledger.vote_count(&ProposalKey {
            kind: ActionKind::BanContent,
            target: TargetKey::Content { registry, item },
        })
    }

    pub fn drain_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

fn member_key(kind: ActionKind, member: MemberId) -> ProposalKey {
    ProposalKey {
        kind,
        target: TargetKey::Member(member),
    }
}
