//! Proposal ledger: who voted for what, and which proposals are closed.

use agora_types::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::GovernanceError;
use crate::proposal::{Proposal, ProposalKey};

/// All proposals ever voted on, keyed by (kind, target).
///
/// A proposal comes into existence with its first vote. It never expires and
/// never reopens once finalized.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProposalLedger {
    proposals: BTreeMap<ProposalKey, Proposal>,
}

impl ProposalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The count `voter`'s vote would produce, without recording it.
    pub fn check_vote(&self, key: &ProposalKey, voter: MemberId) -> Result<u64, GovernanceError> {
        let Some(proposal) = self.proposals.get(key) else {
            return Ok(1);
        };
        if proposal.has_voted(voter) {
            return Err(GovernanceError::AlreadyVoted {
                voter,
                key: key.clone(),
            });
        }
        if proposal.finalized {
            return Err(GovernanceError::ProposalFinalized(key.clone()));
        }
        Ok(proposal.vote_count() + 1)
    }

    /// Record `voter`'s vote and optionally close the proposal.
    pub fn commit_vote(
        &mut self,
        key: &ProposalKey,
        voter: MemberId,
        finalize: bool,
    ) -> Result<u64, GovernanceError> {
        self.check_vote(key, voter)?;
        let proposal = self.proposals.entry(key.clone()).or_default();
        proposal.voters.insert(voter);
        proposal.finalized = finalize;
        Ok(proposal.vote_count())
    }

    /// Record a vote that does not finalize.
    pub fn record_vote(&mut self, key: &ProposalKey, voter: MemberId) -> Result<u64, GovernanceError> {
        self.commit_vote(key, voter, false)
    }

    pub fn vote_count(&self, key: &ProposalKey) -> u64 {
        self.proposals.get(key).map_or(0, Proposal::vote_count)
    }

    pub fn is_finalized(&self, key: &ProposalKey) -> bool {
        self.proposals.get(key).is_some_and(|p| p.finalized)
    }

    pub fn proposal(&self, key: &ProposalKey) -> Option<&Proposal> {
        self.proposals.get(key)
    }

    pub fn voters(&self, key: &ProposalKey) -> Vec<MemberId> {
        self.proposals
            .get(key)
            .map(|p| p.voters.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of proposals with at least one vote.
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::Action;
    use agora_types::ErrorKind;

    fn key(target: u64) -> ProposalKey {
        Action::AdmitMember(MemberId::new(target)).key()
    }

    #[test]
    fn votes_accumulate() {
        let mut ledger = ProposalLedger::new();
        assert_eq!(ledger.record_vote(&key(9), MemberId::new(1)).unwrap(), 1);
        assert_eq!(ledger.record_vote(&key(9), MemberId::new(2)).unwrap(), 2);
        assert_eq!(ledger.vote_count(&key(9)), 2);
        assert_eq!(ledger.voters(&key(9)), vec![MemberId::new(1), MemberId::new(2)]);
        assert_eq!(ledger.vote_count(&key(8)), 0);
    }

    #[test]
    fn double_vote_rejected() {
        let mut ledger = ProposalLedger::new();
        ledger.record_vote(&key(9), MemberId::new(1)).unwrap();
        let err = ledger.record_vote(&key(9), MemberId::new(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateVote);
        assert_eq!(ledger.vote_count(&key(9)), 1);
    }

    #[test]
    fn same_voter_on_different_keys_is_fine() {
        let mut ledger = ProposalLedger::new();
        ledger.record_vote(&key(9), MemberId::new(1)).unwrap();
        ledger.record_vote(&key(10), MemberId::new(1)).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn finalized_proposal_rejects_new_votes() {
        let mut ledger = ProposalLedger::new();
        ledger.commit_vote(&key(9), MemberId::new(1), true).unwrap();
        assert!(ledger.is_finalized(&key(9)));

        let err = ledger.check_vote(&key(9), MemberId::new(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert!(matches!(err, GovernanceError::ProposalFinalized(_)));
    }

    #[test]
    fn check_vote_does_not_record() {
        let ledger = ProposalLedger::new();
        assert_eq!(ledger.check_vote(&key(9), MemberId::new(1)).unwrap(), 1);
        assert!(ledger.is_empty());
        assert!(ledger.proposal(&key(9)).is_none());
    }

    #[test]
    fn ledger_survives_bincode() {
        let mut ledger = ProposalLedger::new();
        ledger.commit_vote(&key(9), MemberId::new(1), true).unwrap();
        ledger.record_vote(&key(3), MemberId::new(2)).unwrap();

        let bytes = bincode::serialize(&ledger).unwrap();
        let restored: ProposalLedger = bincode::deserialize(&bytes).unwrap();
        assert!(restored.is_finalized(&key(9)));
        assert_eq!(restored.voters(&key(3)), vec![MemberId::new(2)]);
    }
}
