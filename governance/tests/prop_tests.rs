use proptest::prelude::*;
use std::collections::BTreeSet;

use agora_governance::{
    Action, GovernanceEngine, GovernanceEvent, GovernanceParams, ProposalLedger, QuorumEngine,
    TrustedRegistries,
};
use agora_nullables::{MemberCall, NullHost};
use agora_types::{ErrorKind, MemberId, Principal, ServiceId, WalletAddress};

fn addr(n: u64) -> WalletAddress {
    WalletAddress::new(format!("0x{:040x}", n))
}

fn deployer() -> Principal {
    Principal::Service(ServiceId::new("deployer"))
}

fn configured_engine() -> GovernanceEngine {
    let mut engine = GovernanceEngine::new(
        ServiceId::new("governance"),
        &GovernanceParams::default(),
        deployer(),
    );
    engine
        .configure(
            &deployer(),
            TrustedRegistries {
                articles: ServiceId::new("articles"),
                reviews: ServiceId::new("reviews"),
                comments: ServiceId::new("comments"),
            },
        )
        .unwrap();
    engine
}

proptest! {
    /// Vote count always equals the number of distinct voters.
    #[test]
    fn count_equals_distinct_voters(voters in prop::collection::vec(1u64..20, 0..60)) {
        let mut ledger = ProposalLedger::new();
        let key = Action::AdmitMember(MemberId::new(99)).key();
        let mut seen = BTreeSet::new();

        for v in voters {
            let result = ledger.record_vote(&key, MemberId::new(v));
            if seen.insert(v) {
                prop_assert_eq!(result.unwrap(), seen.len() as u64);
            } else {
                prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::DuplicateVote);
            }
        }
        prop_assert_eq!(ledger.vote_count(&key), seen.len() as u64);
    }

    /// Whatever the voting order, admission finalizes on the n-th distinct
    /// vote, dispatches exactly once, and rejects everything after.
    #[test]
    fn admission_finalizes_exactly_once(
        approved in 1u64..12,
        order in prop::collection::vec(1u64..12, 1..40),
    ) {
        let mut host = NullHost::new();
        for i in 1..=approved {
            host.members.with_approved(addr(i));
        }
        let candidate = host.members.with_pending(addr(1000));
        let mut engine = configured_engine();
        let mut accepted = 0u64;

        for v in order.into_iter().filter(|v| *v <= approved) {
            let caller = Principal::Wallet(addr(v));
            match engine.vote_to_admit(&mut host, &caller, candidate) {
                Ok(outcome) => {
                    accepted += 1;
                    prop_assert_eq!(outcome.count, accepted);
                    prop_assert_eq!(outcome.finalized, accepted == approved);
                }
                Err(e) => {
                    prop_assert!(matches!(e.kind(), ErrorKind::DuplicateVote | ErrorKind::State));
                }
            }
        }

        let admits = host
            .members
            .calls()
            .iter()
            .filter(|c| **c == MemberCall::Admit(candidate))
            .count();
        prop_assert_eq!(admits as u64, u64::from(accepted == approved));
        let finalize_events = engine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GovernanceEvent::Admitted { .. }))
            .count();
        prop_assert_eq!(finalize_events, admits);
    }

    /// Admitting members never lowers the threshold of an open proposal.
    #[test]
    fn threshold_monotone_in_membership(initial in 1u64..10, added in 0u64..10) {
        let mut host = NullHost::new();
        for i in 1..=initial {
            host.members.with_approved(addr(i));
        }
        let candidate = host.members.with_pending(addr(1000));
        let key = Action::AdmitMember(candidate).key();
        let quorum = QuorumEngine::new(&GovernanceParams::default());

        let mut last = quorum.threshold_for(&host, &key).unwrap();
        for i in 0..added {
            host.members.with_approved(addr(100 + i));
            let next = quorum.threshold_for(&host, &key).unwrap();
            prop_assert!(next >= last);
            last = next;
        }
        prop_assert_eq!(last, initial + added);
    }
}
