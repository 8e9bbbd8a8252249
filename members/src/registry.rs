//! In-memory member registry.
//!
//! Members live in an arena indexed by `id - 1`; ids are assigned from 1 and
//! never reused. A wallet index maps every wallet ever attached to its member.

use std::collections::HashMap;

use agora_crypto::verify_recovery;
use agora_registry::{MembershipRegistry, PeerBinding, RegistryError};
use agora_types::{
    ContentCid, MemberId, MemberStatus, Principal, PublicKey, ServiceId, Signature, WalletAddress,
};
use serde::{Deserialize, Serialize};

use crate::events::MemberEvent;
use crate::member::Member;

/// Peers the member registry trusts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPeers {
    /// The only identity allowed to admit, ban or attach wallets after bootstrap.
    pub governance: ServiceId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Members {
    identity: ServiceId,
    arena: Vec<Member>,
    wallet_index: HashMap<WalletAddress, MemberId>,
    approved: u64,
    founding_members: u64,
    /// Bootstrap admitter. `None` once ownership passed to governance.
    owner: Option<Principal>,
    peers: PeerBinding<MemberPeers>,
    #[serde(skip)]
    pending_events: Vec<MemberEvent>,
}

impl Members {
    pub fn new(
        identity: ServiceId,
        owner: Principal,
        founding_members: u64,
        initializer: Principal,
    ) -> Self {
        Self {
            identity,
            arena: Vec::new(),
            wallet_index: HashMap::new(),
            approved: 0,
            founding_members,
            owner: Some(owner),
            peers: PeerBinding::new(initializer),
            pending_events: Vec::new(),
        }
    }

    pub fn identity(&self) -> &ServiceId {
        &self.identity
    }

    /// Bind the governance identity. Once only, by the initializer.
    pub fn configure(&mut self, caller: &Principal, peers: MemberPeers) -> Result<(), RegistryError> {
        self.peers.configure(caller, peers)
    }

    /// Register the calling wallet as a new, pending member.
    pub fn register(
        &mut self,
        caller: &Principal,
        name_cid: ContentCid,
        profile_cid: ContentCid,
        recovery_key: Option<PublicKey>,
    ) -> Result<MemberId, RegistryError> {
        let Some(address) = caller.wallet() else {
            return Err(RegistryError::unauthorized(caller));
        };
        if self.wallet_index.contains_key(address) {
            return Err(RegistryError::WalletAlreadyRegistered(address.clone()));
        }

        let id = MemberId::new(self.arena.len() as u64 + 1);
        self.arena.push(Member {
            id,
            wallets: vec![address.clone()],
            status: MemberStatus::Pending,
            name_cid,
            profile_cid,
            recovery_key,
            recovery_nonce: 0,
        });
        self.wallet_index.insert(address.clone(), id);

        tracing::info!(member = %id, address = %address, "member registered");
        self.pending_events.push(MemberEvent::Registered {
            address: address.clone(),
            member: id,
        });
        Ok(id)
    }

    /// Owner-only admission used to seat the founding members.
    ///
    /// When the approved count reaches `founding_members` the owner is dropped
    /// and every later call fails with `BootstrapClosed`.
    pub fn bootstrap_admit(&mut self, caller: &Principal, id: MemberId) -> Result<(), RegistryError> {
        let Some(owner) = &self.owner else {
            return Err(RegistryError::BootstrapClosed);
        };
        if owner != caller {
            return Err(RegistryError::unauthorized(caller));
        }
        let governance = self.peers.peers()?.governance.clone();

        self.transition(id, MemberStatus::Pending, MemberStatus::Approved)?;
        self.pending_events.push(MemberEvent::Approved { member: id });

        if self.approved >= self.founding_members {
            self.owner = None;
            tracing::info!(governance = %governance, "bootstrap complete, ownership transferred");
            self.pending_events
                .push(MemberEvent::OwnershipTransferred { governance });
        }
        Ok(())
    }

    /// An approved member attaches another wallet they control.
    pub fn add_own_wallet(
        &mut self,
        caller: &Principal,
        address: WalletAddress,
    ) -> Result<(), RegistryError> {
        let id = agora_registry::require_approved(&*self, caller)?;
        self.attach_wallet(id, address.clone())?;
        self.pending_events
            .push(MemberEvent::WalletAdded { address, member: id });
        Ok(())
    }

    /// Replace the profile content identifier. Banned members cannot edit.
    pub fn edit_profile(
        &mut self,
        caller: &Principal,
        profile_cid: ContentCid,
    ) -> Result<(), RegistryError> {
        let Some(address) = caller.wallet() else {
            return Err(RegistryError::unauthorized(caller));
        };
        let id = self.member_id_of(address)?;
        let member = self.get_mut(id)?;
        if member.status == MemberStatus::Banned {
            return Err(RegistryError::InvalidStatus {
                member: id,
                expected: MemberStatus::Approved,
                actual: MemberStatus::Banned,
            });
        }
        member.profile_cid = profile_cid.clone();
        self.pending_events.push(MemberEvent::ProfileEdited {
            address: address.clone(),
            member: id,
            profile_cid,
        });
        Ok(())
    }

    /// Attach `new_address` to an approved member who proves control of their
    /// recovery key. Anyone may submit the proof; the signature is what counts.
    pub fn recover_with_key(
        &mut self,
        id: MemberId,
        new_address: WalletAddress,
        signature: &Signature,
    ) -> Result<(), RegistryError> {
        let member = self.get(id)?;
        expect_status(member, MemberStatus::Approved)?;
        let valid = member.recovery_key.as_ref().is_some_and(|key| {
            verify_recovery(id, &new_address, member.recovery_nonce, signature, key)
        });
        if !valid {
            tracing::warn!(member = %id, "rejected recovery proof");
            return Err(RegistryError::InvalidRecoveryProof(id));
        }

        self.attach_wallet(id, new_address.clone())?;
        self.get_mut(id)?.recovery_nonce += 1;
        self.pending_events.push(MemberEvent::ProfileRecovered {
            address: new_address,
            member: id,
        });
        Ok(())
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        id.get()
            .checked_sub(1)
            .and_then(|index| self.arena.get(index as usize))
    }

    pub fn wallets_of(&self, id: MemberId) -> Result<&[WalletAddress], RegistryError> {
        Ok(&self.get(id)?.wallets)
    }

    /// Number of members ever registered, whatever their status.
    pub fn member_count(&self) -> u64 {
        self.arena.len() as u64
    }

    pub fn is_bootstrapping(&self) -> bool {
        self.owner.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<MemberEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn get(&self, id: MemberId) -> Result<&Member, RegistryError> {
        self.member(id).ok_or(RegistryError::MemberNotFound(id))
    }

    fn get_mut(&mut self, id: MemberId) -> Result<&mut Member, RegistryError> {
        id.get()
            .checked_sub(1)
            .and_then(|index| self.arena.get_mut(index as usize))
            .ok_or(RegistryError::MemberNotFound(id))
    }

    fn require_governance(&self, caller: &Principal) -> Result<(), RegistryError> {
        let peers = self.peers.peers()?;
        if caller.is_service(&peers.governance) {
            Ok(())
        } else {
            Err(RegistryError::unauthorized(caller))
        }
    }

    /// Move a member between statuses, keeping the approved counter in step.
    fn transition(
        &mut self,
        id: MemberId,
        from: MemberStatus,
        to: MemberStatus,
    ) -> Result<(), RegistryError> {
        let member = self.get_mut(id)?;
        expect_status(member, from)?;
        member.status = to;

        if from == MemberStatus::Approved {
            self.approved -= 1;
        }
        if to == MemberStatus::Approved {
            self.approved += 1;
        }
        tracing::info!(member = %id, from = %from, to = %to, "member status changed");
        Ok(())
    }

    fn attach_wallet(&mut self, id: MemberId, address: WalletAddress) -> Result<(), RegistryError> {
        if self.wallet_index.contains_key(&address) {
            return Err(RegistryError::WalletAlreadyRegistered(address));
        }
        self.get_mut(id)?.wallets.push(address.clone());
        tracing::info!(member = %id, address = %address, "wallet attached");
        self.wallet_index.insert(address, id);
        Ok(())
    }
}

fn expect_status(member: &Member, expected: MemberStatus) -> Result<(), RegistryError> {
    if member.status == expected {
        Ok(())
    } else {
        Err(RegistryError::InvalidStatus {
            member: member.id,
            expected,
            actual: member.status,
        })
    }
}

impl MembershipRegistry for Members {
    fn is_approved_member(&self, address: &WalletAddress) -> bool {
        self.wallet_index
            .get(address)
            .and_then(|id| self.member(*id))
            .is_some_and(|m| m.status.can_vote())
    }

    fn member_id_of(&self, address: &WalletAddress) -> Result<MemberId, RegistryError> {
        self.wallet_index
            .get(address)
            .copied()
            .ok_or_else(|| RegistryError::WalletNotFound(address.clone()))
    }

    fn status_of(&self, id: MemberId) -> Result<MemberStatus, RegistryError> {
        Ok(self.get(id)?.status)
    }

    fn is_registered(&self, address: &WalletAddress) -> bool {
        self.wallet_index.contains_key(address)
    }

    fn approved_member_count(&self) -> u64 {
        self.approved
    }

    fn admit(&mut self, caller: &Principal, id: MemberId) -> Result<(), RegistryError> {
        self.require_governance(caller)?;
        self.transition(id, MemberStatus::Pending, MemberStatus::Approved)?;
        self.pending_events.push(MemberEvent::Approved { member: id });
        Ok(())
    }

    fn ban(&mut self, caller: &Principal, id: MemberId) -> Result<(), RegistryError> {
        self.require_governance(caller)?;
        self.transition(id, MemberStatus::Approved, MemberStatus::Banned)?;
        self.pending_events.push(MemberEvent::Banned { member: id });
        Ok(())
    }

    fn add_wallet(
        &mut self,
        caller: &Principal,
        id: MemberId,
        address: WalletAddress,
    ) -> Result<(), RegistryError> {
        self.require_governance(caller)?;
        expect_status(self.get(id)?, MemberStatus::Approved)?;
        self.attach_wallet(id, address.clone())?;
        self.pending_events
            .push(MemberEvent::ProfileRecovered { address, member: id });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_crypto::{keypair_from_seed, sign_recovery};
    use agora_types::ErrorKind;

    const CID: &str = "Qmfdfxchesocnfdfrfdf54SDDFsDS";

    fn addr(n: u8) -> WalletAddress {
        WalletAddress::new(format!("0x{:040x}", n))
    }

    fn wallet(n: u8) -> Principal {
        Principal::Wallet(addr(n))
    }

    fn owner() -> Principal {
        Principal::Service(ServiceId::new("owner"))
    }

    fn governance() -> Principal {
        Principal::Service(ServiceId::new("governance"))
    }

    fn cid() -> ContentCid {
        ContentCid::new(CID)
    }

    fn new_members(founding: u64) -> Members {
        let mut members = Members::new(ServiceId::new("members"), owner(), founding, owner());
        members
            .configure(
                &owner(),
                MemberPeers {
                    governance: ServiceId::new("governance"),
                },
            )
            .unwrap();
        members
    }

    fn register(members: &mut Members, n: u8) -> MemberId {
        members.register(&wallet(n), cid(), cid(), None).unwrap()
    }

    #[test]
    fn register_fills_record() {
        let mut members = new_members(5);
        let id = register(&mut members, 1);
        assert_eq!(id, MemberId::new(1));

        let m = members.member(id).unwrap();
        assert_eq!(m.status, MemberStatus::Pending);
        assert_eq!(m.wallets, vec![addr(1)]);
        assert_eq!(m.profile_cid, cid());
        assert_eq!(members.member_id_of(&addr(1)).unwrap(), id);
        assert_eq!(
            members.drain_events(),
            vec![MemberEvent::Registered {
                address: addr(1),
                member: id
            }]
        );
    }

    #[test]
    fn ids_are_sequential() {
        let mut members = new_members(5);
        assert_eq!(register(&mut members, 1), MemberId::new(1));
        assert_eq!(register(&mut members, 2), MemberId::new(2));
        assert_eq!(members.member_count(), 2);
    }

    #[test]
    fn duplicate_wallet_rejected() {
        let mut members = new_members(5);
        register(&mut members, 1);
        let err = members.register(&wallet(1), cid(), cid(), None).unwrap_err();
        assert!(matches!(err, RegistryError::WalletAlreadyRegistered(_)));
        assert_eq!(members.member_count(), 1);
    }

    #[test]
    fn bootstrap_admit_requires_owner() {
        let mut members = new_members(5);
        let id = register(&mut members, 1);
        let err = members.bootstrap_admit(&wallet(2), id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(members.status_of(id).unwrap(), MemberStatus::Pending);
    }

    #[test]
    fn bootstrap_admit_requires_pending() {
        let mut members = new_members(5);
        let id = register(&mut members, 1);
        members.bootstrap_admit(&owner(), id).unwrap();
        let err = members.bootstrap_admit(&owner(), id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        let err = members.bootstrap_admit(&owner(), MemberId::new(9)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn ownership_transfers_after_founders() {
        let mut members = new_members(2);
        let a = register(&mut members, 1);
        let b = register(&mut members, 2);
        let c = register(&mut members, 3);
        members.bootstrap_admit(&owner(), a).unwrap();
        assert!(members.is_bootstrapping());
        members.bootstrap_admit(&owner(), b).unwrap();
        assert!(!members.is_bootstrapping());
        assert_eq!(members.approved_member_count(), 2);

        let events = members.drain_events();
        assert!(events.contains(&MemberEvent::OwnershipTransferred {
            governance: ServiceId::new("governance")
        }));

        let err = members.bootstrap_admit(&owner(), c).unwrap_err();
        assert!(matches!(err, RegistryError::BootstrapClosed));
    }

    #[test]
    fn governance_mutators_reject_strangers() {
        let mut members = new_members(1);
        let a = register(&mut members, 1);
        let b = register(&mut members, 2);
        members.bootstrap_admit(&owner(), a).unwrap();

        assert_eq!(members.admit(&owner(), b).unwrap_err().kind(), ErrorKind::Authorization);
        assert_eq!(members.ban(&wallet(1), a).unwrap_err().kind(), ErrorKind::Authorization);
        assert_eq!(
            members.add_wallet(&wallet(1), a, addr(7)).unwrap_err().kind(),
            ErrorKind::Authorization
        );
    }

    #[test]
    fn admit_and_ban_track_approved_count() {
        let mut members = new_members(1);
        let a = register(&mut members, 1);
        let b = register(&mut members, 2);
        members.bootstrap_admit(&owner(), a).unwrap();

        members.admit(&governance(), b).unwrap();
        assert_eq!(members.approved_member_count(), 2);
        assert!(members.is_approved_member(&addr(2)));

        members.ban(&governance(), b).unwrap();
        assert_eq!(members.approved_member_count(), 1);
        assert_eq!(members.status_of(b).unwrap(), MemberStatus::Banned);
        assert!(!members.is_approved_member(&addr(2)));

        // a banned wallet stays registered
        assert!(members.is_registered(&addr(2)));
        assert_eq!(members.ban(&governance(), b).unwrap_err().kind(), ErrorKind::State);
    }

    #[test]
    fn governance_add_wallet_maps_new_address() {
        let mut members = new_members(1);
        let a = register(&mut members, 1);
        members.bootstrap_admit(&owner(), a).unwrap();
        members.drain_events();

        members.add_wallet(&governance(), a, addr(9)).unwrap();
        assert_eq!(members.wallets_of(a).unwrap(), &[addr(1), addr(9)]);
        assert_eq!(members.member_id_of(&addr(9)).unwrap(), a);
        assert_eq!(
            members.drain_events(),
            vec![MemberEvent::ProfileRecovered {
                address: addr(9),
                member: a
            }]
        );

        let err = members.add_wallet(&governance(), a, addr(1)).unwrap_err();
        assert!(matches!(err, RegistryError::WalletAlreadyRegistered(_)));
    }

    #[test]
    fn add_own_wallet_requires_approval() {
        let mut members = new_members(1);
        let a = register(&mut members, 1);
        register(&mut members, 2);
        members.bootstrap_admit(&owner(), a).unwrap();

        for n in 3..=6 {
            members.add_own_wallet(&wallet(1), addr(n)).unwrap();
        }
        assert_eq!(members.wallets_of(a).unwrap().len(), 5);
        assert_eq!(members.member_id_of(&addr(6)).unwrap(), a);

        let err = members.add_own_wallet(&wallet(2), addr(7)).unwrap_err();
        assert!(matches!(err, RegistryError::NotApproved(_)));
    }

    #[test]
    fn edit_profile_updates_cid() {
        let mut members = new_members(1);
        let a = register(&mut members, 1);
        members.edit_profile(&wallet(1), ContentCid::new("newCID")).unwrap();
        assert_eq!(members.member(a).unwrap().profile_cid, ContentCid::new("newCID"));
    }

    #[test]
    fn key_recovery_attaches_wallet_once() {
        let kp = keypair_from_seed(&[11u8; 32]);
        let mut members = new_members(1);
        let a = members
            .register(&wallet(1), cid(), cid(), Some(kp.public.clone()))
            .unwrap();
        members.bootstrap_admit(&owner(), a).unwrap();

        let sig = sign_recovery(a, &addr(5), 0, &kp.private);
        members.recover_with_key(a, addr(5), &sig).unwrap();
        assert_eq!(members.member_id_of(&addr(5)).unwrap(), a);
        assert_eq!(members.member(a).unwrap().recovery_nonce, 1);

        // the same proof cannot be replayed for another address or nonce
        let err = members.recover_with_key(a, addr(6), &sig).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRecoveryProof(_)));
    }

    #[test]
    fn key_recovery_without_key_rejected() {
        let kp = keypair_from_seed(&[11u8; 32]);
        let mut members = new_members(1);
        let a = register(&mut members, 1);
        members.bootstrap_admit(&owner(), a).unwrap();

        let sig = sign_recovery(a, &addr(5), 0, &kp.private);
        let err = members.recover_with_key(a, addr(5), &sig).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(!members.is_registered(&addr(5)));
    }
}
