//! Nullable membership registry.

use agora_registry::{MembershipRegistry, RegistryError};
use agora_types::{MemberId, MemberStatus, Principal, ServiceId, WalletAddress};
use std::collections::{BTreeMap, HashMap};

/// A mutation accepted by [`NullMembers`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberCall {
    Admit(MemberId),
    Ban(MemberId),
    AddWallet(MemberId, WalletAddress),
}

struct NullMember {
    wallets: Vec<WalletAddress>,
    status: MemberStatus,
}

/// An in-memory member registry for testing.
///
/// Enforces the same caller and status checks as the real registry, so an
/// engine under test sees realistic failures.
pub struct NullMembers {
    governance: ServiceId,
    members: BTreeMap<MemberId, NullMember>,
    wallets: HashMap<WalletAddress, MemberId>,
    refuse_next: bool,
    calls: Vec<MemberCall>,
}

impl NullMembers {
    /// Governed by the service named `"governance"`.
    pub fn new() -> Self {
        Self::governed_by(ServiceId::new("governance"))
    }

    pub fn governed_by(governance: ServiceId) -> Self {
        Self {
            governance,
            members: BTreeMap::new(),
            wallets: HashMap::new(),
            refuse_next: false,
            calls: Vec::new(),
        }
    }

    /// Seed an approved member owning `address`.
    pub fn with_approved(&mut self, address: WalletAddress) -> MemberId {
        self.insert(address, MemberStatus::Approved)
    }

    /// Seed a pending member owning `address`.
    pub fn with_pending(&mut self, address: WalletAddress) -> MemberId {
        self.insert(address, MemberStatus::Pending)
    }

    /// Force a member's status, bypassing every check.
    pub fn set_status(&mut self, id: MemberId, status: MemberStatus) {
        if let Some(member) = self.members.get_mut(&id) {
            member.status = status;
        }
    }

    /// Make the next mutator call fail with `Unauthorized`, whoever calls.
    pub fn refuse_next_mutation(&mut self) {
        self.refuse_next = true;
    }

    /// Mutations accepted so far, oldest first.
    pub fn calls(&self) -> &[MemberCall] {
        &self.calls
    }

    pub fn wallets_of(&self, id: MemberId) -> Vec<WalletAddress> {
        self.members
            .get(&id)
            .map(|m| m.wallets.clone())
            .unwrap_or_default()
    }

    fn insert(&mut self, address: WalletAddress, status: MemberStatus) -> MemberId {
        let id = MemberId::new(self.members.len() as u64 + 1);
        self.wallets.insert(address.clone(), id);
        self.members.insert(
            id,
            NullMember {
                wallets: vec![address],
                status,
            },
        );
        id
    }

    fn check_caller(&mut self, caller: &Principal) -> Result<(), RegistryError> {
        if std::mem::take(&mut self.refuse_next) || !caller.is_service(&self.governance) {
            return Err(RegistryError::unauthorized(caller));
        }
        Ok(())
    }

    fn member_with(
        &mut self,
        id: MemberId,
        expected: MemberStatus,
    ) -> Result<&mut NullMember, RegistryError> {
        let member = self
            .members
            .get_mut(&id)
            .ok_or(RegistryError::MemberNotFound(id))?;
        if member.status != expected {
            return Err(RegistryError::InvalidStatus {
                member: id,
                expected,
                actual: member.status,
            });
        }
        Ok(member)
    }
}

impl Default for NullMembers {
    fn default() -> Self {
        Self::new()
    }
}

impl MembershipRegistry for NullMembers {
    fn is_approved_member(&self, address: &WalletAddress) -> bool {
        self.wallets
            .get(address)
            .and_then(|id| self.members.get(id))
            .is_some_and(|m| m.status == MemberStatus::Approved)
    }

    fn member_id_of(&self, address: &WalletAddress) -> Result<MemberId, RegistryError> {
        self.wallets
            .get(address)
            .copied()
            .ok_or_else(|| RegistryError::WalletNotFound(address.clone()))
    }

    fn status_of(&self, id: MemberId) -> Result<MemberStatus, RegistryError> {
        self.members
            .get(&id)
            .map(|m| m.status)
            .ok_or(RegistryError::MemberNotFound(id))
    }

    fn is_registered(&self, address: &WalletAddress) -> bool {
        self.wallets.contains_key(address)
    }

    fn approved_member_count(&self) -> u64 {
        self.members
            .values()
            .filter(|m| m.status == MemberStatus::Approved)
            .count() as u64
    }

    fn admit(&mut self, caller: &Principal, id: MemberId) -> Result<(), RegistryError> {
        self.check_caller(caller)?;
        self.member_with(id, MemberStatus::Pending)?.status = MemberStatus::Approved;
        self.calls.push(MemberCall::Admit(id));
        Ok(())
    }

    fn ban(&mut self, caller: &Principal, id: MemberId) -> Result<(), RegistryError> {
        self.check_caller(caller)?;
        self.member_with(id, MemberStatus::Approved)?.status = MemberStatus::Banned;
        self.calls.push(MemberCall::Ban(id));
        Ok(())
    }

    fn add_wallet(
        &mut self,
        caller: &Principal,
        id: MemberId,
        address: WalletAddress,
    ) -> Result<(), RegistryError> {
        self.check_caller(caller)?;
        if self.wallets.contains_key(&address) {
            return Err(RegistryError::WalletAlreadyRegistered(address));
        }
        self.member_with(id, MemberStatus::Approved)?
            .wallets
            .push(address.clone());
        self.wallets.insert(address.clone(), id);
        self.calls.push(MemberCall::AddWallet(id, address));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::ErrorKind;

    fn addr(n: u8) -> WalletAddress {
        WalletAddress::new(format!("0x{:040x}", n))
    }

    fn governance() -> Principal {
        Principal::Service(ServiceId::new("governance"))
    }

    #[test]
    fn seeded_members_are_counted() {
        let mut members = NullMembers::new();
        let a = members.with_approved(addr(1));
        let p = members.with_pending(addr(2));
        assert_eq!(a, MemberId::new(1));
        assert_eq!(p, MemberId::new(2));
        assert_eq!(members.approved_member_count(), 1);
        assert!(members.is_approved_member(&addr(1)));
        assert!(!members.is_approved_member(&addr(2)));
        assert!(members.is_registered(&addr(2)));
    }

    #[test]
    fn admit_checks_caller_and_status() {
        let mut members = NullMembers::new();
        let p = members.with_pending(addr(1));

        let stranger = Principal::Wallet(addr(1));
        assert_eq!(members.admit(&stranger, p).unwrap_err().kind(), ErrorKind::Authorization);

        members.admit(&governance(), p).unwrap();
        assert_eq!(members.status_of(p).unwrap(), MemberStatus::Approved);
        assert_eq!(members.admit(&governance(), p).unwrap_err().kind(), ErrorKind::State);
        assert_eq!(members.calls(), &[MemberCall::Admit(p)]);
    }

    #[test]
    fn refused_mutation_leaves_state_alone() {
        let mut members = NullMembers::new();
        let a = members.with_approved(addr(1));
        members.refuse_next_mutation();

        assert!(members.ban(&governance(), a).is_err());
        assert_eq!(members.status_of(a).unwrap(), MemberStatus::Approved);
        assert!(members.calls().is_empty());

        members.ban(&governance(), a).unwrap();
        assert_eq!(members.status_of(a).unwrap(), MemberStatus::Banned);
    }

    #[test]
    fn add_wallet_rejects_known_address() {
        let mut members = NullMembers::new();
        let a = members.with_approved(addr(1));
        members.with_pending(addr(2));

        let err = members.add_wallet(&governance(), a, addr(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);

        members.add_wallet(&governance(), a, addr(3)).unwrap();
        assert_eq!(members.wallets_of(a), vec![addr(1), addr(3)]);
        assert_eq!(members.member_id_of(&addr(3)).unwrap(), a);
    }
}
