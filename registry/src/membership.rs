//! Membership registry interface.

use agora_types::{MemberId, MemberStatus, Principal, WalletAddress};

use crate::error::RegistryError;

/// What the governance core needs from the member registry.
///
/// Mutators take the calling principal; implementations accept them only
/// from the governance identity they were configured with.
pub trait MembershipRegistry {
    fn is_approved_member(&self, address: &WalletAddress) -> bool;

    fn member_id_of(&self, address: &WalletAddress) -> Result<MemberId, RegistryError>;

    fn status_of(&self, id: MemberId) -> Result<MemberStatus, RegistryError>;

    /// Whether the address belongs to any member, whatever their status.
    fn is_registered(&self, address: &WalletAddress) -> bool;

    /// Live count of approved members.
    fn approved_member_count(&self) -> u64;

    /// `Pending -> Approved`.
    fn admit(&mut self, caller: &Principal, id: MemberId) -> Result<(), RegistryError>;

    /// `Approved -> Banned`.
    fn ban(&mut self, caller: &Principal, id: MemberId) -> Result<(), RegistryError>;

    /// Attach a replacement wallet to an approved member.
    fn add_wallet(
        &mut self,
        caller: &Principal,
        id: MemberId,
        address: WalletAddress,
    ) -> Result<(), RegistryError>;
}

/// Resolve `caller` to an approved member id, or fail with `NotApproved`.
pub fn require_approved(
    members: &dyn MembershipRegistry,
    caller: &Principal,
) -> Result<MemberId, RegistryError> {
    let Some(address) = caller.wallet() else {
        return Err(RegistryError::NotApproved(caller.to_string()));
    };
    if !members.is_approved_member(address) {
        return Err(RegistryError::NotApproved(address.to_string()));
    }
    members.member_id_of(address)
}
