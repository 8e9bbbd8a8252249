//! The environment a governance call executes in.

use agora_types::RegistryKind;

use crate::content::ContentRegistry;
use crate::membership::MembershipRegistry;

/// Gives the governance engine access to the registries for the duration of
/// one call. The host owns them; the engine only borrows.
pub trait GovernanceHost {
    fn members(&self) -> &dyn MembershipRegistry;

    fn members_mut(&mut self) -> &mut dyn MembershipRegistry;

    fn content(&self, kind: RegistryKind) -> Option<&dyn ContentRegistry>;

    fn content_mut(&mut self, kind: RegistryKind) -> Option<&mut dyn ContentRegistry>;
}
