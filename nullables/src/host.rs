//! Nullable governance host.

use agora_registry::{ContentRegistry, GovernanceHost, MembershipRegistry};
use agora_types::RegistryKind;

use crate::content::NullContent;
use crate::members::NullMembers;

/// Owns one nullable member registry and one nullable registry per content
/// kind.
pub struct NullHost {
    pub members: NullMembers,
    pub articles: NullContent,
    pub reviews: NullContent,
    pub comments: NullContent,
}

impl NullHost {
    pub fn new() -> Self {
        Self {
            members: NullMembers::new(),
            articles: NullContent::new(RegistryKind::Article),
            reviews: NullContent::new(RegistryKind::Review),
            comments: NullContent::new(RegistryKind::Comment),
        }
    }

    pub fn registry_mut(&mut self, kind: RegistryKind) -> &mut NullContent {
        match kind {
            RegistryKind::Article => &mut self.articles,
            RegistryKind::Review => &mut self.reviews,
            RegistryKind::Comment => &mut self.comments,
        }
    }
}

impl Default for NullHost {
    fn default() -> Self {
        Self::new()
    }
}

impl GovernanceHost for NullHost {
    fn members(&self) -> &dyn MembershipRegistry {
        &self.members
    }

    fn members_mut(&mut self) -> &mut dyn MembershipRegistry {
        &mut self.members
    }

    fn content(&self, kind: RegistryKind) -> Option<&dyn ContentRegistry> {
        let registry: &dyn ContentRegistry = match kind {
            RegistryKind::Article => &self.articles,
            RegistryKind::Review => &self.reviews,
            RegistryKind::Comment => &self.comments,
        };
        Some(registry)
    }

    fn content_mut(&mut self, kind: RegistryKind) -> Option<&mut dyn ContentRegistry> {
        let registry: &mut dyn ContentRegistry = self.registry_mut(kind);
        Some(registry)
    }
}
