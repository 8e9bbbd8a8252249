//! Status enums for members and content registries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Admission status of a member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    /// No membership record.
    #[default]
    None,
    /// Registered and awaiting admission.
    Pending,
    /// Admitted; may vote and publish.
    Approved,
    /// Removed by collective vote. Terminal.
    Banned,
}

impl MemberStatus {
    /// Whether this member counts towards quorum and may vote.
    pub fn can_vote(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Banned => "banned",
        };
        f.write_str(name)
    }
}

/// The content registries a ban proposal can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegistryKind {
    Article,
    Review,
    Comment,
}

impl RegistryKind {
    pub const ALL: [RegistryKind; 3] = [Self::Article, Self::Review, Self::Comment];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Article => "articles",
            Self::Review => "reviews",
            Self::Comment => "comments",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
