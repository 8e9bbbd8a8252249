//! Tunable governance parameters.

use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;
use crate::quorum::InterestedPartyPolicy;

/// Loaded from the `[governance]` table of the platform config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Whether the subject of a ban or recovery counts towards the electorate.
    #[serde(default)]
    pub interested_party: InterestedPartyPolicy,

    /// Floor for the live threshold.
    #[serde(default = "default_minimum_threshold")]
    pub minimum_threshold: u64,
}

fn default_minimum_threshold() -> u64 {
    1
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            interested_party: InterestedPartyPolicy::default(),
            minimum_threshold: default_minimum_threshold(),
        }
    }
}

impl GovernanceParams {
    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.minimum_threshold == 0 {
            return Err(GovernanceError::InvalidParams(
                "minimum_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_exclude_interested_party() {
        let params = GovernanceParams::default();
        assert_eq!(params.interested_party, InterestedPartyPolicy::Exclude);
        assert_eq!(params.minimum_threshold, 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_threshold_rejected() {
        let params = GovernanceParams {
            minimum_threshold: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
