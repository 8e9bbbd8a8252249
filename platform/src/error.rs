use agora_governance::GovernanceError;
use agora_registry::RegistryError;
use agora_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("governance error: {0}")]
    Governance(#[from] GovernanceError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlatformError {
    /// Kind of the underlying failure. Setup and persistence failures
    /// report as `State`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(e) => e.kind(),
            Self::Governance(e) => e.kind(),
            Self::Config(_) | Self::Snapshot(_) | Self::Io(_) => ErrorKind::State,
        }
    }
}
