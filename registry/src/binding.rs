//! One-time peer configuration.
//!
//! Registries reference each other (articles know their reviews, governance
//! knows every registry). Those references are bound once, by a designated
//! initializer, and can never be rebound: `Uninitialized -> Configured`.

use agora_types::Principal;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PeerBinding<T> {
    /// Waiting for the initializer to supply peers.
    Uninitialized { initializer: Principal },
    /// Peers are fixed for the lifetime of the registry.
    Configured(T),
}

impl<T> PeerBinding<T> {
    pub fn new(initializer: Principal) -> Self {
        Self::Uninitialized { initializer }
    }

    /// Bind peers. Only the initializer may call this, and only once.
    pub fn configure(&mut self, caller: &Principal, peers: T) -> Result<(), RegistryError> {
        match self {
            Self::Configured(_) => Err(RegistryError::AlreadyConfigured),
            Self::Uninitialized { initializer } if initializer != caller => {
                Err(RegistryError::unauthorized(caller))
            }
            Self::Uninitialized { .. } => {
                *self = Self::Configured(peers);
                Ok(())
            }
        }
    }

    /// The bound peers, or `NotConfigured`.
    pub fn peers(&self) -> Result<&T, RegistryError> {
        match self {
            Self::Configured(peers) => Ok(peers),
            Self::Uninitialized { .. } => Err(RegistryError::NotConfigured),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::{ErrorKind, ServiceId};

    fn deployer() -> Principal {
        Principal::Service(ServiceId::new("deployer"))
    }

    #[test]
    fn unconfigured_binding_has_no_peers() {
        let binding: PeerBinding<u8> = PeerBinding::new(deployer());
        assert!(!binding.is_configured());
        assert!(matches!(binding.peers(), Err(RegistryError::NotConfigured)));
    }

    #[test]
    fn initializer_configures_once() {
        let mut binding = PeerBinding::new(deployer());
        binding.configure(&deployer(), 7u8).unwrap();
        assert_eq!(*binding.peers().unwrap(), 7);

        let err = binding.configure(&deployer(), 8u8).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyConfigured));
        assert_eq!(*binding.peers().unwrap(), 7);
    }

    #[test]
    fn stranger_cannot_configure() {
        let mut binding = PeerBinding::new(deployer());
        let stranger = Principal::Service(ServiceId::new("mallory"));
        let err = binding.configure(&stranger, 1u8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(!binding.is_configured());
    }
}
