//! Wallet address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// A wallet address: `0x` followed by 40 hex digits.
///
/// Addresses are compared case-insensitively by normalising to lowercase on
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The standard prefix for all wallet addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex digits after the prefix.
    pub const HEX_LEN: usize = 40;

    /// Create a new wallet address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address.
    pub fn new(raw: impl Into<String>) -> Self {
        match Self::parse(raw) {
            Ok(address) => address,
            Err(e) => panic!("{e}"),
        }
    }

    /// Parse and normalise a wallet address.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        let Some(digits) = s.strip_prefix(Self::PREFIX) else {
            return Err(TypesError::InvalidAddress(s));
        };
        if digits.len() != Self::HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TypesError::InvalidAddress(s));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalises_case() {
        let a = WalletAddress::parse(format!("0x{}", "AB".repeat(20))).unwrap();
        assert_eq!(a.as_str(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn missing_prefix_rejected() {
        assert!(WalletAddress::parse("ab".repeat(20)).is_err());
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(WalletAddress::parse("0x1234").is_err());
    }

    #[test]
    fn non_hex_rejected() {
        assert!(WalletAddress::parse(format!("0x{}", "zz".repeat(20))).is_err());
    }

    #[test]
    fn deserialize_validates_and_normalises() {
        let mixed = bincode::serialize(&format!("0x{}", "AB".repeat(20))).unwrap();
        let a: WalletAddress = bincode::deserialize(&mixed).unwrap();
        assert_eq!(a.as_str(), format!("0x{}", "ab".repeat(20)));

        let garbage = bincode::serialize(&"0x1234".to_string()).unwrap();
        assert!(bincode::deserialize::<WalletAddress>(&garbage).is_err());
    }

    #[test]
    #[should_panic(expected = "invalid wallet address")]
    fn new_panics_on_garbage() {
        WalletAddress::new("nope");
    }
}
