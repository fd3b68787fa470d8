//! Contract addresses and their canonical string representation.
use core::{fmt, str::FromStr};

use alloy_primitives::{hex, Address};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Number of bytes in an address on EVM chains.
pub const ADDRESS_BYTES: usize = 20;

/// Number of leading characters of the canonical address string used as a
/// stand-in label when a token name cannot be decoded.
pub const SHORT_LABEL_LEN: usize = 6;

/// Error returned when parsing a [`ContractAddress`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The input decoded to the wrong number of bytes.
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
    /// The input is not hex.
    #[error("invalid address hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Address of the contract whose metadata is queried.
///
/// The canonical string form is lowercase hex with a `0x` prefix, e.g.
/// `0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractAddress(Address);

impl ContractAddress {
    /// Wraps a raw 20-byte address.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    /// Returns the underlying [`Address`].
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }

    /// Returns the canonical (lowercase, `0x`-prefixed) hex string.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        hex::encode_prefixed(self.0)
    }

    /// Returns the first [`SHORT_LABEL_LEN`] characters of the canonical
    /// string, e.g. `0xc02a`.
    #[must_use]
    pub fn short_label(&self) -> String {
        self.to_canonical_string().chars().take(SHORT_LABEL_LEN).collect()
    }
}

impl From<Address> for ContractAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl From<ContractAddress> for Address {
    fn from(address: ContractAddress) -> Self {
        address.0
    }
}

impl FromStr for ContractAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)?;
        if bytes.len() != ADDRESS_BYTES {
            return Err(AddressError::InvalidLength(bytes.len()));
        }
        Ok(Self(Address::from_slice(&bytes)))
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl Serialize for ContractAddress {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl<'de> Deserialize<'de> for ContractAddress {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
