//! Semantic metadata fields and how they map onto contract functions.
use core::fmt;

use serde::Serialize;

use crate::abi::AbiType;

/// One of the four metadata fields a token record may carry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Token name, e.g. `Wrapped Ether`.
    Name,
    /// Token symbol, e.g. `WETH`.
    Symbol,
    /// Number of decimals used for display.
    Decimals,
    /// Total token supply.
    TotalSupply,
}

impl Field {
    /// All fields, in record order.
    pub const ALL: [Field; 4] =
        [Field::Name, Field::Symbol, Field::Decimals, Field::TotalSupply];

    /// Maps a contract function name to its field.
    ///
    /// Returns `None` for functions that are not part of the metadata set.
    #[must_use]
    pub fn from_function_name(function: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.function_name() == function)
    }

    /// Name of the contract function backing this field.
    #[must_use]
    pub const fn function_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Symbol => "symbol",
            Field::Decimals => "decimals",
            Field::TotalSupply => "totalSupply",
        }
    }

    /// Key of this field in the stored record.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Symbol => "symbol",
            Field::Decimals => "decimals",
            Field::TotalSupply => "total_supply",
        }
    }

    /// ABI type returned by the backing function.
    #[must_use]
    pub const fn output_type(self) -> AbiType {
        match self {
            Field::Name | Field::Symbol => AbiType::String,
            Field::Decimals => AbiType::Uint8,
            Field::TotalSupply => AbiType::Uint256,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
