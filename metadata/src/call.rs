//! Raw results handed over by a contract-call executor.
use std::collections::HashMap;

use alloy_primitives::{Bytes, U256};

/// A single ABI value, used both for call arguments and decoded outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// Raw bytes of a Solidity `string`.
    ///
    /// The bytes are not validated as UTF-8 here: contracts are free to
    /// return anything, and repairing it is the assembler's job.
    Text(Bytes),
    /// A Solidity `uint8`.
    Uint8(u8),
    /// A Solidity `uint256`.
    Uint256(U256),
}

impl AbiValue {
    /// Convenience constructor for [`AbiValue::Text`].
    pub fn text(bytes: impl Into<Bytes>) -> Self {
        Self::Text(bytes.into())
    }
}

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        Self::Text(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<u8> for AbiValue {
    fn from(value: u8) -> Self {
        Self::Uint8(value)
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        Self::Uint256(value)
    }
}

/// Outcome of calling one contract function.
///
/// Reverts, node errors, decode failures and timeouts all collapse into
/// [`CallOutcome::Failed`]; the reason is not propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The call succeeded and its return data decoded into these values.
    Ok(Vec<AbiValue>),
    /// The call did not produce usable return data.
    Failed,
}

impl CallOutcome {
    /// A successful outcome carrying exactly one value.
    pub fn single(value: impl Into<AbiValue>) -> Self {
        Self::Ok(vec![value.into()])
    }

    /// Returns the output value if the call produced exactly one.
    #[must_use]
    pub fn into_single(self) -> Option<AbiValue> {
        match self {
            Self::Ok(mut values) if values.len() == 1 => values.pop(),
            _ => None,
        }
    }
}

/// Per-function results of one batch of calls, keyed by the literal
/// function name (e.g. `totalSupply`).
pub type RawResults = HashMap<String, CallOutcome>;
