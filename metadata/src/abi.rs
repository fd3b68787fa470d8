//! Query descriptor for the ERC-20 metadata functions.
//!
//! This module contains both the ABI interface and its static description:
//! - **ABI interface**: [`IErc20Metadata`], defined with [`sol!`], which pins
//!   the standard signatures and selectors
//! - **Query descriptor**: [`ERC20_METADATA_ABI`] and [`METADATA_CALLS`],
//!   plain data handed to a [`crate::ContractReader`] to describe which
//!   functions to call, with which arguments, and how to decode their results
//!
//! [`sol!`]: alloy_sol_types::sol
use core::fmt;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Bytes, Selector, U256};
pub use interface::*;

use crate::{call::AbiValue, field::Field};

mod interface {
    #![allow(missing_docs)]

    use alloy_sol_types::sol;

    sol! {
        /// ERC-20 Metadata extension interface, together with
        /// `totalSupply` from the base standard.
        interface IErc20Metadata {
            function name() external view returns (string);
            function symbol() external view returns (string);
            function decimals() external view returns (uint8);
            function totalSupply() external view returns (uint256);
        }
    }
}

/// Solidity types used by the metadata functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// `string`
    String,
    /// `uint8`
    Uint8,
    /// `uint256`
    Uint256,
}

impl AbiType {
    /// Canonical Solidity name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AbiType::String => "string",
            AbiType::Uint8 => "uint8",
            AbiType::Uint256 => "uint256",
        }
    }

    /// Type used to decode return data.
    ///
    /// `string` is decoded as `bytes`: both share the same encoding, and
    /// decoding as `bytes` keeps malformed UTF-8 intact instead of replacing
    /// it.
    fn decode_type(self) -> DynSolType {
        match self {
            AbiType::String => DynSolType::Bytes,
            AbiType::Uint8 => DynSolType::Uint(8),
            AbiType::Uint256 => DynSolType::Uint(256),
        }
    }

    fn value_from_dyn(
        self,
        value: DynSolValue,
    ) -> Result<AbiValue, DecodeError> {
        match (self, value) {
            (AbiType::String, DynSolValue::Bytes(bytes)) => {
                Ok(AbiValue::Text(Bytes::from(bytes)))
            }
            (AbiType::Uint8, DynSolValue::Uint(value, _)) => {
                if value > U256::from(u8::MAX) {
                    return Err(DecodeError::OutOfRange { value, ty: self });
                }
                Ok(AbiValue::Uint8(value.to::<u8>()))
            }
            (AbiType::Uint256, DynSolValue::Uint(value, _)) => {
                Ok(AbiValue::Uint256(value))
            }
            _ => Err(DecodeError::UnexpectedValue(self)),
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State mutability of a contract function.
///
/// Only read-only functions are queried, so `view` is the sole variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateMutability {
    /// Reads but does not modify state.
    View,
}

impl StateMutability {
    /// Solidity keyword for this mutability.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StateMutability::View => "view",
        }
    }
}

/// Error returned when return data cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The return data is not valid ABI for the declared output types.
    #[error("abi decoding failed: {0}")]
    Abi(#[from] alloy_dyn_abi::Error),
    /// A decoded integer does not fit the declared type.
    #[error("value {value} does not fit in `{ty}`")]
    OutOfRange {
        /// Decoded value.
        value: U256,
        /// Declared type.
        ty: AbiType,
    },
    /// The decoder produced a value of a different shape.
    #[error("decoded value is not a `{0}`")]
    UnexpectedValue(AbiType),
}

/// Error returned when encoding a call that carries arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The function takes no arguments.
    #[error("`{function}` takes no arguments, got {got}")]
    UnexpectedArguments {
        /// Function name.
        function: &'static str,
        /// Number of supplied arguments.
        got: usize,
    },
}

/// ABI description of one argument-free contract function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionFragment {
    /// Function name.
    pub name: &'static str,
    /// Output types, in order.
    pub outputs: &'static [AbiType],
    /// State mutability.
    pub state_mutability: StateMutability,
}

impl FunctionFragment {
    /// Canonical signature, e.g. `totalSupply()`.
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}()", self.name)
    }

    /// First four bytes of the keccak-256 hash of the signature.
    #[must_use]
    pub fn selector(&self) -> Selector {
        Selector::from_slice(&keccak256(self.signature())[..4])
    }

    /// Encodes a call to this function, which is just its selector.
    ///
    /// # Errors
    ///
    /// * [`EncodeError::UnexpectedArguments`] - If `arguments` is not empty.
    pub fn calldata(
        &self,
        arguments: &[AbiValue],
    ) -> Result<Bytes, EncodeError> {
        if !arguments.is_empty() {
            return Err(EncodeError::UnexpectedArguments {
                function: self.name,
                got: arguments.len(),
            });
        }
        Ok(Bytes::copy_from_slice(self.selector().as_slice()))
    }

    /// Decodes `data` returned by this function into its output values.
    ///
    /// # Errors
    ///
    /// * [`DecodeError::Abi`] - If `data` is not valid ABI for the outputs.
    /// * [`DecodeError::OutOfRange`] - If an integer overflows its type.
    pub fn decode_output(
        &self,
        data: &[u8],
    ) -> Result<Vec<AbiValue>, DecodeError> {
        let ty = DynSolType::Tuple(
            self.outputs.iter().map(|ty| ty.decode_type()).collect(),
        );
        let values = match ty.abi_decode_params(data)? {
            DynSolValue::Tuple(values) => values,
            value => vec![value],
        };

        self.outputs
            .iter()
            .zip(values)
            .map(|(ty, value)| ty.value_from_dyn(value))
            .collect()
    }
}

/// Fragment of `name()`.
pub const NAME: FunctionFragment = FunctionFragment {
    name: Field::Name.function_name(),
    outputs: &[AbiType::String],
    state_mutability: StateMutability::View,
};

/// Fragment of `symbol()`.
pub const SYMBOL: FunctionFragment = FunctionFragment {
    name: Field::Symbol.function_name(),
    outputs: &[AbiType::String],
    state_mutability: StateMutability::View,
};

/// Fragment of `decimals()`.
pub const DECIMALS: FunctionFragment = FunctionFragment {
    name: Field::Decimals.function_name(),
    outputs: &[AbiType::Uint8],
    state_mutability: StateMutability::View,
};

/// Fragment of `totalSupply()`.
pub const TOTAL_SUPPLY: FunctionFragment = FunctionFragment {
    name: Field::TotalSupply.function_name(),
    outputs: &[AbiType::Uint256],
    state_mutability: StateMutability::View,
};

/// ABI fragment of every function queried for token metadata.
pub const ERC20_METADATA_ABI: &[FunctionFragment] =
    &[NAME, SYMBOL, DECIMALS, TOTAL_SUPPLY];

/// A function to call, together with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionCall {
    /// Function name, matching a [`FunctionFragment::name`].
    pub function: &'static str,
    /// Arguments, in input order.
    pub arguments: &'static [AbiValue],
}

/// Calls issued to fetch the full metadata record.
pub const METADATA_CALLS: &[FunctionCall] = &[
    FunctionCall { function: NAME.name, arguments: &[] },
    FunctionCall { function: SYMBOL.name, arguments: &[] },
    FunctionCall { function: DECIMALS.name, arguments: &[] },
    FunctionCall { function: TOTAL_SUPPLY.name, arguments: &[] },
];

/// Calls issued to refresh only the total supply.
pub const TOTAL_SUPPLY_CALLS: &[FunctionCall] =
    &[FunctionCall { function: TOTAL_SUPPLY.name, arguments: &[] }];

/// Looks up the fragment of `function` in `abi`.
#[must_use]
pub fn find_fragment<'a>(
    abi: &'a [FunctionFragment],
    function: &str,
) -> Option<&'a FunctionFragment> {
    abi.iter().find(|fragment| fragment.name == function)
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::{SolCall, SolValue};
    use hex_literal::hex;

    use super::*;

    #[test]
    fn selectors_match_the_standard_interface() {
        assert_eq!(NAME.selector().0, IErc20Metadata::nameCall::SELECTOR);
        assert_eq!(SYMBOL.selector().0, IErc20Metadata::symbolCall::SELECTOR);
        assert_eq!(
            DECIMALS.selector().0,
            IErc20Metadata::decimalsCall::SELECTOR
        );
        assert_eq!(
            TOTAL_SUPPLY.selector().0,
            IErc20Metadata::totalSupplyCall::SELECTOR
        );

        assert_eq!(NAME.selector().0, hex!("06fdde03"));
        assert_eq!(SYMBOL.selector().0, hex!("95d89b41"));
        assert_eq!(DECIMALS.selector().0, hex!("313ce567"));
        assert_eq!(TOTAL_SUPPLY.selector().0, hex!("18160ddd"));
    }

    #[test]
    fn signatures_match_the_standard_interface() {
        assert_eq!(NAME.signature(), IErc20Metadata::nameCall::SIGNATURE);
        assert_eq!(
            TOTAL_SUPPLY.signature(),
            IErc20Metadata::totalSupplyCall::SIGNATURE
        );
    }

    #[test]
    fn every_function_is_a_view_with_a_single_output() {
        for fragment in ERC20_METADATA_ABI {
            assert_eq!(fragment.outputs.len(), 1, "{}", fragment.name);
            assert_eq!(fragment.state_mutability, StateMutability::View);
            assert_eq!(fragment.state_mutability.as_str(), "view");
        }
    }

    #[test]
    fn output_types_agree_with_fields() {
        for fragment in ERC20_METADATA_ABI {
            let field = Field::from_function_name(fragment.name)
                .expect("should map to a field");
            assert_eq!(fragment.outputs, [field.output_type()]);
        }
    }

    #[test]
    fn metadata_calls_cover_the_abi_without_arguments() {
        assert_eq!(METADATA_CALLS.len(), ERC20_METADATA_ABI.len());
        for call in METADATA_CALLS {
            assert!(call.arguments.is_empty());
            assert!(find_fragment(ERC20_METADATA_ABI, call.function).is_some());
        }
        assert_eq!(TOTAL_SUPPLY_CALLS[0].function, "totalSupply");
    }

    #[test]
    fn calldata_without_arguments_is_the_selector() {
        let calldata = NAME.calldata(&[]).unwrap();
        assert_eq!(calldata.as_ref(), hex!("06fdde03"));
    }

    #[test]
    fn calldata_rejects_arguments() {
        let err = NAME.calldata(&[AbiValue::Uint8(1)]).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnexpectedArguments { function: "name", got: 1 }
        );
    }

    #[test]
    fn decodes_string_output() {
        let data = String::from("Wrapped Ether").abi_encode();
        let values = NAME.decode_output(&data).unwrap();
        assert_eq!(values, vec![AbiValue::from("Wrapped Ether")]);
    }

    #[test]
    fn keeps_invalid_utf8_in_string_output() {
        let raw = Bytes::from_static(&[0x57, 0xff, 0xfe, 0x54]);
        let data = raw.abi_encode();
        let values = SYMBOL.decode_output(&data).unwrap();
        assert_eq!(values, vec![AbiValue::Text(raw)]);
    }

    #[test]
    fn decodes_uint8_output() {
        let data = U256::from(18_u8).abi_encode();
        let values = DECIMALS.decode_output(&data).unwrap();
        assert_eq!(values, vec![AbiValue::Uint8(18)]);
    }

    #[test]
    fn rejects_uint8_output_out_of_range() {
        let data = U256::from(300_u64).abi_encode();
        assert!(DECIMALS.decode_output(&data).is_err());
    }

    #[test]
    fn decodes_uint256_output() {
        let supply = U256::from(10_u64).pow(U256::from(27_u64));
        let data = supply.abi_encode();
        let values = TOTAL_SUPPLY.decode_output(&data).unwrap();
        assert_eq!(values, vec![AbiValue::Uint256(supply)]);
    }

    #[test]
    fn rejects_empty_return_data() {
        assert!(NAME.decode_output(&[]).is_err());
        assert!(TOTAL_SUPPLY.decode_output(&[]).is_err());
    }
}
