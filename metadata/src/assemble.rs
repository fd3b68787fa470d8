//! Assembly of a sanitized metadata record from raw call results.
use alloy_primitives::U256;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{
    address::ContractAddress,
    call::{AbiValue, RawResults},
    field::Field,
    sanitize::{sanitize_text, InvalidTextPolicy, StoredText},
};

/// Metadata of a token, holding only the fields that could be read.
///
/// Absent fields are never filled with defaults. `name` and `symbol` are
/// [`StoredText`]; `decimals` and `total_supply` are exactly what the
/// contract returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMetadataPartial {
    name: Option<StoredText>,
    symbol: Option<StoredText>,
    decimals: Option<u8>,
    total_supply: Option<U256>,
}

/// Borrowed value of one field of a [`TokenMetadataPartial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// `name` or `symbol`.
    Text(&'a StoredText),
    /// `decimals`.
    Uint8(u8),
    /// `total_supply`.
    Uint256(U256),
}

impl TokenMetadataPartial {
    /// Token name.
    #[must_use]
    pub fn name(&self) -> Option<&StoredText> {
        self.name.as_ref()
    }

    /// Token symbol.
    #[must_use]
    pub fn symbol(&self) -> Option<&StoredText> {
        self.symbol.as_ref()
    }

    /// Number of decimals.
    #[must_use]
    pub fn decimals(&self) -> Option<u8> {
        self.decimals
    }

    /// Total supply.
    #[must_use]
    pub fn total_supply(&self) -> Option<U256> {
        self.total_supply
    }

    /// Value of `field`, if present.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::Name => self.name.as_ref().map(FieldValue::Text),
            Field::Symbol => self.symbol.as_ref().map(FieldValue::Text),
            Field::Decimals => self.decimals.map(FieldValue::Uint8),
            Field::TotalSupply => self.total_supply.map(FieldValue::Uint256),
        }
    }

    /// Whether `field` is present.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Present fields, in record order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|field| self.contains(*field))
    }

    /// Number of present fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields().count()
    }

    /// Whether no field could be read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(
        &mut self,
        field: Field,
        value: AbiValue,
        address: &ContractAddress,
    ) {
        match (field, value) {
            (Field::Name, AbiValue::Text(raw)) => {
                self.name = sanitize_text(
                    &raw,
                    InvalidTextPolicy::AddressPrefix,
                    address,
                );
            }
            (Field::Symbol, AbiValue::Text(raw)) => {
                self.symbol =
                    sanitize_text(&raw, InvalidTextPolicy::Drop, address);
            }
            (Field::Decimals, AbiValue::Uint8(decimals)) => {
                self.decimals = Some(decimals);
            }
            (Field::TotalSupply, AbiValue::Uint256(total_supply)) => {
                self.total_supply = Some(total_supply);
            }
            (field, value) => {
                tracing::debug!(
                    %address,
                    %field,
                    ?value,
                    "dropping value of unexpected type"
                );
            }
        }
    }
}

impl Serialize for TokenMetadataPartial {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        if let Some(name) = &self.name {
            map.serialize_entry(Field::Name.key(), name)?;
        }
        if let Some(symbol) = &self.symbol {
            map.serialize_entry(Field::Symbol.key(), symbol)?;
        }
        if let Some(decimals) = self.decimals {
            map.serialize_entry(Field::Decimals.key(), &decimals)?;
        }
        if let Some(total_supply) = self.total_supply {
            map.serialize_entry(
                Field::TotalSupply.key(),
                &total_supply.to_string(),
            )?;
        }
        map.end()
    }
}

/// Builds a sanitized metadata record from the raw results of one batch of
/// calls against `contract_address`.
///
/// An entry is used only if its function is one of the metadata functions
/// and its call returned exactly one value of the expected type. Everything
/// else is dropped, so the result may be empty, but this never fails.
///
/// `name` and `symbol` are then repaired independently:
/// - undecodable `name` becomes the address's
///   [short label](ContractAddress::short_label);
/// - undecodable `symbol` is dropped;
/// - null characters are stripped from valid text;
/// - text longer than [`crate::MAX_TEXT_BYTES`] is cut to that many bytes.
#[must_use]
pub fn assemble(
    raw_results: RawResults,
    contract_address: &ContractAddress,
) -> TokenMetadataPartial {
    let mut metadata = TokenMetadataPartial::default();

    for (function, outcome) in raw_results {
        let Some(field) = Field::from_function_name(&function) else {
            tracing::debug!(
                address = %contract_address,
                %function,
                "ignoring unknown function"
            );
            continue;
        };
        let Some(value) = outcome.into_single() else {
            tracing::debug!(
                address = %contract_address,
                %field,
                "field unavailable"
            );
            continue;
        };
        metadata.insert(field, value, contract_address);
    }

    metadata
}
