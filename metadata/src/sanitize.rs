//! Storage-safe repair of token names and symbols.
//!
//! Text fields go through two independent steps:
//!
//! 1. [`repair_text`] checks the raw bytes are valid UTF-8. Valid text loses
//!    its null characters. Invalid text is either replaced by the contract's
//!    short label or dropped, depending on the field's
//!    [`InvalidTextPolicy`].
//! 2. [`truncate_text`] cuts the result to [`MAX_TEXT_BYTES`] bytes.
//!
//! The cut counts bytes, not characters, so it may split a multi-byte
//! character at the boundary. Records stored earlier were cut the same way,
//! and changing it would change their shape.
use core::fmt;
use std::borrow::Cow;

use alloy_primitives::Bytes;
use serde::{Serialize, Serializer};

use crate::address::ContractAddress;

/// What to do with a text field whose raw bytes are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTextPolicy {
    /// Replace the value with the short label of the contract address.
    AddressPrefix,
    /// Remove the field from the record.
    Drop,
}

/// Maximum number of bytes kept for a stored name or symbol.
pub const MAX_TEXT_BYTES: usize = 255;

/// A sanitized name or symbol.
///
/// Holds no null bytes and at most [`MAX_TEXT_BYTES`] bytes. It is valid
/// UTF-8 except that truncation may have left a partial character at the
/// end.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StoredText(Bytes);

impl StoredText {
    /// Raw stored bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The text as `&str`, or `None` if truncation split a character.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }

    /// The text, with a split trailing character replaced by `U+FFFD`.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the text, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl fmt::Debug for StoredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl fmt::Display for StoredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl PartialEq<str> for StoredText {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for StoredText {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Serialize for StoredText {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// Repairs raw text returned by a contract.
///
/// Valid UTF-8 is returned with every `\0` removed. Invalid UTF-8 becomes the
/// address's [short label](ContractAddress::short_label) under
/// [`InvalidTextPolicy::AddressPrefix`], or `None` under
/// [`InvalidTextPolicy::Drop`].
#[must_use]
pub fn repair_text(
    raw: &[u8],
    policy: InvalidTextPolicy,
    address: &ContractAddress,
) -> Option<String> {
    match core::str::from_utf8(raw) {
        Ok(text) => Some(strip_nulls(text)),
        Err(err) => {
            tracing::debug!(%address, ?policy, %err, "undecodable text");
            match policy {
                InvalidTextPolicy::AddressPrefix => Some(address.short_label()),
                InvalidTextPolicy::Drop => None,
            }
        }
    }
}

/// Removes every null character from `text`.
#[must_use]
pub fn strip_nulls(text: &str) -> String {
    text.replace('\0', "")
}

/// Cuts `text` to its first [`MAX_TEXT_BYTES`] bytes.
#[must_use]
pub fn truncate_text(text: String) -> StoredText {
    let mut bytes = text.into_bytes();
    if bytes.len() > MAX_TEXT_BYTES {
        tracing::debug!(len = bytes.len(), "truncating text");
        bytes.truncate(MAX_TEXT_BYTES);
    }
    StoredText(Bytes::from(bytes))
}

/// Runs both repair steps on `raw`.
#[must_use]
pub fn sanitize_text(
    raw: &[u8],
    policy: InvalidTextPolicy,
    address: &ContractAddress,
) -> Option<StoredText> {
    repair_text(raw, policy, address).map(truncate_text)
}
