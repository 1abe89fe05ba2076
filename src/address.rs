// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account address normalization.
//!
//! Every externally supplied address passes through [`NormalizedAddress::parse`]
//! before any contract call or registry lookup. The canonical form is the
//! lowercase `0x`-prefixed hex rendering, so comparisons and lookups are
//! case-insensitive by construction.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;

/// Validation failures for externally supplied account addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The address field was absent, empty, or whitespace-only.
    #[error("eth_address is required")]
    Missing,

    /// The input is not a 20-byte hex address.
    #[error("not a valid Ethereum address: {0}")]
    Malformed(String),
}

/// A syntactically valid account address in canonical (lowercase) form.
///
/// Wraps the parsed 20-byte address; [`fmt::Display`] renders the lowercase
/// `0x`-prefixed form used as the lookup key downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedAddress(Address);

impl NormalizedAddress {
    /// Validate and canonicalize a raw address string.
    ///
    /// Accepts any casing, with or without the `0x` prefix. The input is
    /// trimmed first; an empty result fails with [`AddressError::Missing`].
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Missing);
        }

        let addr = Address::from_str(trimmed)
            .map_err(|_| AddressError::Malformed(trimmed.to_string()))?;
        Ok(Self(addr))
    }

    /// The parsed 20-byte address, for contract calls.
    pub fn address(&self) -> Address {
        self.0
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lowercase 0x-prefixed hex; the canonical lookup key.
        write!(f, "{:#x}", self.0)
    }
}
