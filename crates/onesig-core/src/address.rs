//! Canonical ordering over signer addresses.
//!
//! Both the signing side and the on-chain verifier must agree on one signer
//! order. The convention is ascending numeric order of the address value,
//! case insensitive over its hex text, for both 20 and 32 byte addresses.

use std::cmp::Ordering;

use alloy::primitives::U256;

use crate::error::OneSigCoreError;

/// Parses hex address text (with or without a `0x` prefix, any case) into
/// its numeric value.
pub fn parse_address_value(input: &str) -> Result<U256, OneSigCoreError> {
	let digits = input
		.strip_prefix("0x")
		.or_else(|| input.strip_prefix("0X"))
		.unwrap_or(input);

	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(OneSigCoreError::InvalidAddress(input.to_string()));
	}

	U256::from_str_radix(digits, 16)
		.map_err(|_| OneSigCoreError::InvalidAddress(input.to_string()))
}

/// Compares two hex addresses by numeric value.
///
/// This is the single source of truth for canonical signer order; signature
/// concatenation and the verifier's sortedness check both reduce to it.
pub fn compare_addresses(a: &str, b: &str) -> Result<Ordering, OneSigCoreError> {
	Ok(parse_address_value(a)?.cmp(&parse_address_value(b)?))
}
