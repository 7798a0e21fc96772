//! Canonical multi-signature representation.
//!
//! A [`Signature`] holds one or more 65 byte ECDSA signatures (r || s || v)
//! back to back. On-chain verifiers recover a signer address from each chunk
//! and require strictly ascending address order, which turns the duplicate
//! and quorum checks into a single linear scan; [`Signature::concatenate`]
//! produces exactly that order.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Signature as EcdsaSignature, B256, U256};

use crate::address::parse_address_value;
use crate::error::OneSigCoreError;

/// Size in bytes of one encoded ECDSA signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// How [`Signature::concatenate`] orders its inputs.
#[derive(Debug, Clone)]
pub enum SignatureOrdering {
	/// Keep the caller's order unchanged.
	Unsorted,
	/// Sort by the given hex addresses, one per signature by position.
	ByAddressList(Vec<String>),
	/// Recover each signer's address from its signature against this digest
	/// and sort by the recovered addresses.
	ByDigest(B256),
}

/// One or more concatenated 65 byte ECDSA signatures.
///
/// The byte length is always a non-zero multiple of 65.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
	bytes: Vec<u8>,
}

impl Signature {
	/// Wraps raw signature bytes.
	///
	/// Fails with [`OneSigCoreError::InvalidSignatureInput`] unless the
	/// length is a non-zero multiple of 65.
	pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, OneSigCoreError> {
		let bytes = bytes.into();
		if bytes.is_empty() || bytes.len() % SIGNATURE_LENGTH != 0 {
			return Err(OneSigCoreError::InvalidSignatureInput(format!(
				"length {} is not a non-zero multiple of {}",
				bytes.len(),
				SIGNATURE_LENGTH
			)));
		}

		Ok(Self { bytes })
	}

	/// Parses a `0x` prefixed hex encoding.
	///
	/// Hex text without the prefix is rejected, so raw decimal or otherwise
	/// ambiguous input never sneaks through.
	pub fn from_hex(input: &str) -> Result<Self, OneSigCoreError> {
		let digits = input.strip_prefix("0x").ok_or_else(|| {
			OneSigCoreError::InvalidSignatureInput(
				"hex input must be prefixed with 0x".to_string(),
			)
		})?;

		let bytes = hex::decode(digits)
			.map_err(|e| OneSigCoreError::InvalidSignatureInput(e.to_string()))?;
		Self::new(bytes)
	}

	/// Raw signature bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// `0x` prefixed hex encoding.
	pub fn to_hex_string(&self) -> String {
		format!("0x{}", hex::encode(&self.bytes))
	}

	/// Number of 65 byte signatures held. Exact by the length invariant.
	pub fn signature_count(&self) -> usize {
		self.bytes.len() / SIGNATURE_LENGTH
	}

	/// Concatenates single signatures into one blob, ordered per `ordering`.
	///
	/// Every input must hold exactly one signature
	/// ([`OneSigCoreError::CannotConcatInput`] otherwise), so an already
	/// combined blob can never be folded in again.
	pub fn concatenate(
		inputs: &[Signature],
		ordering: SignatureOrdering,
	) -> Result<Signature, OneSigCoreError> {
		for input in inputs {
			if input.signature_count() != 1 {
				return Err(OneSigCoreError::CannotConcatInput);
			}
		}

		let order = match ordering {
			SignatureOrdering::Unsorted => (0..inputs.len()).collect(),
			SignatureOrdering::ByAddressList(addresses) => {
				let values = addresses
					.iter()
					.map(|address| parse_address_value(address))
					.collect::<Result<Vec<_>, _>>()?;
				sorted_indices(inputs.len(), &values)?
			}
			SignatureOrdering::ByDigest(digest) => {
				let values = inputs
					.iter()
					.map(|input| recover_address_value(input.as_bytes(), &digest))
					.collect::<Result<Vec<_>, _>>()?;
				sorted_indices(inputs.len(), &values)?
			}
		};

		let mut combined = Vec::with_capacity(inputs.len() * SIGNATURE_LENGTH);
		for index in order {
			combined.extend_from_slice(inputs[index].as_bytes());
		}

		Signature::new(combined)
	}
}

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex_string())
	}
}

impl FromStr for Signature {
	type Err = OneSigCoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_hex(s)
	}
}

impl AsRef<[u8]> for Signature {
	fn as_ref(&self) -> &[u8] {
		&self.bytes
	}
}

/// Indices `0..count` sorted ascending by the address value at each position.
fn sorted_indices(count: usize, addresses: &[U256]) -> Result<Vec<usize>, OneSigCoreError> {
	if addresses.len() != count {
		return Err(OneSigCoreError::AddressSignatureLengthMismatch {
			addresses: addresses.len(),
			signatures: count,
		});
	}

	let mut order: Vec<usize> = (0..count).collect();
	order.sort_by(|a, b| addresses[*a].cmp(&addresses[*b]));
	Ok(order)
}

/// Recovers the numeric signer address of one 65 byte signature over `digest`.
fn recover_address_value(bytes: &[u8], digest: &B256) -> Result<U256, OneSigCoreError> {
	let signature = EcdsaSignature::from_raw(bytes)
		.map_err(|e| OneSigCoreError::RecoveryFailed(e.to_string()))?;
	let address = signature
		.recover_address_from_prehash(digest)
		.map_err(|e| OneSigCoreError::RecoveryFailed(e.to_string()))?;

	Ok(U256::from_be_slice(address.as_slice()))
}
