//! Leaf descriptors, per-chain generators, and the leaf wire codec.
//!
//! A leaf commits to one transaction bundle for one target account. The wire
//! form is a fixed 49 byte header followed by an opaque, chain specific call
//! payload:
//!
//! ```text
//! [flag: 1 = 0x01][account id: 8 BE][target address: 32][nonce: 8 BE]
//! ```
//!
//! The digest fed into the tree is `keccak256(keccak256(header || payload))`.
//! The double hash separates the leaf preimage domain from the internal node
//! domain, so a leaf digest can never be replayed as an intermediate node.

use alloy::primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};

use crate::error::OneSigCoreError;

/// Version marker written as the first header byte.
pub const LEAF_HEADER_FLAG: u8 = 1;
/// Total size of the fixed leaf header.
pub const LEAF_HEADER_LENGTH: usize = 49;
/// Canonical encoded width of a target account address.
pub const TARGET_ADDRESS_LENGTH: usize = 32;

/// One transaction bundle to be committed: which account executes it, under
/// which replay nonce, and the calls it performs.
///
/// `A` and `C` are the chain specific address and call types; the matching
/// [`LeafGenerator`] knows how to encode them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafData<A, C> {
	/// Replay nonce consumed by the target account when the bundle executes.
	pub nonce: u64,
	/// Identifier of the target OneSig account.
	pub account_id: u64,
	/// Chain specific address of the target account.
	pub target_address: A,
	/// Calls the bundle performs, in execution order.
	pub calls: Vec<C>,
}

/// The (nonce, account id) pair that must be globally unique within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeafKey {
	/// Replay nonce of the bundle.
	pub nonce: u64,
	/// Identifier of the target account.
	pub account_id: u64,
}

/// Per-chain leaf source: a descriptor list plus the two encoders that turn
/// chain specific types into canonical bytes.
///
/// One generator is typically instantiated per target chain family; trees
/// may combine several generators through [`LeafSegment`].
pub trait LeafGenerator {
	/// Chain specific address type of the target account.
	type TargetAddress;
	/// Chain specific call record type.
	type Call;

	/// Descriptors supplied by this generator, in leaf index order.
	fn leafs(&self) -> &[LeafData<Self::TargetAddress, Self::Call>];

	/// Encodes a target address into its canonical 32 byte form.
	///
	/// The length is validated by [`encode_leaf_header`]; returning anything
	/// other than 32 bytes makes leaf encoding fail with
	/// [`OneSigCoreError::InvalidHeader`].
	fn encode_address(&self, address: &Self::TargetAddress) -> Vec<u8>;

	/// Encodes a call sequence into the opaque leaf payload.
	fn encode_calls(&self, calls: &[Self::Call]) -> Vec<u8>;
}

/// Object safe view of a [`LeafGenerator`], so one tree can combine
/// generators with different address and call types.
///
/// Implemented for every [`LeafGenerator`]; callers normally never implement
/// this directly.
pub trait LeafSegment {
	/// Number of leaves in this segment.
	fn leaf_count(&self) -> usize;

	/// Uniqueness key of the leaf at `index`.
	fn leaf_key(&self, index: usize) -> Result<LeafKey, OneSigCoreError>;

	/// Digest of the leaf at `index`.
	fn leaf_digest(&self, index: usize) -> Result<B256, OneSigCoreError>;
}

impl<G: LeafGenerator> LeafSegment for G {
	fn leaf_count(&self) -> usize {
		self.leafs().len()
	}

	fn leaf_key(&self, index: usize) -> Result<LeafKey, OneSigCoreError> {
		self.leafs()
			.get(index)
			.map(|leaf| LeafKey {
				nonce: leaf.nonce,
				account_id: leaf.account_id,
			})
			.ok_or(OneSigCoreError::LeafNotFound(index))
	}

	fn leaf_digest(&self, index: usize) -> Result<B256, OneSigCoreError> {
		encode_leaf(self, index)
	}
}

/// Encodes the fixed 49 byte leaf header.
///
/// Fails with [`OneSigCoreError::InvalidHeader`] unless `target_address` is
/// exactly 32 bytes.
pub fn encode_leaf_header(
	account_id: u64,
	target_address: &[u8],
	nonce: u64,
) -> Result<[u8; LEAF_HEADER_LENGTH], OneSigCoreError> {
	if target_address.len() != TARGET_ADDRESS_LENGTH {
		return Err(OneSigCoreError::InvalidHeader(target_address.len()));
	}

	let mut header = [0u8; LEAF_HEADER_LENGTH];
	header[0] = LEAF_HEADER_FLAG;
	header[1..9].copy_from_slice(&account_id.to_be_bytes());
	header[9..41].copy_from_slice(target_address);
	header[41..49].copy_from_slice(&nonce.to_be_bytes());

	Ok(header)
}

/// Encodes and digests the leaf at `index` within `generator`.
///
/// Fails with [`OneSigCoreError::LeafNotFound`] when `index` is out of range.
pub fn encode_leaf<G>(generator: &G, index: usize) -> Result<B256, OneSigCoreError>
where
	G: LeafGenerator + ?Sized,
{
	let leaf = generator
		.leafs()
		.get(index)
		.ok_or(OneSigCoreError::LeafNotFound(index))?;

	let header = encode_leaf_header(
		leaf.account_id,
		&generator.encode_address(&leaf.target_address),
		leaf.nonce,
	)?;

	let payload = generator.encode_calls(&leaf.calls);
	let mut preimage = Vec::with_capacity(LEAF_HEADER_LENGTH + payload.len());
	preimage.extend_from_slice(&header);
	preimage.extend_from_slice(&payload);

	Ok(keccak256(keccak256(&preimage)))
}
