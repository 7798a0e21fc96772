//! Sorted-pair Merkle commitment over encoded leaves.
//!
//! Internal nodes hash their two children in sorted order, so proofs carry no
//! left/right side information and any verifier can refold them with the same
//! two line rule. An odd node at the end of a layer is promoted unchanged.

use std::collections::{HashMap, HashSet};

use alloy::primitives::{keccak256, B256};

use crate::error::OneSigCoreError;
use crate::leaf::LeafSegment;

/// Hashes a pair of nodes, lower value first.
pub fn hash_pair(a: B256, b: B256) -> B256 {
	let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

	let mut data = [0u8; 64];
	data[..32].copy_from_slice(lo.as_slice());
	data[32..].copy_from_slice(hi.as_slice());
	keccak256(data)
}

/// Verifies a Merkle proof by refolding the leaf digest through each sibling.
///
/// Pure function of its inputs, independent of any tree state; this is the
/// same computation an on-chain verifier performs from raw calldata.
pub fn verify_proof(proof: &[B256], leaf: B256, root: B256) -> bool {
	proof
		.iter()
		.fold(leaf, |acc, sibling| hash_pair(acc, *sibling))
		== root
}

/// Immutable sorted-pair Merkle tree over a sequence of leaf digests.
///
/// Layer zero holds the leaves in index order; the last layer holds the root.
/// Safe to share read-only across any number of concurrent readers.
#[derive(Debug, Clone)]
pub struct OneSigTree {
	layers: Vec<Vec<B256>>,
	indices: HashMap<B256, usize>,
}

impl OneSigTree {
	/// Builds a tree over pre-encoded leaf digests.
	///
	/// Byte-identical duplicate digests are rejected with
	/// [`OneSigCoreError::LeafSeenTwice`]: a duplicated leaf would make proof
	/// lookup ambiguous and silently alias two bundles.
	pub fn new(leaves: Vec<B256>) -> Result<Self, OneSigCoreError> {
		if leaves.is_empty() {
			return Err(OneSigCoreError::EmptyTree);
		}

		let mut indices = HashMap::with_capacity(leaves.len());
		for (index, leaf) in leaves.iter().enumerate() {
			if indices.insert(*leaf, index).is_some() {
				return Err(OneSigCoreError::LeafSeenTwice(*leaf));
			}
		}

		let mut layers = vec![leaves];
		while layers[layers.len() - 1].len() > 1 {
			let current = &layers[layers.len() - 1];
			let mut next = Vec::with_capacity(current.len().div_ceil(2));
			for pair in current.chunks(2) {
				next.push(match pair {
					[left, right] => hash_pair(*left, *right),
					[lone] => *lone,
					_ => unreachable!("chunks(2) yields one or two nodes"),
				});
			}
			layers.push(next);
		}

		Ok(Self { layers, indices })
	}

	/// Number of leaves committed.
	pub fn leaf_count(&self) -> usize {
		self.layers[0].len()
	}

	/// Leaf digests in index order.
	pub fn leaves(&self) -> &[B256] {
		&self.layers[0]
	}

	/// The commitment root signers attest to.
	pub fn root(&self) -> B256 {
		self.layers[self.layers.len() - 1][0]
	}

	/// Sibling path for `leaf`, ordered bottom up.
	///
	/// Fails with [`OneSigCoreError::UnknownLeaf`] when `leaf` is not
	/// committed by this tree.
	pub fn proof(&self, leaf: B256) -> Result<Vec<B256>, OneSigCoreError> {
		let mut index = *self
			.indices
			.get(&leaf)
			.ok_or(OneSigCoreError::UnknownLeaf(leaf))?;

		let mut proof = Vec::with_capacity(self.layers.len() - 1);
		for layer in &self.layers[..self.layers.len() - 1] {
			// Promoted odd nodes have no sibling at this layer.
			if let Some(sibling) = layer.get(index ^ 1) {
				proof.push(*sibling);
			}
			index /= 2;
		}

		Ok(proof)
	}
}

/// Builds the commitment over every leaf of every segment.
///
/// Leaves are indexed segment-major: all of the first segment's leaves in
/// order, then the second's, and so on. [`crate::leaf::encode_leaf`] and
/// [`OneSigTree::proof`] address leaves through that same ordering.
///
/// Fails with [`OneSigCoreError::NonceIdSeenTwice`] when two descriptors,
/// from any segments, share a (nonce, account id) pair.
pub fn make_tree(segments: &[&dyn LeafSegment]) -> Result<OneSigTree, OneSigCoreError> {
	let mut digests = Vec::new();
	let mut seen_keys = HashSet::new();

	for segment in segments {
		for index in 0..segment.leaf_count() {
			let key = segment.leaf_key(index)?;
			if !seen_keys.insert(key) {
				return Err(OneSigCoreError::NonceIdSeenTwice {
					nonce: key.nonce,
					account_id: key.account_id,
				});
			}

			digests.push(segment.leaf_digest(index)?);
		}
	}

	tracing::debug!(
		leaves = digests.len(),
		segments = segments.len(),
		"building onesig commitment"
	);

	OneSigTree::new(digests)
}
