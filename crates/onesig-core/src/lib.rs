//! Core building blocks for OneSig batch authorization.
//!
//! This crate turns a batch of cross-chain transaction bundles into one
//! Merkle commitment and produces a canonically ordered multi-signature
//! attestation over it that an on-chain verifier can check cheaply:
//!
//! 1. Describe each bundle as a [`LeafData`] and group bundles into
//!    [`LeafGenerator`]s, one per target chain encoding.
//! 2. [`make_tree`] digests every bundle, enforces (nonce, account id)
//!    uniqueness, and commits to the batch with a sorted-pair Merkle tree.
//! 3. [`sign_tree`] collects EIP-712 signatures from every signer
//!    concurrently and returns the ascending-address ordered [`Signature`]
//!    blob.
//!
//! The caller then hands (leaf, proof, root, expiry, signature bytes) to the
//! on-chain verifier, which independently recomputes the digest, recovers
//! signer addresses, and checks quorum, sortedness, and nonce monotonicity.
//! Everything here is a stateless transform; nothing persists between calls.

/// Canonical ordering over signer addresses.
pub mod address;
/// Minimal EIP-712 hashing for the attestation message.
pub mod eip712;
/// Typed error conditions.
pub mod error;
/// Leaf descriptors, generators, and the leaf wire codec.
pub mod leaf;
/// Multi-signature representation and concatenation rules.
pub mod signature;
/// Domain separated signing of commitment roots.
pub mod signing;
/// Sorted-pair Merkle commitment.
pub mod tree;

pub use address::{compare_addresses, parse_address_value};
pub use error::OneSigCoreError;
pub use leaf::{
	encode_leaf, encode_leaf_header, LeafData, LeafGenerator, LeafKey, LeafSegment,
	LEAF_HEADER_FLAG, LEAF_HEADER_LENGTH, TARGET_ADDRESS_LENGTH,
};
pub use signature::{Signature, SignatureOrdering, SIGNATURE_LENGTH};
pub use signing::{
	digest_to_sign, sign_tree, SigningOptions, TreeSigner, SIGN_MERKLE_ROOT_TYPE,
	TYPED_DATA_DOMAIN_CHAIN_ID, TYPED_DATA_DOMAIN_NAME, TYPED_DATA_DOMAIN_VERIFYING_CONTRACT,
	TYPED_DATA_DOMAIN_VERSION,
};
pub use tree::{hash_pair, make_tree, verify_proof, OneSigTree};
