//! Domain separated signing of a commitment root.
//!
//! Signers attest to `SignMerkleRoot(bytes32 seed, bytes32 merkleRoot,
//! uint256 expiry)` under a fixed EIP-712 domain. The domain constants are
//! part of the protocol: the on-chain verifier recomputes the identical
//! digest from them, so they are not caller configurable.

use alloy::primitives::{address, keccak256, Address, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::eip712::{compute_domain_hash, compute_final_digest, Eip712AbiEncoder};
use crate::error::OneSigCoreError;
use crate::signature::{Signature, SignatureOrdering};
use crate::tree::OneSigTree;

/// EIP-712 domain name.
pub const TYPED_DATA_DOMAIN_NAME: &str = "OneSig";
/// EIP-712 domain version.
pub const TYPED_DATA_DOMAIN_VERSION: &str = "0.0.1";
/// Domain chain id, hardcoded to Ethereum mainnet regardless of target chain.
pub const TYPED_DATA_DOMAIN_CHAIN_ID: u64 = 1;
/// Domain verifying contract, hardcoded to the dead address.
pub const TYPED_DATA_DOMAIN_VERIFYING_CONTRACT: Address =
	address!("000000000000000000000000000000000000dead");

/// Type string of the signed message.
pub const SIGN_MERKLE_ROOT_TYPE: &str =
	"SignMerkleRoot(bytes32 seed,bytes32 merkleRoot,uint256 expiry)";

/// Caller supplied signing parameters, bound into the signed message and
/// handed unchanged to the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningOptions {
	/// Free form 32 bytes distinguishing otherwise identical batches.
	pub seed: B256,
	/// Unix timestamp after which the verifier refuses the attestation. Not
	/// an execution deadline for the signing call itself.
	pub expiry: U256,
}

/// External signing capability: anything that can produce one 65 byte ECDSA
/// signature over a 32 byte digest.
///
/// Implementations may perform network or hardware I/O. Failures propagate
/// to the caller unchanged; retry policy, if any, belongs behind this trait.
#[async_trait]
pub trait TreeSigner: Send + Sync {
	/// Signs `digest`, returning exactly one signature.
	async fn sign_digest(&self, digest: B256) -> Result<Signature, OneSigCoreError>;
}

#[async_trait]
impl TreeSigner for PrivateKeySigner {
	async fn sign_digest(&self, digest: B256) -> Result<Signature, OneSigCoreError> {
		let signature = self
			.sign_hash(&digest)
			.await
			.map_err(|e| OneSigCoreError::SigningFailed(e.to_string()))?;

		Signature::new(signature.as_bytes().to_vec())
	}
}

/// EIP-712 struct hash of the `SignMerkleRoot` message.
fn compute_struct_hash(root: B256, options: &SigningOptions) -> B256 {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(SIGN_MERKLE_ROOT_TYPE.as_bytes()));
	enc.push_b256(&options.seed);
	enc.push_b256(&root);
	enc.push_u256(options.expiry);
	keccak256(enc.finish())
}

/// The digest every signer attests to for `tree` under `options`.
///
/// Pure function of (root, seed, expiry); producing each signature and
/// recovering signer addresses from raw signature bytes both recompute it.
pub fn digest_to_sign(tree: &OneSigTree, options: &SigningOptions) -> B256 {
	let domain_hash = compute_domain_hash(
		TYPED_DATA_DOMAIN_NAME,
		TYPED_DATA_DOMAIN_VERSION,
		TYPED_DATA_DOMAIN_CHAIN_ID,
		&TYPED_DATA_DOMAIN_VERIFYING_CONTRACT,
	);

	compute_final_digest(&domain_hash, &compute_struct_hash(tree.root(), options))
}

/// Collects one signature per signer over the commitment digest and returns
/// the canonical ascending-address concatenation.
///
/// All signers are invoked concurrently; completion order is irrelevant
/// because the result is reordered by recovered address. The first signer
/// failure aborts the whole call with that signer's error and no partial
/// result. Fails with [`OneSigCoreError::OneSignerRequired`] when `signers`
/// is empty. The hex form of the result is [`Signature::to_hex_string`].
pub async fn sign_tree(
	tree: &OneSigTree,
	signers: &[&dyn TreeSigner],
	options: &SigningOptions,
) -> Result<Signature, OneSigCoreError> {
	if signers.is_empty() {
		return Err(OneSigCoreError::OneSignerRequired);
	}

	let digest = digest_to_sign(tree, options);

	tracing::debug!(
		signers = signers.len(),
		root = %tree.root(),
		"signing onesig commitment"
	);

	let signatures =
		try_join_all(signers.iter().map(|signer| signer.sign_digest(digest))).await?;

	Signature::concatenate(&signatures, SignatureOrdering::ByDigest(digest))
}
