//! Typed error conditions for the OneSig core.
//!
//! Every failure this crate can produce is a distinct variant, so callers
//! branch on kind instead of parsing messages. All conditions are detected
//! synchronously and none are retried internally.

use alloy::primitives::B256;
use thiserror::Error;

/// Errors raised while building commitments, handling signatures, or signing.
#[derive(Debug, Error)]
pub enum OneSigCoreError {
	/// Two descriptors in one tree build share the same (nonce, account id)
	/// pair.
	#[error("nonce {nonce} for account {account_id} appears twice in one tree")]
	NonceIdSeenTwice {
		/// The duplicated replay nonce.
		nonce: u64,
		/// The account the nonce was duplicated for.
		account_id: u64,
	},
	/// Two leaves in one tree digest to byte-identical values.
	#[error("leaf digest {0} appears twice in one tree")]
	LeafSeenTwice(B256),
	/// A leaf index points outside a generator's descriptor list.
	#[error("no leaf at index {0}")]
	LeafNotFound(usize),
	/// The encoded target address is not exactly 32 bytes.
	#[error("leaf header requires a 32 byte target address, got {0} bytes")]
	InvalidHeader(usize),
	/// A proof was requested for a digest that is not a leaf of the tree.
	#[error("digest {0} is not a leaf of this tree")]
	UnknownLeaf(B256),
	/// A tree was requested over zero leaves.
	#[error("cannot build a commitment over zero leaves")]
	EmptyTree,
	/// Signature input was malformed: hex text without a `0x` prefix, or a
	/// byte length that is not a non-zero multiple of 65.
	#[error("invalid signature input: {0}")]
	InvalidSignatureInput(String),
	/// Signing was invoked with an empty signer list.
	#[error("at least one signer must be provided")]
	OneSignerRequired,
	/// Address-list concatenation was given a different number of addresses
	/// than signatures.
	#[error("{addresses} addresses provided for {signatures} signatures")]
	AddressSignatureLengthMismatch {
		/// Number of addresses supplied by the caller.
		addresses: usize,
		/// Number of signatures being concatenated.
		signatures: usize,
	},
	/// An input to concatenation already holds more than one signature.
	#[error("cannot concatenate pre-concatenated signatures")]
	CannotConcatInput,
	/// An address string is not parseable as a hex integer.
	#[error("invalid address {0:?}")]
	InvalidAddress(String),
	/// An external signer capability failed.
	#[error("signing failed: {0}")]
	SigningFailed(String),
	/// Recovering a signer address from a 65 byte signature failed.
	#[error("signature recovery failed: {0}")]
	RecoveryFailed(String),
}
