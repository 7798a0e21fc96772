//! Minimal EIP-712 hashing for the OneSig attestation message.
//!
//! Only static field types appear in the OneSig schema, so struct hashing
//! needs nothing beyond a small ABI encoder over 32 byte words:
//! - domain separator computation
//! - final digest computation (0x1901 || domainHash || structHash)

use alloy::primitives::{keccak256, Address, B256, U256};

/// Type string of the EIP-712 domain used by OneSig.
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Computes the EIP-712 domain separator:
/// `keccak256(abi.encode(typeHash, nameHash, versionHash, chainId, verifyingContract))`.
pub fn compute_domain_hash(
	name: &str,
	version: &str,
	chain_id: u64,
	verifying_contract: &Address,
) -> B256 {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(DOMAIN_TYPE.as_bytes()));
	enc.push_b256(&keccak256(name.as_bytes()));
	enc.push_b256(&keccak256(version.as_bytes()));
	enc.push_u256(U256::from(chain_id));
	enc.push_address(verifying_contract);
	keccak256(enc.finish())
}

/// Computes the final EIP-712 digest: `keccak256(0x1901 || domainHash || structHash)`.
pub fn compute_final_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// ABI encoder for the static word types EIP-712 struct hashing uses.
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Default for Eip712AbiEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Eip712AbiEncoder {
	/// Creates an empty encoder.
	pub fn new() -> Self {
		Self { buf: Vec::new() }
	}

	/// Appends a 32 byte word as-is.
	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	/// Appends an address, left padded to 32 bytes.
	pub fn push_address(&mut self, addr: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	/// Appends a uint256 in big-endian form.
	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	/// Returns the encoded words.
	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_encoder_pads_static_types() {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_address(&Address::repeat_byte(0x11));
		enc.push_u256(U256::from(5));
		let words = enc.finish();

		assert_eq!(words.len(), 64);
		assert_eq!(&words[..12], &[0u8; 12]);
		assert_eq!(&words[12..32], Address::repeat_byte(0x11).as_slice());
		assert_eq!(words[63], 5);
		assert_eq!(&words[32..63], &[0u8; 31]);
	}

	#[test]
	fn test_domain_hash_binds_every_field() {
		let contract = Address::repeat_byte(0xde);
		let base = compute_domain_hash("OneSig", "0.0.1", 1, &contract);

		assert_ne!(base, compute_domain_hash("OtherSig", "0.0.1", 1, &contract));
		assert_ne!(base, compute_domain_hash("OneSig", "0.0.2", 1, &contract));
		assert_ne!(base, compute_domain_hash("OneSig", "0.0.1", 2, &contract));
		assert_ne!(
			base,
			compute_domain_hash("OneSig", "0.0.1", 1, &Address::repeat_byte(0xad))
		);
		// Same inputs, same separator.
		assert_eq!(base, compute_domain_hash("OneSig", "0.0.1", 1, &contract));
	}

	#[test]
	fn test_final_digest_is_prefixed() {
		let domain = keccak256(b"domain");
		let message = keccak256(b"message");

		let mut preimage = vec![0x19, 0x01];
		preimage.extend_from_slice(domain.as_slice());
		preimage.extend_from_slice(message.as_slice());
		assert_eq!(compute_final_digest(&domain, &message), keccak256(preimage));
	}
}
