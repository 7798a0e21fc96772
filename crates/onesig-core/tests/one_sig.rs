//! End to end exercise: build a commitment over two bundles, attest with
//! three signers, and check the blob the on-chain verifier would receive.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{B256, U256};
use alloy::signers::local::PrivateKeySigner;
use onesig_core::{
	digest_to_sign, encode_leaf, make_tree, sign_tree, verify_proof, LeafData, LeafGenerator,
	OneSigCoreError, Signature, SignatureOrdering, SigningOptions, TreeSigner, SIGNATURE_LENGTH,
};

type RawLeafData = LeafData<[u8; 32], Vec<u8>>;

/// Pass-through generator: addresses and call payloads are already bytes.
struct RawLeafGenerator {
	leafs: Vec<RawLeafData>,
}

impl LeafGenerator for RawLeafGenerator {
	type TargetAddress = [u8; 32];
	type Call = Vec<u8>;

	fn leafs(&self) -> &[RawLeafData] {
		&self.leafs
	}

	fn encode_address(&self, address: &[u8; 32]) -> Vec<u8> {
		address.to_vec()
	}

	fn encode_calls(&self, calls: &[Vec<u8>]) -> Vec<u8> {
		calls.concat()
	}
}

fn test_leafs() -> Vec<RawLeafData> {
	vec![
		LeafData {
			nonce: 0,
			account_id: 5,
			target_address: [0u8; 32],
			calls: vec![vec![0xaa; 32]],
		},
		LeafData {
			nonce: 1,
			account_id: 5,
			target_address: [0u8; 32],
			calls: vec![vec![0xbb; 32]],
		},
	]
}

fn fixed_signer(byte: u8) -> PrivateKeySigner {
	let mut key = [0u8; 32];
	key[31] = byte;
	PrivateKeySigner::from_bytes(&B256::from(key)).expect("static test key is valid")
}

fn signing_options() -> SigningOptions {
	let now = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("clock after epoch")
		.as_secs();

	SigningOptions {
		seed: B256::repeat_byte(0x5e),
		expiry: U256::from(now + 5000),
	}
}

#[test]
fn basic_tree_generation() {
	let generator = RawLeafGenerator { leafs: test_leafs() };
	let tree = make_tree(&[&generator]).unwrap();

	assert_eq!(tree.leaf_count(), 2);

	let first_leaf = encode_leaf(&generator, 0).unwrap();
	let proof = tree.proof(first_leaf).unwrap();
	assert!(verify_proof(&proof, first_leaf, tree.root()));

	// Re-adding the first bundle replays its (nonce, account id) pair.
	let mut doubled = test_leafs();
	doubled.push(test_leafs().remove(0));
	let err = make_tree(&[&RawLeafGenerator { leafs: doubled }]).unwrap_err();
	assert!(matches!(err, OneSigCoreError::NonceIdSeenTwice { .. }));
}

#[tokio::test]
async fn end_to_end_signing() {
	let generator = RawLeafGenerator { leafs: test_leafs() };
	let tree = make_tree(&[&generator]).unwrap();
	let options = signing_options();

	let signers: Vec<PrivateKeySigner> = (1..=3).map(fixed_signer).collect();

	// Each signer alone yields a single 65 byte signature that round-trips
	// through its hex form.
	let mut singles = Vec::new();
	for signer in &signers {
		let signer_refs: Vec<&dyn TreeSigner> = vec![signer];
		let signed = sign_tree(&tree, &signer_refs, &options).await.unwrap();

		assert_eq!(signed.signature_count(), 1);
		assert_eq!(signed.as_bytes().len(), SIGNATURE_LENGTH);
		assert_eq!(
			Signature::from_hex(&signed.to_hex_string()).unwrap(),
			signed
		);

		singles.push(signed);
	}

	// Combined signing yields all three, ascending by signer address.
	let signer_refs: Vec<&dyn TreeSigner> = signers.iter().map(|s| s as &dyn TreeSigner).collect();
	let combined = sign_tree(&tree, &signer_refs, &options).await.unwrap();

	assert_eq!(combined.signature_count(), 3);
	assert_eq!(combined.as_bytes().len(), 3 * SIGNATURE_LENGTH);

	// Independently compute the expected ascending concatenation from the
	// signers' known addresses.
	let mut order: Vec<usize> = (0..signers.len()).collect();
	order.sort_by_key(|&i| U256::from_be_slice(signers[i].address().as_slice()));
	let expected: Vec<u8> = order
		.iter()
		.flat_map(|&i| singles[i].as_bytes().to_vec())
		.collect();
	assert_eq!(combined.as_bytes(), expected.as_slice());

	// Digest ordering is invariant under input shuffling and agrees with the
	// explicit modes.
	let digest = digest_to_sign(&tree, &options);
	let shuffled = vec![singles[2].clone(), singles[0].clone(), singles[1].clone()];
	let from_shuffled =
		Signature::concatenate(&shuffled, SignatureOrdering::ByDigest(digest)).unwrap();
	assert_eq!(from_shuffled, combined);

	let from_addresses = Signature::concatenate(
		&singles,
		SignatureOrdering::ByAddressList(
			signers.iter().map(|s| s.address().to_string()).collect(),
		),
	)
	.unwrap();
	assert_eq!(from_addresses, combined);

	let pre_sorted: Vec<Signature> = order.iter().map(|&i| singles[i].clone()).collect();
	let unsorted_of_sorted =
		Signature::concatenate(&pre_sorted, SignatureOrdering::Unsorted).unwrap();
	assert_eq!(unsorted_of_sorted, combined);

	// A combined blob cannot be concatenated again.
	let err = Signature::concatenate(
		&[combined, singles[0].clone()],
		SignatureOrdering::ByDigest(digest),
	)
	.unwrap_err();
	assert!(matches!(err, OneSigCoreError::CannotConcatInput));

	// And an address list of the wrong length is rejected.
	let err = Signature::concatenate(
		&singles,
		SignatureOrdering::ByAddressList(Vec::new()),
	)
	.unwrap_err();
	assert!(matches!(
		err,
		OneSigCoreError::AddressSignatureLengthMismatch { .. }
	));
}
