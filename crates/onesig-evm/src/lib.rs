//! EVM leaf generation for OneSig commitments.
//!
//! Supplies the [`LeafGenerator`] for EVM target chains: 20 byte addresses
//! are left padded to the canonical 32, and call bundles are encoded as
//! Solidity `abi.encode(Call[])`, matching what the on-chain executor
//! decodes.

use alloy::primitives::Address;
use alloy::sol;
use alloy::sol_types::SolValue;
use onesig_core::{LeafData, LeafGenerator, TARGET_ADDRESS_LENGTH};

sol! {
	/// One call executed by the target OneSig account.
	#[derive(Debug, PartialEq, Eq)]
	struct Call {
		address to;
		uint256 value;
		bytes data;
	}
}

/// Leaf descriptor for an EVM target account.
pub type EvmLeafData = LeafData<Address, Call>;

/// [`LeafGenerator`] for EVM chains.
#[derive(Debug, Clone, Default)]
pub struct EvmLeafGenerator {
	leafs: Vec<EvmLeafData>,
}

impl EvmLeafGenerator {
	/// Wraps EVM leaf descriptors for tree building.
	pub fn new(leafs: Vec<EvmLeafData>) -> Self {
		Self { leafs }
	}
}

impl LeafGenerator for EvmLeafGenerator {
	type TargetAddress = Address;
	type Call = Call;

	fn leafs(&self) -> &[EvmLeafData] {
		&self.leafs
	}

	fn encode_address(&self, address: &Address) -> Vec<u8> {
		let mut padded = vec![0u8; TARGET_ADDRESS_LENGTH];
		padded[12..].copy_from_slice(address.as_slice());
		padded
	}

	fn encode_calls(&self, calls: &[Call]) -> Vec<u8> {
		calls.to_vec().abi_encode()
	}
}
