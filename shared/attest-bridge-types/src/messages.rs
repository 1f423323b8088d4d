use alloy_primitives::{Address, Bytes, Uint, B256, U256};
use serde::{Deserialize, Serialize};

/// Sequence number half of a versioned nonce.
pub type U240 = Uint<240, 4>;

/// A message relayed between domains by the cross-domain messenger.
///
/// `nonce` is a versioned nonce: its top 16 bits select the wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossDomainMessage {
    pub nonce: U256,
    pub sender: Address,
    pub target: Address,
    pub value: U256,
    pub gas_limit: U256,
    pub data: Bytes,
}

/// A deposit initiated on L1, later executed on L2 as a `0x7e` deposit transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDepositTransaction {
    pub from: Address,
    /// Ignored when `is_creation` is set.
    pub to: Address,
    pub is_creation: bool,
    pub value: U256,
    /// Amount of ETH minted on L2.
    pub mint: U256,
    pub gas_limit: u64,
    pub data: Bytes,
    /// L1 block that emitted the deposit event.
    pub l1_block_hash: B256,
    pub log_index: U256,
}
