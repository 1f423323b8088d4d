//! Hashes over encoded messages, as used for replay tracking and deposit derivation.

use alloy_primitives::{keccak256, Address, B256, U256};
use attest_bridge_types::UserDepositTransaction;

use crate::{
    codec::{
        cross_domain::{
            encode_cross_domain_message, encode_cross_domain_message_v0,
            encode_cross_domain_message_v1,
        },
        deposit::encode_deposit_transaction,
    },
    errors::CodecError,
    utils::bytes::{b256_word, encode_words, u256_word},
};

/// Source hash domain of user deposits.
const USER_DEPOSIT_SOURCE_DOMAIN: [u8; 32] = [0u8; 32];

pub fn hash_cross_domain_message(
    nonce: U256,
    sender: Address,
    target: Address,
    value: U256,
    gas_limit: U256,
    data: &[u8],
) -> Result<B256, CodecError> {
    encode_cross_domain_message(nonce, sender, target, value, gas_limit, data).map(keccak256)
}

pub fn hash_cross_domain_message_v0(
    target: Address,
    sender: Address,
    data: &[u8],
    nonce: U256,
) -> B256 {
    keccak256(encode_cross_domain_message_v0(target, sender, data, nonce))
}

pub fn hash_cross_domain_message_v1(
    nonce: U256,
    sender: Address,
    target: Address,
    value: U256,
    gas_limit: U256,
    data: &[u8],
) -> B256 {
    keccak256(encode_cross_domain_message_v1(
        nonce, sender, target, value, gas_limit, data,
    ))
}

/// Source hash of a user deposit:
/// `keccak256(bytes32(0) || keccak256(l1BlockHash || logIndex))`.
pub fn hash_deposit_source(l1_block_hash: B256, log_index: U256) -> B256 {
    let deposit_id = keccak256(encode_words(&[b256_word(l1_block_hash), u256_word(log_index)]));
    keccak256(encode_words(&[USER_DEPOSIT_SOURCE_DOMAIN, deposit_id.0]))
}

/// Hash of the L2 deposit transaction, i.e. its transaction hash.
pub fn hash_deposit_transaction(tx: &UserDepositTransaction) -> B256 {
    keccak256(encode_deposit_transaction(tx))
}
