//! OP-stack deposit transactions (EIP-2718 type `0x7e`).
//!
//! Layout: `0x7e || rlp([sourceHash, from, to, mint, value, gas, isSystemTx, data])`.

use alloy_primitives::Bytes;
use alloy_rlp::{Encodable, Header, EMPTY_STRING_CODE};
use attest_bridge_types::UserDepositTransaction;

use crate::codec::hashing::hash_deposit_source;

/// EIP-2718 transaction type of deposit transactions.
pub const DEPOSIT_TX_TYPE: u8 = 0x7e;

/// Encode a user deposit as the L2 deposit transaction it derives.
pub fn encode_deposit_transaction(tx: &UserDepositTransaction) -> Bytes {
    let source_hash = hash_deposit_source(tx.l1_block_hash, tx.log_index);

    let mut payload = Vec::new();
    source_hash.encode(&mut payload);
    tx.from.encode(&mut payload);
    // Contract creations carry an empty `to`.
    if tx.is_creation {
        payload.push(EMPTY_STRING_CODE);
    } else {
        tx.to.encode(&mut payload);
    }
    tx.mint.encode(&mut payload);
    tx.value.encode(&mut payload);
    tx.gas_limit.encode(&mut payload);
    // User deposits are never system transactions.
    false.encode(&mut payload);
    tx.data.encode(&mut payload);

    let header = Header {
        list: true,
        payload_length: payload.len(),
    };
    let mut out = Vec::with_capacity(1 + header.length() + payload.len());
    out.push(DEPOSIT_TX_TYPE);
    header.encode(&mut out);
    out.extend_from_slice(&payload);
    out.into()
}
