//! Deterministic encoders for cross-domain protocol messages.
//!
//! Every function here is pure and must agree byte-for-byte with the other implementations of
//! the protocol (Solidity libraries, op-node). Integers are unsigned and big-endian throughout.

pub mod cross_domain;
pub mod deposit;
pub mod hashing;
pub mod protocol_version;
pub mod versioned_nonce;

pub use cross_domain::{
    encode_cross_domain_message, encode_cross_domain_message_v0, encode_cross_domain_message_v1,
    encode_message,
};
pub use deposit::{encode_deposit_transaction, DEPOSIT_TX_TYPE};
pub use hashing::{
    hash_cross_domain_message, hash_cross_domain_message_v0, hash_cross_domain_message_v1,
    hash_deposit_source, hash_deposit_transaction,
};
pub use protocol_version::{decode_protocol_version, encode_protocol_version, ProtocolVersion};
pub use versioned_nonce::{decode_versioned_nonce, encode_versioned_nonce, version_of};
