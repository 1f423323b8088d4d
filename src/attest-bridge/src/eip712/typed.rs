//! Struct hashes and digests for delegated attestation and revocation requests.

use alloy_primitives::{keccak256, B256, U256};
use attest_bridge_types::{DelegatedAttestationRequest, DelegatedRevocationRequest};

use crate::utils::bytes::{address_word, b256_word, bool_word, encode_words, u256_word, u64_word};

pub const ATTEST_TYPE: &[u8] = b"Attest(address attester,bytes32 schema,address recipient,uint64 expirationTime,bool revocable,bytes32 refUID,bytes data,uint256 value,uint256 nonce,uint64 deadline)";

pub const REVOKE_TYPE: &[u8] = b"Revoke(address revoker,bytes32 schema,bytes32 uid,uint256 value,uint256 nonce,uint64 deadline)";

pub fn attest_type_hash() -> B256 {
    keccak256(ATTEST_TYPE)
}

pub fn revoke_type_hash() -> B256 {
    keccak256(REVOKE_TYPE)
}

/// Struct hash of an attestation request signed against `nonce`.
///
/// The payload is hashed so the typed message stays fixed-size. The signature is not part of it.
pub fn attest_struct_hash(request: &DelegatedAttestationRequest, nonce: U256) -> B256 {
    let data = &request.data;
    keccak256(encode_words(&[
        b256_word(attest_type_hash()),
        address_word(request.attester),
        b256_word(request.schema),
        address_word(data.recipient),
        u64_word(data.expiration_time),
        bool_word(data.revocable),
        b256_word(data.ref_uid),
        b256_word(keccak256(&data.data)),
        u256_word(data.value),
        u256_word(nonce),
        u64_word(request.deadline),
    ]))
}

pub fn revoke_struct_hash(request: &DelegatedRevocationRequest, nonce: U256) -> B256 {
    keccak256(encode_words(&[
        b256_word(revoke_type_hash()),
        address_word(request.revoker),
        b256_word(request.schema),
        b256_word(request.data.uid),
        u256_word(request.data.value),
        u256_word(nonce),
        u64_word(request.deadline),
    ]))
}

/// Final digest: `keccak256("\x19\x01" || domainSeparator || structHash)`.
pub fn typed_data_digest(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut buf = Vec::with_capacity(2 + 32 + 32);
    buf.extend_from_slice(b"\x19\x01");
    buf.extend_from_slice(domain_separator.as_slice());
    buf.extend_from_slice(struct_hash.as_slice());
    keccak256(buf)
}
