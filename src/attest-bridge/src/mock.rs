//! Test doubles for contract signers.

use alloy_primitives::{Bytes, B256};
use dashmap::DashMap;

use crate::{host::Erc1271, interfaces::ERC1271_MAGIC_VALUE};

/// Returned for every signature the wallet does not recognise.
pub const INVALID_SIGNATURE_VALUE: [u8; 4] = [0xff; 4];

/// ERC-1271 wallet that accepts exactly the signature registered for each digest.
#[derive(Debug, Default)]
pub struct MockSignatureWallet {
    signatures: DashMap<B256, Bytes>,
}

impl MockSignatureWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, digest: B256, signature: Bytes) {
        self.signatures.insert(digest, signature);
    }
}

impl Erc1271 for MockSignatureWallet {
    fn is_valid_signature(&self, hash: B256, signature: &[u8]) -> [u8; 4] {
        match self.signatures.get(&hash) {
            Some(expected) if expected.as_ref() == signature => ERC1271_MAGIC_VALUE,
            _ => INVALID_SIGNATURE_VALUE,
        }
    }
}
