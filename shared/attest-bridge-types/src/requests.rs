use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Signature attached to a delegated request.
///
/// `Ecdsa` is the classic `(v, r, s)` triple of an EOA. `Raw` carries an arbitrary blob that only a
/// contract signer (ERC-1271) can interpret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Signature {
    Ecdsa { v: u8, r: B256, s: B256 },
    Raw(Bytes),
}

impl Signature {
    /// Bytes handed to the validation pipeline: `r || s || v` for ECDSA, the blob as-is otherwise.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Signature::Ecdsa { v, r, s } => {
                let mut buf = Vec::with_capacity(65);
                buf.extend_from_slice(r.as_slice());
                buf.extend_from_slice(s.as_slice());
                buf.push(*v);
                Bytes::from(buf)
            }
            Signature::Raw(bytes) => bytes.clone(),
        }
    }
}

/// Attestation payload signed by the attester.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationRequestData {
    pub recipient: Address,
    /// Unix timestamp, 0 for no expiration.
    pub expiration_time: u64,
    pub revocable: bool,
    /// UID of a related attestation, zero if none.
    pub ref_uid: B256,
    /// Opaque schema-encoded payload. Only its keccak-256 hash is signed.
    pub data: Bytes,
    pub value: U256,
}

/// An attestation request signed off-chain and submitted by a third party.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegatedAttestationRequest {
    pub schema: B256,
    pub data: AttestationRequestData,
    pub signature: Signature,
    pub attester: Address,
    /// Unix timestamp after which the signature is no longer accepted.
    pub deadline: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevocationRequestData {
    pub uid: B256,
    pub value: U256,
}

/// A revocation request signed off-chain by the original attester.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegatedRevocationRequest {
    pub schema: B256,
    pub data: RevocationRequestData,
    pub signature: Signature,
    pub revoker: Address,
    pub deadline: u64,
}
