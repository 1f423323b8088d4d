//! secp256k1 helpers: address recovery for EOA signers and signing for off-chain tooling.

use alloy_primitives::{keccak256, Address, B256};
use attest_bridge_types::Signature;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};

/// Recover an EOA address from a 32-byte digest and an `r || s || v` signature.
///
/// Notes:
/// - v is accepted in {27, 28} and, as a convenience for raw signers, {0, 1}.
/// - Upper-half `s` values are rejected, so a signature has a single valid encoding.
pub fn ecrecover_address(digest: B256, sig: &[u8; 65]) -> Option<Address> {
    let v = match sig[64] {
        27 | 28 => sig[64] - 27,
        0 | 1 => sig[64],
        _ => return None,
    };
    let signature = EcdsaSignature::from_slice(&sig[..64]).ok()?;
    if signature.normalize_s().is_some() {
        return None;
    }
    let recovery_id = RecoveryId::from_byte(v)?;
    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id).ok()?;
    Some(public_key_address(&key))
}

/// Ethereum address of a public key: the low 20 bytes of `keccak256(x || y)`.
pub fn public_key_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

pub fn signer_address(signing_key: &SigningKey) -> Address {
    public_key_address(signing_key.verifying_key())
}

/// Sign a typed-data digest, producing the `(v, r, s)` form delegated requests carry.
pub fn sign_digest(signing_key: &SigningKey, digest: B256) -> Result<Signature, k256::ecdsa::Error> {
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(digest.as_slice())?;
    let (r, s) = signature.split_bytes();
    Ok(Signature::Ecdsa {
        v: 27 + recovery_id.to_byte(),
        r: B256::from_slice(&r),
        s: B256::from_slice(&s),
    })
}
