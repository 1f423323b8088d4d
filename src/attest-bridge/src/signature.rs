//! Dual-mode signature validation: ECDSA recovery first, ERC-1271 callback as the fallback.

use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::SolCall;
use tracing::debug;

use crate::{
    host::StaticCaller,
    interfaces::{IERC1271, ERC1271_MAGIC_VALUE},
    utils::crypto::ecrecover_address,
};

/// Which validation path accepted a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignerKind {
    /// Externally-owned account, validated by public key recovery.
    Ecdsa,
    /// Contract account, validated through `isValidSignature`.
    Contract,
}

/// Whether `signature` is valid for `signer` over `digest` right now.
///
/// 65-byte signatures are tried as ECDSA first. Anything that does not recover to `signer` is
/// handed to `signer` as an ERC-1271 contract.
pub fn check_signature<H: StaticCaller + ?Sized>(
    host: &H,
    signer: Address,
    digest: B256,
    signature: &[u8],
) -> Option<SignerKind> {
    if let Ok(packed) = <&[u8; 65]>::try_from(signature) {
        if ecrecover_address(digest, packed) == Some(signer) {
            return Some(SignerKind::Ecdsa);
        }
    }
    is_valid_erc1271_signature(host, signer, digest, signature).then_some(SignerKind::Contract)
}

/// Static-call `isValidSignature(digest, signature)` on `signer`.
///
/// Accepts only a well-formed return word carrying the magic value. Reverts, missing code and
/// short return data all count as rejection.
pub fn is_valid_erc1271_signature<H: StaticCaller + ?Sized>(
    host: &H,
    signer: Address,
    digest: B256,
    signature: &[u8],
) -> bool {
    let call = IERC1271::isValidSignatureCall {
        hash: digest,
        signature: Bytes::copy_from_slice(signature),
    };
    match host.static_call(signer, &call.abi_encode()) {
        Ok(out) => {
            out.len() >= 32
                && out[..4] == ERC1271_MAGIC_VALUE
                && out[4..32].iter().all(|b| *b == 0)
        }
        Err(err) => {
            debug!(%signer, %err, "erc1271 validation call failed");
            false
        }
    }
}
