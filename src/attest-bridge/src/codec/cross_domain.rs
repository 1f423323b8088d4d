//! Cross-domain messenger payloads.
//!
//! Version 0 is the legacy `relayMessage(address,address,bytes,uint256)` call; version 1 is the
//! current `relayMessage(uint256,address,address,uint256,uint256,bytes)` call. The two are distinct
//! wire formats and are never interchangeable.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use attest_bridge_types::CrossDomainMessage;

use crate::{
    codec::versioned_nonce::version_of,
    errors::CodecError,
    interfaces::{ICrossDomainMessenger, ILegacyCrossDomainMessenger},
};

/// Encode a cross-domain message, choosing the format from the version bits of `nonce`.
pub fn encode_cross_domain_message(
    nonce: U256,
    sender: Address,
    target: Address,
    value: U256,
    gas_limit: U256,
    data: &[u8],
) -> Result<Bytes, CodecError> {
    match version_of(nonce) {
        0 => Ok(encode_cross_domain_message_v0(target, sender, data, nonce)),
        1 => Ok(encode_cross_domain_message_v1(
            nonce, sender, target, value, gas_limit, data,
        )),
        version => Err(CodecError::UnsupportedVersion(version)),
    }
}

/// Legacy (version 0) encoding. Value and gas limit are not part of this format.
pub fn encode_cross_domain_message_v0(
    target: Address,
    sender: Address,
    data: &[u8],
    nonce: U256,
) -> Bytes {
    ILegacyCrossDomainMessenger::relayMessageCall {
        _target: target,
        _sender: sender,
        _message: Bytes::copy_from_slice(data),
        _messageNonce: nonce,
    }
    .abi_encode()
    .into()
}

/// Current (version 1) encoding.
pub fn encode_cross_domain_message_v1(
    nonce: U256,
    sender: Address,
    target: Address,
    value: U256,
    gas_limit: U256,
    data: &[u8],
) -> Bytes {
    ICrossDomainMessenger::relayMessageCall {
        _nonce: nonce,
        _sender: sender,
        _target: target,
        _value: value,
        _minGasLimit: gas_limit,
        _message: Bytes::copy_from_slice(data),
    }
    .abi_encode()
    .into()
}

/// [`encode_cross_domain_message`] over a message record.
pub fn encode_message(message: &CrossDomainMessage) -> Result<Bytes, CodecError> {
    encode_cross_domain_message(
        message.nonce,
        message.sender,
        message.target,
        message.value,
        message.gas_limit,
        &message.data,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::versioned_nonce::encode_versioned_nonce;
    use crate::utils::bytes::{address_word, u256_word};
    use alloy_primitives::{address, hex};
    use attest_bridge_types::U240;

    const SENDER: Address = address!("1111111111111111111111111111111111111111");
    const TARGET: Address = address!("2222222222222222222222222222222222222222");

    fn padded(data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        out.resize(data.len().div_ceil(32) * 32, 0);
        out
    }

    #[test]
    fn test_v0_matches_legacy_layout() {
        let data = hex!("deadbeef");
        let nonce = encode_versioned_nonce(U240::from(42u64), 0);

        let mut expected = hex!("cbd4ece9").to_vec();
        expected.extend_from_slice(&address_word(TARGET));
        expected.extend_from_slice(&address_word(SENDER));
        expected.extend_from_slice(&u256_word(U256::from(0x80u64)));
        expected.extend_from_slice(&u256_word(nonce));
        expected.extend_from_slice(&u256_word(U256::from(data.len())));
        expected.extend_from_slice(&padded(&data));

        let encoded = encode_cross_domain_message(
            nonce,
            SENDER,
            TARGET,
            U256::from(7u64),
            U256::from(100_000u64),
            &data,
        )
        .unwrap();
        assert_eq!(encoded.as_ref(), expected.as_slice());
        assert_eq!(encoded, encode_cross_domain_message_v0(TARGET, SENDER, &data, nonce));
    }

    #[test]
    fn test_v1_matches_current_layout() {
        let data = [0xab; 33];
        let nonce = encode_versioned_nonce(U240::from(3u64), 1);
        let value = U256::from(1_000u64);
        let gas_limit = U256::from(200_000u64);

        let mut expected = hex!("d764ad0b").to_vec();
        expected.extend_from_slice(&u256_word(nonce));
        expected.extend_from_slice(&address_word(SENDER));
        expected.extend_from_slice(&address_word(TARGET));
        expected.extend_from_slice(&u256_word(value));
        expected.extend_from_slice(&u256_word(gas_limit));
        expected.extend_from_slice(&u256_word(U256::from(0xc0u64)));
        expected.extend_from_slice(&u256_word(U256::from(data.len())));
        expected.extend_from_slice(&padded(&data));

        let encoded =
            encode_cross_domain_message(nonce, SENDER, TARGET, value, gas_limit, &data).unwrap();
        assert_eq!(encoded.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_formats_differ_for_same_fields() {
        let v0 = encode_cross_domain_message_v0(TARGET, SENDER, b"", U256::ZERO);
        let v1 = encode_cross_domain_message_v1(U256::ZERO, SENDER, TARGET, U256::ZERO, U256::ZERO, b"");
        assert_ne!(v0[..4], v1[..4]);
    }

    #[test]
    fn test_unsupported_versions_rejected() {
        for version in [2u16, 3, u16::MAX] {
            let nonce = encode_versioned_nonce(U240::from(1u64), version);
            let err = encode_cross_domain_message(nonce, SENDER, TARGET, U256::ZERO, U256::ZERO, b"")
                .unwrap_err();
            assert_eq!(err, CodecError::UnsupportedVersion(version));
        }
    }

    #[test]
    fn test_encode_message_record() {
        let message = CrossDomainMessage {
            nonce: encode_versioned_nonce(U240::from(9u64), 1),
            sender: SENDER,
            target: TARGET,
            value: U256::from(1u64),
            gas_limit: U256::from(21_000u64),
            data: Bytes::from_static(b"hi"),
        };
        assert_eq!(
            encode_message(&message).unwrap(),
            encode_cross_domain_message_v1(
                message.nonce,
                SENDER,
                TARGET,
                message.value,
                message.gas_limit,
                b"hi"
            )
        );
    }
}
