//! Versioned nonces: `version (u16) << 240 | nonce (u240)` packed into one `uint256`.

use alloy_primitives::U256;
use attest_bridge_types::U240;

const VERSION_SHIFT: usize = 240;

/// Low 240 bits set.
const NONCE_MASK: U256 = U256::from_limbs([u64::MAX, u64::MAX, u64::MAX, 0x0000_ffff_ffff_ffff]);

/// Pack a sequence number and a message version into a single nonce.
pub fn encode_versioned_nonce(nonce: U240, version: u16) -> U256 {
    (U256::from(version) << VERSION_SHIFT) | U256::from_limbs(nonce.into_limbs())
}

/// Split a packed nonce into `(nonce, version)`.
pub fn decode_versioned_nonce(packed: U256) -> (U240, u16) {
    let version = (packed >> VERSION_SHIFT).to::<u16>();
    let nonce = U240::from_limbs((packed & NONCE_MASK).into_limbs());
    (nonce, version)
}

/// Version tag of a packed nonce.
pub fn version_of(packed: U256) -> u16 {
    decode_versioned_nonce(packed).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_u240() -> impl Strategy<Value = U240> {
        prop::array::uniform4(any::<u64>()).prop_map(|mut limbs| {
            limbs[3] &= 0x0000_ffff_ffff_ffff;
            U240::from_limbs(limbs)
        })
    }

    #[test]
    fn test_version_occupies_top_bits() {
        let packed = encode_versioned_nonce(U240::from(5u64), 1);
        let mut expected = [0u8; 32];
        expected[1] = 1;
        expected[31] = 5;
        assert_eq!(packed.to_be_bytes::<32>(), expected);
        assert_eq!(version_of(packed), 1);
    }

    #[test]
    fn test_extremes() {
        let packed = encode_versioned_nonce(U240::MAX, u16::MAX);
        assert_eq!(packed, U256::MAX);
        assert_eq!(decode_versioned_nonce(packed), (U240::MAX, u16::MAX));
        assert_eq!(decode_versioned_nonce(U256::ZERO), (U240::ZERO, 0));
    }

    proptest! {
        #[test]
        fn prop_round_trip(nonce in arb_u240(), version in any::<u16>()) {
            let packed = encode_versioned_nonce(nonce, version);
            prop_assert_eq!(decode_versioned_nonce(packed), (nonce, version));
        }
    }
}
