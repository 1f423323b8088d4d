use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Errors during message encoding/decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Cross-domain message version other than 0 (legacy) or 1 (current).
    #[error("unsupported cross domain message version {0}")]
    UnsupportedVersion(u16),
    /// Protocol version tag with a version type other than 0.
    #[error("unsupported protocol version type {0}")]
    UnsupportedProtocolVersionType(u8),
    /// Protocol version tag with non-zero reserved bytes.
    #[error("protocol version reserved bytes must be zero")]
    ReservedBytesSet,
    /// A `utils::bytes` cursor read ran past the end of its input. The public codecs take
    /// fixed-size inputs and never return it.
    #[error("input truncated")]
    Truncated,
}

/// Errors from the nonce ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonceError {
    /// The attempted nonce is not strictly greater than the stored one.
    #[error("invalid nonce: {attempted} is not above current nonce {current}")]
    InvalidNonce { current: U256, attempted: U256 },
}

/// Errors from a static call into contract code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CallError {
    /// No contract code at the target (plain EOA).
    #[error("no contract code at {0}")]
    NoCode(Address),
    #[error("call to {0} reverted")]
    Reverted(Address),
    /// Calldata could not be decoded by the target.
    #[error("malformed call to {0}")]
    MalformedCall(Address),
}

/// Errors during delegated request verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifierError {
    #[error("deadline {deadline} expired at {now}")]
    DeadlineExpired { deadline: u64, now: u64 },
    /// Neither ECDSA recovery nor the ERC-1271 callback accepted the signature.
    #[error("invalid signature")]
    InvalidSignature,
    #[error(transparent)]
    Nonce(#[from] NonceError),
}
