//! Delegated attestation verification and cross-domain message codecs.
//!
//! Two independent halves:
//! - [`verifier`]: EIP-712 delegated attest/revoke verification for EOA (ECDSA) and contract
//!   (ERC-1271) signers, with per-signer replay-protection nonces.
//! - [`codec`]: pure encoders and hashes for versioned nonces, cross-domain messenger calls,
//!   deposit transactions and protocol version tags.
//!
//! The host environment (clock, contract calls) is abstracted in [`host`] so the same verifier
//! runs in a node, in tooling or in tests.

pub mod codec;
pub mod eip712;
pub mod errors;
pub mod host;
pub mod interfaces;
pub mod nonces;
pub mod signature;
pub mod utils;
pub mod verifier;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use attest_bridge_types as types;
pub use eip712::{DomainConfig, DomainSeparator, Eip712DomainFields};
pub use errors::{CallError, CodecError, NonceError, VerifierError};
pub use host::{Clock, ContractRegistry, Erc1271, FixedClock, NoContracts, StaticCaller, SystemClock};
pub use nonces::{NonceIncreased, NonceLedger};
pub use signature::SignerKind;
pub use verifier::{DelegatedVerifier, Verified};
