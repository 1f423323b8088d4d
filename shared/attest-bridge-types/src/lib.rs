//! Shared records for the attest-bridge verifier, codec and tooling.
//!
//! These are plain data: no hashing, no encoding. The core library and the
//! differential CLI both build on them so the two never drift apart.

pub mod messages;
pub mod requests;

pub use messages::{CrossDomainMessage, UserDepositTransaction, U240};
pub use requests::{
    AttestationRequestData, DelegatedAttestationRequest, DelegatedRevocationRequest,
    RevocationRequestData, Signature,
};
