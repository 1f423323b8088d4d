//! EIP-712 typed structured data hashing for delegated requests.

pub mod domain;
pub mod typed;

pub use domain::{DomainConfig, DomainSeparator, Eip712DomainFields};
pub use typed::{
    attest_struct_hash, attest_type_hash, revoke_struct_hash, revoke_type_hash,
    typed_data_digest,
};
