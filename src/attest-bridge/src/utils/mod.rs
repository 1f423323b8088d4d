//! Shared utilities: fixed-width byte handling and secp256k1 helpers.

pub mod bytes;
pub mod crypto;
