use alloy_primitives::{Bytes, B256, U256};
use alloy_sol_types::SolValue;
use anyhow::{Context, Result};
use attest_bridge::{
    codec::{
        decode_protocol_version, decode_versioned_nonce, encode_deposit_transaction,
        encode_message, encode_protocol_version, encode_versioned_nonce, hash_cross_domain_message,
        hash_deposit_source, hash_deposit_transaction,
    },
    eip712::{attest_struct_hash, revoke_struct_hash, typed_data_digest},
    DomainSeparator,
};
use attest_bridge_types::{DelegatedAttestationRequest, DelegatedRevocationRequest};
use serde_json::{json, Value};
use tracing::debug;

use crate::cli::{Command, DigestArgs};

/// Result of a subcommand in both output forms.
#[derive(Debug)]
pub struct Output {
    /// Printed as hex.
    pub encoded: Bytes,
    /// Printed with `--json`.
    pub json: Value,
}

impl Output {
    fn word(value: B256) -> Self {
        Self {
            encoded: Bytes::copy_from_slice(value.as_slice()),
            json: json!(value),
        }
    }

    fn raw(bytes: Bytes) -> Self {
        Self {
            json: json!(bytes),
            encoded: bytes,
        }
    }
}

pub fn run(command: &Command) -> Result<Output> {
    debug!(?command, "running");
    let output = match command {
        Command::EncodeVersionedNonce { nonce, version } => {
            let packed = encode_versioned_nonce(*nonce, *version);
            Output {
                encoded: packed.abi_encode().into(),
                json: json!(packed),
            }
        }
        Command::DecodeVersionedNonce { versioned_nonce } => {
            let (nonce, version) = decode_versioned_nonce(*versioned_nonce);
            let nonce = U256::from_limbs(nonce.into_limbs());
            Output {
                encoded: (nonce, U256::from(version)).abi_encode().into(),
                json: json!({ "nonce": nonce, "version": version }),
            }
        }
        Command::EncodeCrossDomainMessage(args) => {
            Output::raw(encode_message(&args.to_message()).context("encoding message")?)
        }
        Command::HashCrossDomainMessage(args) => {
            let message = args.to_message();
            Output::word(
                hash_cross_domain_message(
                    message.nonce,
                    message.sender,
                    message.target,
                    message.value,
                    message.gas_limit,
                    &message.data,
                )
                .context("hashing message")?,
            )
        }
        Command::EncodeDepositTransaction(args) => {
            Output::raw(encode_deposit_transaction(&args.to_transaction()))
        }
        Command::HashDepositTransaction(args) => {
            Output::word(hash_deposit_transaction(&args.to_transaction()))
        }
        Command::HashDepositSource {
            l1_block_hash,
            log_index,
        } => Output::word(hash_deposit_source(*l1_block_hash, *log_index)),
        Command::EncodeProtocolVersion {
            build,
            major,
            minor,
            patch,
            pre_release,
        } => Output::word(encode_protocol_version(
            build.0,
            *major,
            *minor,
            *patch,
            *pre_release,
        )),
        Command::DecodeProtocolVersion { tag } => {
            let rendered = decode_protocol_version(*tag).context("decoding protocol version")?;
            Output {
                encoded: rendered.abi_encode().into(),
                json: json!(rendered),
            }
        }
        Command::DomainSeparator(args) => {
            let config = args.resolve()?;
            Output::word(DomainSeparator::from_config(&config).separator())
        }
        Command::AttestDigest(args) => {
            let request: DelegatedAttestationRequest = args.read_request()?;
            digest(args, attest_struct_hash(&request, args.nonce))?
        }
        Command::RevokeDigest(args) => {
            let request: DelegatedRevocationRequest = args.read_request()?;
            digest(args, revoke_struct_hash(&request, args.nonce))?
        }
    };
    Ok(output)
}

fn digest(args: &DigestArgs, struct_hash: B256) -> Result<Output> {
    let config = args.domain.resolve()?;
    let separator = DomainSeparator::from_config(&config).separator();
    Ok(Output::word(typed_data_digest(separator, struct_hash)))
}
