use std::{fs, path::PathBuf};

use alloy_primitives::{Address, Bytes, B256, B64, U256};
use anyhow::{anyhow, Context, Result};
use attest_bridge::DomainConfig;
use attest_bridge_types::{CrossDomainMessage, UserDepositTransaction, U240};
use clap::{Args, Parser, Subcommand};

/// Reference encoder for differential testing.
///
/// Every subcommand prints its result as `0x`-prefixed hex on stdout (ABI-encoded where the
/// result is a value, raw where it is a byte string), or as JSON with `--json`. Logs go to
/// stderr and are controlled with `RUST_LOG`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Print a JSON object instead of hex.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack a nonce and a version into a versioned nonce.
    EncodeVersionedNonce {
        #[arg(long)]
        nonce: U240,
        #[arg(long)]
        version: u16,
    },
    /// Split a versioned nonce into `(nonce, version)`.
    DecodeVersionedNonce {
        #[arg(long)]
        versioned_nonce: U256,
    },
    /// Messenger calldata for a cross-domain message.
    EncodeCrossDomainMessage(MessageArgs),
    HashCrossDomainMessage(MessageArgs),
    /// `0x7e` typed deposit transaction.
    EncodeDepositTransaction(DepositArgs),
    HashDepositTransaction(DepositArgs),
    HashDepositSource {
        #[arg(long)]
        l1_block_hash: B256,
        #[arg(long)]
        log_index: U256,
    },
    EncodeProtocolVersion {
        /// 8-byte build identifier, hex.
        #[arg(long, default_value = "0x0000000000000000")]
        build: B64,
        #[arg(long)]
        major: u32,
        #[arg(long)]
        minor: u32,
        #[arg(long)]
        patch: u32,
        #[arg(long, default_value_t = 0)]
        pre_release: u32,
    },
    DecodeProtocolVersion {
        #[arg(long)]
        tag: B256,
    },
    DomainSeparator(DomainArgs),
    /// Digest an attester signs for a delegated attestation request.
    AttestDigest(DigestArgs),
    /// Digest a revoker signs for a delegated revocation request.
    RevokeDigest(DigestArgs),
}

#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Versioned nonce; its top 16 bits select the encoding.
    #[arg(long)]
    pub nonce: U256,
    #[arg(long)]
    pub sender: Address,
    #[arg(long)]
    pub target: Address,
    #[arg(long, default_value = "0")]
    pub value: U256,
    #[arg(long, default_value = "0")]
    pub gas_limit: U256,
    #[arg(long, default_value = "0x")]
    pub data: Bytes,
}

impl MessageArgs {
    pub fn to_message(&self) -> CrossDomainMessage {
        CrossDomainMessage {
            nonce: self.nonce,
            sender: self.sender,
            target: self.target,
            value: self.value,
            gas_limit: self.gas_limit,
            data: self.data.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct DepositArgs {
    #[arg(long)]
    pub from: Address,
    /// Recipient; omit for a contract creation.
    #[arg(long)]
    pub to: Option<Address>,
    #[arg(long, default_value = "0")]
    pub value: U256,
    #[arg(long, default_value = "0")]
    pub mint: U256,
    #[arg(long)]
    pub gas_limit: u64,
    #[arg(long, default_value = "0x")]
    pub data: Bytes,
    #[arg(long)]
    pub l1_block_hash: B256,
    #[arg(long)]
    pub log_index: U256,
}

impl DepositArgs {
    pub fn to_transaction(&self) -> UserDepositTransaction {
        UserDepositTransaction {
            from: self.from,
            to: self.to.unwrap_or(Address::ZERO),
            is_creation: self.to.is_none(),
            value: self.value,
            mint: self.mint,
            gas_limit: self.gas_limit,
            data: self.data.clone(),
            l1_block_hash: self.l1_block_hash,
            log_index: self.log_index,
        }
    }
}

/// Verifier domain, from a JSON file or from individual flags.
///
/// A `--domain` file takes precedence over the flags.
#[derive(Args, Debug)]
pub struct DomainArgs {
    /// JSON file with `name`, `version`, `chainId` and `verifyingContract`.
    #[arg(long, env = "ATTEST_DOMAIN_FILE")]
    pub domain: Option<PathBuf>,

    #[arg(long, env = "ATTEST_DOMAIN_NAME")]
    pub name: Option<String>,

    #[arg(long = "domain-version", env = "ATTEST_DOMAIN_VERSION")]
    pub domain_version: Option<String>,

    #[arg(long, env = "ATTEST_CHAIN_ID")]
    pub chain_id: Option<u64>,

    #[arg(long, env = "ATTEST_VERIFYING_CONTRACT")]
    pub verifying_contract: Option<Address>,
}

impl DomainArgs {
    pub fn resolve(&self) -> Result<DomainConfig> {
        if let Some(ref path) = self.domain {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("failed parsing domain JSON in {}", path.display()));
        }

        let missing = |flag: &str| anyhow!("missing domain parameter: provide --domain or --{flag}");
        Ok(DomainConfig {
            name: self.name.clone().ok_or_else(|| missing("name"))?,
            version: self
                .domain_version
                .clone()
                .ok_or_else(|| missing("domain-version"))?,
            chain_id: self.chain_id.ok_or_else(|| missing("chain-id"))?,
            verifying_contract: self
                .verifying_contract
                .ok_or_else(|| missing("verifying-contract"))?,
        })
    }
}

#[derive(Args, Debug)]
pub struct DigestArgs {
    #[command(flatten)]
    pub domain: DomainArgs,

    /// JSON file holding the delegated request.
    #[arg(long)]
    pub request: PathBuf,

    /// Nonce to sign against.
    #[arg(long, default_value = "0")]
    pub nonce: U256,
}

impl DigestArgs {
    pub fn read_request<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        let raw = fs::read_to_string(&self.request)
            .with_context(|| format!("failed reading {}", self.request.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed parsing request JSON in {}", self.request.display()))
    }
}
