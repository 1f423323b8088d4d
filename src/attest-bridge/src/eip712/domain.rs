//! Domain separator: binds signatures to a protocol name, version, chain and verifying contract.

use alloy_primitives::{keccak256, Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::utils::bytes::{address_word, b256_word, encode_words, u256_word};

pub const EIP712_DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// EIP-5267 field bitmap: name, version, chainId and verifyingContract are set.
const DOMAIN_FIELDS: u8 = 0x0f;

/// Deployment parameters of a verifier domain, as read from config files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfig {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

/// EIP-5267 `eip712Domain()` view of a domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eip712DomainFields {
    pub fields: u8,
    pub name: String,
    pub version: String,
    pub chain_id: U256,
    pub verifying_contract: Address,
    pub salt: B256,
    pub extensions: Vec<U256>,
}

/// Compute a domain separator from scratch.
pub fn hash_domain(name: &str, version: &str, chain_id: u64, verifying_contract: Address) -> B256 {
    build_separator(
        keccak256(name.as_bytes()),
        keccak256(version.as_bytes()),
        chain_id,
        verifying_contract,
    )
}

fn build_separator(
    name_hash: B256,
    version_hash: B256,
    chain_id: u64,
    verifying_contract: Address,
) -> B256 {
    keccak256(encode_words(&[
        b256_word(keccak256(EIP712_DOMAIN_TYPE)),
        b256_word(name_hash),
        b256_word(version_hash),
        u256_word(U256::from(chain_id)),
        address_word(verifying_contract),
    ]))
}

/// Domain separator cached for the chain it was built on.
///
/// A different chain id (after a fork) yields a freshly computed separator instead of the cached
/// one, so signatures never replay across the two chains.
#[derive(Clone, Debug)]
pub struct DomainSeparator {
    name: String,
    version: String,
    name_hash: B256,
    version_hash: B256,
    verifying_contract: Address,
    cached_chain_id: u64,
    cached_separator: B256,
}

impl DomainSeparator {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        let name = name.into();
        let version = version.into();
        let name_hash = keccak256(name.as_bytes());
        let version_hash = keccak256(version.as_bytes());
        Self {
            cached_separator: build_separator(name_hash, version_hash, chain_id, verifying_contract),
            name,
            version,
            name_hash,
            version_hash,
            verifying_contract,
            cached_chain_id: chain_id,
        }
    }

    pub fn from_config(config: &DomainConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.version.clone(),
            config.chain_id,
            config.verifying_contract,
        )
    }

    /// Separator for `chain_id`, recomputed if it is not the chain this domain was built on.
    pub fn separator_for(&self, chain_id: u64) -> B256 {
        if chain_id == self.cached_chain_id {
            self.cached_separator
        } else {
            build_separator(self.name_hash, self.version_hash, chain_id, self.verifying_contract)
        }
    }

    pub fn separator(&self) -> B256 {
        self.cached_separator
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn verifying_contract(&self) -> Address {
        self.verifying_contract
    }

    pub fn cached_chain_id(&self) -> u64 {
        self.cached_chain_id
    }

    pub fn eip712_domain(&self, chain_id: u64) -> Eip712DomainFields {
        Eip712DomainFields {
            fields: DOMAIN_FIELDS,
            name: self.name.clone(),
            version: self.version.clone(),
            chain_id: U256::from(chain_id),
            verifying_contract: self.verifying_contract,
            salt: B256::ZERO,
            extensions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use alloy_sol_types::Eip712Domain;

    const CONTRACT: Address = address!("c0ffee254729296a45a3885639ac7e10f9d54979");

    fn reference(name: &str, version: &str, chain_id: u64, contract: Address) -> B256 {
        Eip712Domain::new(
            Some(name.to_owned().into()),
            Some(version.to_owned().into()),
            Some(U256::from(chain_id)),
            Some(contract),
            None,
        )
        .separator()
    }

    #[test]
    fn test_matches_reference_implementation() {
        let domain = DomainSeparator::new("EAS", "1.3.0", 1, CONTRACT);
        assert_eq!(domain.separator(), reference("EAS", "1.3.0", 1, CONTRACT));
        assert_eq!(domain.separator(), hash_domain("EAS", "1.3.0", 1, CONTRACT));
    }

    #[test]
    fn test_fork_recomputes() {
        let domain = DomainSeparator::new("EAS", "1.3.0", 1, CONTRACT);
        assert_eq!(domain.separator_for(1), domain.separator());
        let forked = domain.separator_for(10);
        assert_ne!(forked, domain.separator());
        assert_eq!(forked, reference("EAS", "1.3.0", 10, CONTRACT));
    }

    #[test]
    fn test_distinct_name_and_version() {
        let a = hash_domain("EAS", "1.3.0", 1, CONTRACT);
        assert_ne!(a, hash_domain("EAS", "1.2.0", 1, CONTRACT));
        assert_ne!(a, hash_domain("EAS2", "1.3.0", 1, CONTRACT));
        assert_ne!(a, hash_domain("EAS", "1.3.0", 1, Address::ZERO));
    }

    #[test]
    fn test_config_and_eip5267_view() {
        let config: DomainConfig = serde_json::from_str(
            r#"{"name":"EAS","version":"1.3.0","chainId":5,"verifyingContract":"0xc0ffee254729296a45a3885639ac7e10f9d54979"}"#,
        )
        .unwrap();
        let domain = DomainSeparator::from_config(&config);
        assert_eq!(domain.cached_chain_id(), 5);
        assert_eq!(domain.verifying_contract(), CONTRACT);

        let view = domain.eip712_domain(5);
        assert_eq!(view.fields, 0x0f);
        assert_eq!(view.name, "EAS");
        assert_eq!(view.version, "1.3.0");
        assert_eq!(view.chain_id, U256::from(5u64));
        assert_eq!(view.salt, B256::ZERO);
        assert!(view.extensions.is_empty());
    }
}
