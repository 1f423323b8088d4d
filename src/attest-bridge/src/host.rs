//! Host collaborators the verifier depends on: time and contract code.
//!
//! Mirrors what an EVM execution environment provides (`block.timestamp`, `staticcall`) so the
//! verifier runs the same way on-chain, in a node, or inside tests.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};

use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::SolCall;
use dashmap::DashMap;

use crate::{errors::CallError, interfaces::IERC1271};

/// Source of the current time, in unix seconds.
pub trait Clock {
    fn now(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}

/// Manually driven clock for deterministic runs.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicU64,
}

impl FixedClock {
    pub fn new(now: u64) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: u64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Read-only calls into contract code (`staticcall`): bytes in, bytes out.
pub trait StaticCaller {
    fn static_call(&self, target: Address, calldata: &[u8]) -> Result<Bytes, CallError>;
}

impl<H: StaticCaller + ?Sized> StaticCaller for Arc<H> {
    fn static_call(&self, target: Address, calldata: &[u8]) -> Result<Bytes, CallError> {
        (**self).static_call(target, calldata)
    }
}

/// A world without contract code: every signer is an EOA.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoContracts;

impl StaticCaller for NoContracts {
    fn static_call(&self, target: Address, _calldata: &[u8]) -> Result<Bytes, CallError> {
        Err(CallError::NoCode(target))
    }
}

/// Contract-side ERC-1271 behaviour: return the magic value to accept `signature` for `hash`.
pub trait Erc1271: Send + Sync {
    fn is_valid_signature(&self, hash: B256, signature: &[u8]) -> [u8; 4];
}

impl<F> Erc1271 for F
where
    F: Fn(B256, &[u8]) -> [u8; 4] + Send + Sync,
{
    fn is_valid_signature(&self, hash: B256, signature: &[u8]) -> [u8; 4] {
        self(hash, signature)
    }
}

/// In-memory contract signers, reached through ABI-encoded `isValidSignature` calls.
#[derive(Default)]
pub struct ContractRegistry {
    contracts: DashMap<Address, Arc<dyn Erc1271>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy `contract` at `address`, replacing whatever was there.
    pub fn register(&self, address: Address, contract: Arc<dyn Erc1271>) {
        self.contracts.insert(address, contract);
    }

    pub fn remove(&self, address: Address) -> bool {
        self.contracts.remove(&address).is_some()
    }

    pub fn has_code(&self, address: Address) -> bool {
        self.contracts.contains_key(&address)
    }
}

impl StaticCaller for ContractRegistry {
    fn static_call(&self, target: Address, calldata: &[u8]) -> Result<Bytes, CallError> {
        // Clone the handle out so no shard lock is held while contract code runs.
        let contract = self
            .contracts
            .get(&target)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(CallError::NoCode(target))?;

        let call = IERC1271::isValidSignatureCall::abi_decode(calldata, true)
            .map_err(|_| CallError::MalformedCall(target))?;
        let magic = contract.is_valid_signature(call.hash, &call.signature);

        // bytes4 return value, left-aligned in a 32-byte word.
        let mut word = [0u8; 32];
        word[..4].copy_from_slice(&magic);
        Ok(Bytes::copy_from_slice(&word))
    }
}
