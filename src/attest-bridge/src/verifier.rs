//! Delegated request verification.
//!
//! A delegated request is signed off-chain by the attester (or revoker) and submitted by anyone.
//! Verification binds the signature to this deployment (domain separator), to the exact request
//! fields, and to the signer's current nonce, then consumes that nonce.
//!
//! Design notes:
//! - The nonce is read when the struct hash is built and consumed with a compare-and-swap after
//!   the signature check returns. A contract signer's callback therefore cannot replay the same
//!   nonce from inside the check, and concurrent submissions for one signer have one winner.
//! - Consuming a nonce (`+1`) and the signer's own `increase_nonce` (any larger value) are
//!   separate paths.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use alloy_primitives::{Address, B256, U256};
use attest_bridge_types::{DelegatedAttestationRequest, DelegatedRevocationRequest, Signature};
use tracing::{debug, warn};

use crate::{
    eip712::{
        domain::{DomainSeparator, Eip712DomainFields},
        typed::{
            attest_struct_hash, attest_type_hash, revoke_struct_hash, revoke_type_hash,
            typed_data_digest,
        },
    },
    errors::{NonceError, VerifierError},
    host::{Clock, StaticCaller},
    nonces::{NonceIncreased, NonceLedger},
    signature::{check_signature, SignerKind},
};

/// Outcome of a successful verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verified {
    pub signer: Address,
    /// The nonce the request was signed against (now consumed).
    pub nonce: U256,
    pub digest: B256,
    pub kind: SignerKind,
}

pub struct DelegatedVerifier<C, H> {
    domain: DomainSeparator,
    chain_id: AtomicU64,
    nonces: Arc<NonceLedger>,
    clock: C,
    host: H,
}

impl<C: Clock, H: StaticCaller> DelegatedVerifier<C, H> {
    pub fn new(domain: DomainSeparator, clock: C, host: H) -> Self {
        Self::with_ledger(domain, Arc::new(NonceLedger::new()), clock, host)
    }

    /// Verifier sharing an existing nonce ledger.
    pub fn with_ledger(
        domain: DomainSeparator,
        nonces: Arc<NonceLedger>,
        clock: C,
        host: H,
    ) -> Self {
        Self {
            chain_id: AtomicU64::new(domain.cached_chain_id()),
            domain,
            nonces,
            clock,
            host,
        }
    }

    pub fn get_name(&self) -> &str {
        self.domain.name()
    }

    pub fn get_domain_separator(&self) -> B256 {
        self.domain.separator_for(self.chain_id())
    }

    pub fn eip712_domain(&self) -> Eip712DomainFields {
        self.domain.eip712_domain(self.chain_id())
    }

    pub fn get_attest_type_hash(&self) -> B256 {
        attest_type_hash()
    }

    pub fn get_revoke_type_hash(&self) -> B256 {
        revoke_type_hash()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id.load(Ordering::SeqCst)
    }

    /// Follow the hosting chain to a new chain id (e.g. after a fork). Signatures made for the old
    /// chain stop verifying.
    pub fn set_chain_id(&self, chain_id: u64) {
        let previous = self.chain_id.swap(chain_id, Ordering::SeqCst);
        if previous != chain_id {
            warn!(previous, chain_id, "chain id changed, domain separator recomputed");
        }
    }

    pub fn nonces(&self) -> &Arc<NonceLedger> {
        &self.nonces
    }

    pub fn get_nonce(&self, signer: Address) -> U256 {
        self.nonces.get_nonce(signer)
    }

    pub fn increase_nonce(
        &self,
        caller: Address,
        new_nonce: U256,
    ) -> Result<NonceIncreased, NonceError> {
        self.nonces.increase_nonce(caller, new_nonce)
    }

    /// Digest the attester signs for `request` at `nonce`.
    pub fn attest_digest(&self, request: &DelegatedAttestationRequest, nonce: U256) -> B256 {
        typed_data_digest(self.get_domain_separator(), attest_struct_hash(request, nonce))
    }

    /// Digest the revoker signs for `request` at `nonce`.
    pub fn revoke_digest(&self, request: &DelegatedRevocationRequest, nonce: U256) -> B256 {
        typed_data_digest(self.get_domain_separator(), revoke_struct_hash(request, nonce))
    }

    pub fn verify_attest(
        &self,
        request: &DelegatedAttestationRequest,
    ) -> Result<Verified, VerifierError> {
        self.verify(
            request.attester,
            request.deadline,
            &request.signature,
            |nonce| attest_struct_hash(request, nonce),
        )
    }

    pub fn verify_revoke(
        &self,
        request: &DelegatedRevocationRequest,
    ) -> Result<Verified, VerifierError> {
        self.verify(
            request.revoker,
            request.deadline,
            &request.signature,
            |nonce| revoke_struct_hash(request, nonce),
        )
    }

    /// Verify requests in order; each sees the nonces left by the ones before it.
    ///
    /// All-or-nothing: if one fails, nonces consumed earlier in the batch are restored.
    pub fn verify_attest_batch(
        &self,
        requests: &[DelegatedAttestationRequest],
    ) -> Result<Vec<Verified>, VerifierError> {
        self.verify_all(requests, |request| self.verify_attest(request))
    }

    pub fn verify_revoke_batch(
        &self,
        requests: &[DelegatedRevocationRequest],
    ) -> Result<Vec<Verified>, VerifierError> {
        self.verify_all(requests, |request| self.verify_revoke(request))
    }

    fn verify(
        &self,
        signer: Address,
        deadline: u64,
        signature: &Signature,
        struct_hash: impl FnOnce(U256) -> B256,
    ) -> Result<Verified, VerifierError> {
        let now = self.clock.now();
        if deadline < now {
            warn!(%signer, deadline, now, "delegated request expired");
            return Err(VerifierError::DeadlineExpired { deadline, now });
        }

        let nonce = self.nonces.get_nonce(signer);
        let digest = typed_data_digest(self.get_domain_separator(), struct_hash(nonce));

        let kind = check_signature(&self.host, signer, digest, &signature.to_bytes())
            .ok_or_else(|| {
                warn!(%signer, %nonce, %digest, "invalid delegated signature");
                VerifierError::InvalidSignature
            })?;

        // Last step, after any contract callback has returned.
        self.nonces.advance(signer, nonce).map_err(|err| {
            warn!(%signer, %nonce, %err, "nonce consumed concurrently");
            VerifierError::from(err)
        })?;

        debug!(%signer, %nonce, ?kind, "delegated request verified");
        Ok(Verified {
            signer,
            nonce,
            digest,
            kind,
        })
    }

    fn verify_all<R>(
        &self,
        requests: &[R],
        verify_one: impl Fn(&R) -> Result<Verified, VerifierError>,
    ) -> Result<Vec<Verified>, VerifierError> {
        let mut verified = Vec::with_capacity(requests.len());
        for (index, request) in requests.iter().enumerate() {
            match verify_one(request) {
                Ok(outcome) => verified.push(outcome),
                Err(err) => {
                    debug!(index, %err, "batch rejected, restoring nonces");
                    self.restore(&verified);
                    return Err(err);
                }
            }
        }
        Ok(verified)
    }

    fn restore(&self, verified: &[Verified]) {
        for outcome in verified.iter().rev() {
            let consumed = outcome.nonce + U256::from(1u64);
            if !self.nonces.rollback(outcome.signer, consumed, outcome.nonce) {
                warn!(signer = %outcome.signer, "nonce moved during batch, not restored");
            }
        }
    }
}
