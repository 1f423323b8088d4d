//! Per-signer replay nonces.
//!
//! Each identity owns one monotonically increasing counter. Updates to one identity are
//! serialized by the shard lock of the underlying map; different identities never contend on a
//! global lock.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use dashmap::{mapref::entry::Entry, DashMap};
use tracing::info;

use crate::errors::NonceError;

/// Notification emitted when an identity moves its own nonce forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NonceIncreased {
    pub identity: Address,
    pub old_nonce: U256,
    pub new_nonce: U256,
}

#[derive(Debug, Default)]
pub struct NonceLedger {
    nonces: DashMap<Address, U256>,
}

impl NonceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nonce of `identity`, 0 if it never signed anything.
    pub fn get_nonce(&self, identity: Address) -> U256 {
        self.nonces
            .get(&identity)
            .map(|nonce| *nonce)
            .unwrap_or(U256::ZERO)
    }

    /// Self-service bump: `caller` invalidates every request signed for a nonce below `new_nonce`.
    pub fn increase_nonce(
        &self,
        caller: Address,
        new_nonce: U256,
    ) -> Result<NonceIncreased, NonceError> {
        let old_nonce = self.update(caller, |current| {
            if new_nonce <= current {
                return Err(NonceError::InvalidNonce {
                    current,
                    attempted: new_nonce,
                });
            }
            Ok(new_nonce)
        })?;

        info!(identity = %caller, %old_nonce, %new_nonce, "nonce increased");
        Ok(NonceIncreased {
            identity: caller,
            old_nonce,
            new_nonce,
        })
    }

    /// Consume `expected` for `identity`, moving the counter to `expected + 1`.
    ///
    /// Fails if the counter moved since `expected` was read, so at most one user of a given nonce
    /// value ever succeeds. Returns the new nonce.
    pub(crate) fn advance(&self, identity: Address, expected: U256) -> Result<U256, NonceError> {
        let next = expected.checked_add(U256::from(1u64));
        self.update(identity, |current| match next {
            Some(next) if current == expected => Ok(next),
            _ => Err(NonceError::InvalidNonce {
                current,
                attempted: next.unwrap_or(U256::MAX),
            }),
        })
        .map(|_| expected + U256::from(1u64))
    }

    /// Undo an [`advance`](Self::advance) if nothing else touched the counter since.
    pub(crate) fn rollback(&self, identity: Address, from: U256, to: U256) -> bool {
        self.update(identity, |current| {
            if current == from {
                Ok(to)
            } else {
                Err(NonceError::InvalidNonce {
                    current,
                    attempted: to,
                })
            }
        })
        .is_ok()
    }

    /// Copy of every non-default counter, ordered by identity.
    pub fn snapshot(&self) -> BTreeMap<Address, U256> {
        self.nonces
            .iter()
            .filter(|entry| *entry.value() != U256::ZERO)
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }

    /// Atomically replace the counter of `identity` with `next(current)`, returning the old value.
    fn update(
        &self,
        identity: Address,
        next: impl FnOnce(U256) -> Result<U256, NonceError>,
    ) -> Result<U256, NonceError> {
        match self.nonces.entry(identity) {
            Entry::Occupied(mut entry) => {
                let current = *entry.get();
                let new = next(current)?;
                entry.insert(new);
                Ok(current)
            }
            Entry::Vacant(entry) => {
                let new = next(U256::ZERO)?;
                entry.insert(new);
                Ok(U256::ZERO)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ALICE: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    const BOB: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    #[test]
    fn test_unseen_identity_is_zero() {
        assert_eq!(NonceLedger::new().get_nonce(ALICE), U256::ZERO);
    }

    #[test]
    fn test_identities_are_isolated() {
        let ledger = NonceLedger::new();
        ledger.increase_nonce(ALICE, U256::from(100u64)).unwrap();
        ledger.increase_nonce(BOB, U256::from(200u64)).unwrap();
        assert_eq!(ledger.get_nonce(ALICE), U256::from(100u64));
        assert_eq!(ledger.get_nonce(BOB), U256::from(200u64));
    }

    #[test]
    fn test_increase_emits_old_and_new() {
        let ledger = NonceLedger::new();
        let event = ledger.increase_nonce(ALICE, U256::from(5u64)).unwrap();
        assert_eq!(
            event,
            NonceIncreased {
                identity: ALICE,
                old_nonce: U256::ZERO,
                new_nonce: U256::from(5u64),
            }
        );
        let event = ledger.increase_nonce(ALICE, U256::from(9u64)).unwrap();
        assert_eq!(event.old_nonce, U256::from(5u64));
    }

    #[test]
    fn test_rejects_equal_or_lower() {
        let ledger = NonceLedger::new();
        assert_eq!(
            ledger.increase_nonce(ALICE, U256::ZERO),
            Err(NonceError::InvalidNonce {
                current: U256::ZERO,
                attempted: U256::ZERO
            })
        );
        ledger.increase_nonce(ALICE, U256::from(10u64)).unwrap();
        assert!(ledger.increase_nonce(ALICE, U256::from(10u64)).is_err());
        assert!(ledger.increase_nonce(ALICE, U256::from(3u64)).is_err());
        assert_eq!(ledger.get_nonce(ALICE), U256::from(10u64));
        // A failed bump leaves no entry behind.
        assert!(ledger.increase_nonce(BOB, U256::ZERO).is_err());
        assert!(ledger.snapshot().get(&BOB).is_none());
    }

    #[test]
    fn test_advance_is_compare_and_swap() {
        let ledger = NonceLedger::new();
        assert_eq!(ledger.advance(ALICE, U256::ZERO), Ok(U256::from(1u64)));
        assert_eq!(
            ledger.advance(ALICE, U256::ZERO),
            Err(NonceError::InvalidNonce {
                current: U256::from(1u64),
                attempted: U256::from(1u64)
            })
        );
        assert!(ledger.rollback(ALICE, U256::from(1u64), U256::ZERO));
        assert_eq!(ledger.get_nonce(ALICE), U256::ZERO);
        assert!(!ledger.rollback(ALICE, U256::from(1u64), U256::ZERO));
    }

    #[test]
    fn test_advance_overflow() {
        let ledger = NonceLedger::new();
        ledger.increase_nonce(ALICE, U256::MAX).unwrap();
        assert!(ledger.advance(ALICE, U256::MAX).is_err());
        assert_eq!(ledger.get_nonce(ALICE), U256::MAX);
    }

    #[test]
    fn test_concurrent_advance_single_winner() {
        let ledger = NonceLedger::new();
        let winners = AtomicUsize::new(0);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    if ledger.advance(ALICE, U256::ZERO).is_ok() {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });
        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert_eq!(ledger.get_nonce(ALICE), U256::from(1u64));
    }

    proptest! {
        #[test]
        fn prop_increase_is_monotonic(steps in prop::collection::vec(any::<u64>(), 1..32)) {
            let ledger = NonceLedger::new();
            for step in steps {
                let current = ledger.get_nonce(ALICE);
                let attempted = U256::from(step);
                let result = ledger.increase_nonce(ALICE, attempted);
                if attempted > current {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(ledger.get_nonce(ALICE), attempted);
                } else {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(ledger.get_nonce(ALICE), current);
                }
            }
        }
    }
}
