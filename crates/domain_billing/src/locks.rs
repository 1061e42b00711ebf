//! Per-entity write serialization
//!
//! The invoice and payment flows are multi-step read-modify-write sequences
//! over several documents (counterparty, products, invoice/payment record).
//! Concurrent requests touching the same entity would otherwise interleave
//! those steps and lose updates, so each logical operation takes an async
//! mutex per entity it writes before reading anything.
//!
//! Locks are acquired in sorted key order so two operations over
//! overlapping entity sets cannot deadlock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use core_kernel::{PartyId, ProductId};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Identifies the entity a lock serializes writes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LockKey {
    Party(PartyId),
    Product(ProductId),
}

/// Registry of per-entity async mutexes
///
/// Handles are created on first use and never evicted; the map grows with
/// the set of entities ever written, which is bounded by the catalogue size.
#[derive(Debug, Default)]
pub struct EntityLockRegistry {
    locks: Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>,
}

impl EntityLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, key: LockKey) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(key).or_default().clone()
    }

    /// Locks a single entity
    pub async fn acquire(&self, key: LockKey) -> OwnedMutexGuard<()> {
        self.handle(key).lock_owned().await
    }

    /// Locks a set of entities in sorted, deduplicated order
    pub async fn acquire_many(&self, mut keys: Vec<LockKey>) -> Vec<OwnedMutexGuard<()>> {
        keys.sort_unstable();
        keys.dedup();

        let mut guards = Vec::with_capacity(keys.len());
        for key in keys {
            guards.push(self.acquire(key).await);
        }
        guards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_keys_are_locked_once() {
        let registry = EntityLockRegistry::new();
        let party = PartyId::new();

        // Would deadlock if the duplicate key were locked twice.
        let guards = registry
            .acquire_many(vec![LockKey::Party(party), LockKey::Party(party)])
            .await;
        assert_eq!(guards.len(), 1);
    }

    #[tokio::test]
    async fn contended_lock_serializes_waiters() {
        let registry = Arc::new(EntityLockRegistry::new());
        let key = LockKey::Product(ProductId::new());

        let guard = registry.acquire(key).await;
        let contender = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.acquire(key).await })
        };

        assert!(!contender.is_finished());
        drop(guard);
        contender.await.expect("contender completes");
    }
}
