//! Keyed exclusive locks for the engine's two shared counters.
//!
//! The moral equivalent of the row-level pessimistic locks the persistence
//! layer would take (`SELECT ... FOR UPDATE`): one async mutex per resource
//! id, acquired with a bounded wait. Callers that touch disjoint
//! (session, entitlement) pairs never contend; callers on the same resource
//! serialize; a caller that cannot get the lock in time fails with the
//! retryable `ContentionTimeout` instead of blocking indefinitely.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::timeout;
use uuid::Uuid;

use crate::domain::foundation::{LockedResource, ReservationError};

/// Exclusive access guard for one resource. Releases on drop, on every exit
/// path.
pub type ResourceGuard = OwnedMutexGuard<()>;

/// Registry of per-resource async mutexes with a bounded acquisition wait.
pub struct ResourceLocks {
    registry: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
    wait: Duration,
}

impl ResourceLocks {
    /// Creates a registry whose acquisitions give up after `wait`.
    pub fn new(wait: Duration) -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
            wait,
        }
    }

    /// Acquire the exclusive lock for `key`, waiting at most the configured
    /// bound.
    ///
    /// # Errors
    ///
    /// - `ContentionTimeout` naming `resource` if the wait bound expires; no
    ///   lock is held afterwards, so there is nothing to unwind
    pub async fn acquire(
        &self,
        key: Uuid,
        resource: LockedResource,
    ) -> Result<ResourceGuard, ReservationError> {
        let entry = {
            let mut registry = self.registry.lock().await;
            // Idle entries (held by nobody but the registry) are purged
            // opportunistically so the map tracks live contention only.
            registry.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(
                registry
                    .entry(key)
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };

        timeout(self.wait, entry.lock_owned())
            .await
            .map_err(|_| ReservationError::ContentionTimeout(resource))
    }
}
