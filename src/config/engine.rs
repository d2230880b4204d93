//! Reservation engine tuning knobs

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Engine configuration: lock waits and notification dispatch sizing
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// How long a reservation waits for a contended lock, in milliseconds
    #[serde(default = "default_lock_wait_ms")]
    pub lock_wait_ms: u64,

    /// Number of notification dispatch workers
    #[serde(default = "default_notify_workers")]
    pub notify_workers: usize,

    /// Depth of the outbound notification queue
    #[serde(default = "default_notify_queue_depth")]
    pub notify_queue_depth: usize,
}

impl EngineConfig {
    /// Get lock wait as Duration
    pub fn lock_wait(&self) -> Duration {
        Duration::from_millis(self.lock_wait_ms)
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lock_wait_ms == 0 {
            return Err(ValidationError::InvalidLockWait);
        }
        if self.notify_workers == 0 {
            return Err(ValidationError::InvalidWorkerCount);
        }
        if self.notify_queue_depth == 0 {
            return Err(ValidationError::InvalidQueueDepth);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_wait_ms: default_lock_wait_ms(),
            notify_workers: default_notify_workers(),
            notify_queue_depth: default_notify_queue_depth(),
        }
    }
}

fn default_lock_wait_ms() -> u64 {
    3000
}

fn default_notify_workers() -> usize {
    4
}

fn default_notify_queue_depth() -> usize {
    256
}
