//! Outbound notification port.
//!
//! One trait per delivery concern, implemented per channel (push, email,
//! instant message). Every implementation is best-effort: the dispatcher
//! logs failures and discards them, and nothing on this side of the boundary
//! may affect a committed reservation.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a notification channel may report.
///
/// These never cross back into the reservation path; the dispatcher is the
/// only consumer and it only logs them.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// A single outbound delivery channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message to one recipient.
    ///
    /// `recipient` is channel-specific: a push token, an email address, or a
    /// messenger handle.
    async fn send(&self, recipient: &str, title: &str, body: &str) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_is_object_safe() {
        fn _accepts_dyn(_notifier: &dyn Notifier) {}
    }
}
