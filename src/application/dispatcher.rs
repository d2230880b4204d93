//! Fire-and-forget notification dispatch.
//!
//! The coordinator enqueues outbound messages here after commit and never
//! awaits delivery. A bounded queue feeds a fixed pool of workers so a slow
//! or failing delivery channel can neither stall nor fail a reservation;
//! when the queue is full the message is dropped with a warning, which is
//! the contract — notification is a best-effort side effect outside the
//! consistency boundary.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ports::Notifier;

/// A rendered message bound for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundNotification {
    /// Channel-specific recipient: push token, email address, or handle.
    pub recipient: String,
    pub title: String,
    pub body: String,
}

/// Message template with `#{name}` placeholders.
///
/// The same replacement scheme the product's operator-editable templates
/// use, so bodies stay data rather than format strings.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    template: String,
}

impl MessageTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the template, replacing each `#{key}` with its value.
    /// Unknown placeholders are left verbatim.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = self.template.clone();
        for (key, value) in vars {
            out = out.replace(&format!("#{{{}}}", key), value);
        }
        out
    }
}

/// Bounded worker pool draining the outbound queue.
pub struct NotificationDispatcher {
    tx: mpsc::Sender<OutboundNotification>,
    workers: Vec<JoinHandle<()>>,
}

impl NotificationDispatcher {
    /// Spawn `workers` tasks consuming a queue of depth `queue_depth`.
    pub fn spawn(notifier: Arc<dyn Notifier>, workers: usize, queue_depth: usize) -> Self {
        let (tx, rx) = mpsc::channel(queue_depth);
        let rx = Arc::new(tokio::sync::Mutex::new(rx));

        let workers = (0..workers.max(1))
            .map(|_| tokio::spawn(worker_loop(Arc::clone(&rx), Arc::clone(&notifier))))
            .collect();

        Self { tx, workers }
    }

    /// Enqueue a message without blocking.
    ///
    /// A full or closed queue drops the message with a warning; the caller
    /// never observes an error.
    pub fn enqueue(&self, notification: OutboundNotification) {
        if let Err(err) = self.tx.try_send(notification) {
            tracing::warn!(error = %err, "outbound notification dropped");
        }
    }

    /// Close the queue and wait for the workers to drain it.
    ///
    /// Host applications call this on shutdown; in-flight reservations are
    /// unaffected either way.
    pub async fn shutdown(self) {
        drop(self.tx);
        join_all(self.workers).await;
    }
}

async fn worker_loop(
    rx: Arc<tokio::sync::Mutex<mpsc::Receiver<OutboundNotification>>>,
    notifier: Arc<dyn Notifier>,
) {
    loop {
        // Lock held only for the receive so workers interleave freely.
        let next = { rx.lock().await.recv().await };
        let Some(notification) = next else {
            break;
        };

        if notification.recipient.is_empty() {
            tracing::warn!(title = %notification.title, "recipient missing; skipping notification");
            continue;
        }

        if let Err(err) = notifier
            .send(
                &notification.recipient,
                &notification.title,
                &notification.body,
            )
            .await
        {
            tracing::error!(
                error = %err,
                recipient = %notification.recipient,
                "notification delivery failed"
            );
        }
    }
}
