//! Instant messenger notification adapter (incoming webhook).

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::MessengerConfig;
use crate::ports::{Notifier, NotifyError};

#[derive(Debug, Serialize)]
struct WebhookPayload {
    text: String,
}

/// Delivery through a chat tool's incoming webhook.
///
/// Webhooks address a channel, not a person, so the recipient is folded into
/// the message text.
pub struct MessengerNotifier {
    config: MessengerConfig,
    client: Client,
}

impl MessengerNotifier {
    pub fn new(config: MessengerConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl Notifier for MessengerNotifier {
    async fn send(&self, recipient: &str, title: &str, body: &str) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            text: format!("{} ({}): {}", title, recipient, body),
        };

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Delivery(format!(
                "webhook returned {}: {}",
                status, detail
            )));
        }

        Ok(())
    }
}
