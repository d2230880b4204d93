//! Push notification adapter (FCM-style gateway).

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::PushConfig;
use crate::ports::{Notifier, NotifyError};

#[derive(Debug, Serialize)]
struct PushPayload<'a> {
    to: &'a str,
    notification: PushBody<'a>,
}

#[derive(Debug, Serialize)]
struct PushBody<'a> {
    title: &'a str,
    body: &'a str,
}

/// Push delivery through an FCM-style HTTP gateway.
///
/// The recipient is the member's device token.
pub struct PushNotifier {
    config: PushConfig,
    client: Client,
}

impl PushNotifier {
    pub fn new(config: PushConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl Notifier for PushNotifier {
    async fn send(&self, recipient: &str, title: &str, body: &str) -> Result<(), NotifyError> {
        let payload = PushPayload {
            to: recipient,
            notification: PushBody { title, body },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("key={}", self.config.server_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Delivery(format!(
                "push gateway returned {}: {}",
                status, detail
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_to_gateway_shape() {
        let payload = PushPayload {
            to: "token-1",
            notification: PushBody {
                title: "Reservation confirmed",
                body: "Your seat for Morning Flow is booked.",
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["to"], "token-1");
        assert_eq!(json["notification"]["title"], "Reservation confirmed");
    }
}
