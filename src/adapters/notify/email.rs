//! Email notification adapter (Resend).

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::EmailConfig;
use crate::ports::{Notifier, NotifyError};

const RESEND_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

/// Email delivery through Resend.
///
/// The recipient is the member's contact address; the notification title
/// becomes the subject line.
pub struct EmailNotifier {
    config: EmailConfig,
    client: Client,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, recipient: &str, title: &str, body: &str) -> Result<(), NotifyError> {
        let payload = EmailPayload {
            from: self.config.from_header(),
            to: [recipient],
            subject: title,
            text: body,
        };

        let response = self
            .client
            .post(RESEND_URL)
            .bearer_auth(&self.config.resend_api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Delivery(format!(
                "email provider returned {}: {}",
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
    fn payload_carries_subject_and_text() {
        let payload = EmailPayload {
            from: "Studiobook <noreply@studiobook.app>".to_string(),
            to: ["mina@example.com"],
            subject: "Reservation confirmed",
            text: "Your seat for Morning Flow is booked.",
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["to"][0], "mina@example.com");
        assert_eq!(json["subject"], "Reservation confirmed");
    }
}
