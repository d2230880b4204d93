//! Notification channel configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Push notification configuration (FCM-style gateway)
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    /// Gateway endpoint URL
    #[serde(default = "default_push_endpoint")]
    pub endpoint: String,

    /// Server key for the gateway
    pub server_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PushConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.server_key.is_empty() {
            return Err(ValidationError::MissingRequired("PUSH_SERVER_KEY"));
        }
        if !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidPushEndpoint);
        }
        Ok(())
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: default_push_endpoint(),
            server_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Email configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resend_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("RESEND_API_KEY"));
        }
        if !self.resend_api_key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Instant messenger configuration (incoming webhook)
#[derive(Debug, Clone, Deserialize)]
pub struct MessengerConfig {
    /// Webhook URL messages are posted to
    pub webhook_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl MessengerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.webhook_url.is_empty() {
            return Err(ValidationError::MissingRequired("MESSENGER_WEBHOOK_URL"));
        }
        if !self.webhook_url.starts_with("https://") {
            return Err(ValidationError::InvalidWebhookUrl);
        }
        Ok(())
    }
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_push_endpoint() -> String {
    "https://fcm.googleapis.com/fcm/send".to_string()
}

fn default_from_email() -> String {
    "noreply@studiobook.app".to_string()
}

fn default_from_name() -> String {
    "Studiobook".to_string()
}

fn default_timeout() -> u64 {
    10
}
