use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification delivery medium
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Channel {
    Email,
    Sms,
    Push,
    /// Any other named channel (lowercase)
    Custom(String),
}

impl Channel {
    /// Parse a channel name, ignoring case
    pub fn from_name(name: &str) -> Self {
        let normalized = name.to_lowercase();
        match normalized.as_str() {
            "email" => Channel::Email,
            "sms" => Channel::Sms,
            "push" => Channel::Push,
            _ => Channel::Custom(normalized),
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
            Channel::Custom(name) => name,
        }
    }

    /// Bounded label for metrics; custom channels share one label
    pub(crate) fn metric_label(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
            Channel::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Channel {
    fn from(name: &str) -> Self {
        Channel::from_name(name)
    }
}

impl From<String> for Channel {
    fn from(name: String) -> Self {
        Channel::from_name(&name)
    }
}

impl From<Channel> for String {
    fn from(channel: Channel) -> Self {
        channel.as_str().to_string()
    }
}

/// Outcome of a send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    /// Accepted by the provider
    Sent,
    /// Rejected, not attempted, or errored
    Failed,
    /// Not attempted because the user disabled the channel
    Suppressed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Failed => "failed",
            DeliveryStatus::Suppressed => "suppressed",
        }
    }
}

/// Result of a send on any channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryResponse {
    pub channel: Channel,
    /// Provider's message ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl DeliveryResponse {
    /// Successful send with the provider's message ID
    pub fn sent(channel: Channel, message_id: impl Into<String>) -> Self {
        Self {
            channel,
            message_id: Some(message_id.into()),
            status: DeliveryStatus::Sent,
            error_message: None,
            timestamp: Utc::now(),
        }
    }

    /// Failed send; an empty message becomes "Unknown error"
    pub fn failed(channel: Channel, error_message: impl Into<String>) -> Self {
        let message = error_message.into();
        Self {
            channel,
            message_id: None,
            status: DeliveryStatus::Failed,
            error_message: Some(if message.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                message
            }),
            timestamp: Utc::now(),
        }
    }

    /// Send skipped because the channel is disabled for the recipient
    pub fn suppressed(channel: Channel, user_id: &str) -> Self {
        let message = format!("Channel {} disabled by preferences of user {}", channel, user_id);
        Self {
            channel,
            message_id: None,
            status: DeliveryStatus::Suppressed,
            error_message: Some(message),
            timestamp: Utc::now(),
        }
    }

    pub fn is_sent(&self) -> bool {
        self.status == DeliveryStatus::Sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_from_name() {
        assert_eq!(Channel::from_name("EMAIL"), Channel::Email);
        assert_eq!(Channel::from_name("Sms"), Channel::Sms);
        assert_eq!(Channel::from_name("push"), Channel::Push);
        assert_eq!(Channel::from_name("Slack"), Channel::Custom("slack".to_string()));
        assert_eq!(Channel::Custom("slack".into()).metric_label(), "custom");
    }

    #[test]
    fn test_channel_serde_as_string() {
        let json = serde_json::to_string(&Channel::Sms).unwrap();
        assert_eq!(json, "\"sms\"");

        let channel: Channel = serde_json::from_str("\"WebHook\"").unwrap();
        assert_eq!(channel, Channel::Custom("webhook".to_string()));
    }

    #[test]
    fn test_delivery_response_constructors() {
        let sent = DeliveryResponse::sent(Channel::Email, "msg-1");
        assert!(sent.is_sent());
        assert_eq!(sent.message_id.as_deref(), Some("msg-1"));
        assert!(sent.error_message.is_none());

        let failed = DeliveryResponse::failed(Channel::Sms, "");
        assert_eq!(failed.status, DeliveryStatus::Failed);
        assert_eq!(failed.error_message.as_deref(), Some("Unknown error"));

        let suppressed = DeliveryResponse::suppressed(Channel::Push, "u1");
        assert_eq!(suppressed.status, DeliveryStatus::Suppressed);
        assert!(suppressed.error_message.unwrap().contains("u1"));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(DeliveryResponse::failed(Channel::Email, "boom")).unwrap();
        assert_eq!(json["status"], "FAILED");
        assert_eq!(json["channel"], "email");
        assert_eq!(json["error_message"], "boom");
        assert!(json.get("message_id").is_none());
    }
}
