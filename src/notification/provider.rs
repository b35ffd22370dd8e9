//! Delivery ports, one per channel.
//!
//! Concrete adapters (SendGrid, Twilio, Firebase, ...) implement these
//! traits; the channel services depend only on the traits.

use async_trait::async_trait;
use thiserror::Error;

use super::requests::{EmailRequest, PushRequest, SmsRequest};
use super::types::DeliveryResponse;

/// Errors a provider adapter may raise instead of returning a failed response
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider refused the request (bad recipient, content policy, ...)
    #[error("Provider rejected request: {0}")]
    Rejected(String),

    /// Provider could not be reached or is rate limiting
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    async fn send_email(&self, request: &EmailRequest) -> Result<DeliveryResponse, ProviderError>;
}

#[async_trait]
pub trait SmsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send_sms(&self, request: &SmsRequest) -> Result<DeliveryResponse, ProviderError>;
}

#[async_trait]
pub trait PushProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send_push(&self, request: &PushRequest) -> Result<DeliveryResponse, ProviderError>;
}
