//! Recording providers for tests

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::provider::{EmailProvider, ProviderError, PushProvider, SmsProvider};
use super::requests::{EmailRequest, PushRequest, SmsRequest};
use super::types::{Channel, DeliveryResponse};

#[derive(Debug, Clone)]
enum Behavior {
    Succeed,
    /// Return `Err(ProviderError::Unavailable)`
    Error(String),
    /// Return `Ok` with a failed response
    Reject(String),
}

/// Provider that records every request it receives
pub struct MockProvider<R> {
    requests: Mutex<Vec<R>>,
    behavior: Behavior,
}

pub type MockEmailProvider = MockProvider<EmailRequest>;
pub type MockSmsProvider = MockProvider<SmsRequest>;
pub type MockPushProvider = MockProvider<PushRequest>;

impl<R: Clone> MockProvider<R> {
    /// Provider that accepts every request
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Succeed)
    }

    /// Provider whose sends fail with a `ProviderError`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Error(message.into()))
    }

    /// Provider that answers every send with a failed response
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Reject(message.into()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            behavior,
        }
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<R> {
        self.requests.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn clear(&self) {
        self.requests.lock().await.clear();
    }

    async fn handle(&self, channel: Channel, request: &R) -> Result<DeliveryResponse, ProviderError> {
        self.requests.lock().await.push(request.clone());

        match &self.behavior {
            Behavior::Succeed => Ok(DeliveryResponse::sent(
                channel,
                format!("mock-{}", Uuid::new_v4()),
            )),
            Behavior::Error(message) => Err(ProviderError::Unavailable(message.clone())),
            Behavior::Reject(message) => Ok(DeliveryResponse::failed(channel, message.clone())),
        }
    }
}

impl<R: Clone> Default for MockProvider<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailProvider for MockProvider<EmailRequest> {
    fn name(&self) -> &'static str {
        "mock-email"
    }

    async fn send_email(&self, request: &EmailRequest) -> Result<DeliveryResponse, ProviderError> {
        self.handle(Channel::Email, request).await
    }
}

#[async_trait]
impl SmsProvider for MockProvider<SmsRequest> {
    fn name(&self) -> &'static str {
        "mock-sms"
    }

    async fn send_sms(&self, request: &SmsRequest) -> Result<DeliveryResponse, ProviderError> {
        self.handle(Channel::Sms, request).await
    }
}

#[async_trait]
impl PushProvider for MockProvider<PushRequest> {
    fn name(&self) -> &'static str {
        "mock-push"
    }

    async fn send_push(&self, request: &PushRequest) -> Result<DeliveryResponse, ProviderError> {
        self.handle(Channel::Push, request).await
    }
}
