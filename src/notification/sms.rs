use std::sync::Arc;

use crate::template::TemplateRenderer;

use super::pipeline::{complete, invalid, render_body, suppressed};
use super::provider::SmsProvider;
use super::requests::{SmsRequest, SmsTemplateRequest};
use super::stats::{DispatchStats, DispatchStatsSnapshot};
use super::types::{Channel, DeliveryResponse};

/// Sends SMS through an [`SmsProvider`]
pub struct SmsService {
    provider: Arc<dyn SmsProvider>,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    stats: DispatchStats,
}

impl SmsService {
    pub fn new(provider: Arc<dyn SmsProvider>) -> Self {
        Self {
            provider,
            renderer: None,
            stats: DispatchStats::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.stats.snapshot()
    }

    /// Record a send skipped by user preference
    pub(crate) fn suppress(&self, user_id: &str) -> DeliveryResponse {
        suppressed(&self.stats, Channel::Sms, user_id)
    }

    #[tracing::instrument(name = "sms.send", skip(self, request), fields(provider = self.provider.name()))]
    pub async fn send_sms(&self, request: SmsRequest) -> DeliveryResponse {
        if let Err(e) = request.validate() {
            return invalid(&self.stats, Channel::Sms, e);
        }

        let result = self.provider.send_sms(&request).await;
        complete(&self.stats, Channel::Sms, self.provider.name(), result)
    }

    #[tracing::instrument(
        name = "sms.send_template",
        skip(self, request),
        fields(template_id = %request.template_id)
    )]
    pub async fn send_template_sms(&self, request: SmsTemplateRequest) -> DeliveryResponse {
        let message = match render_body(
            self.renderer.as_deref(),
            Channel::Sms,
            &request.template_id,
            &request.template_variables,
            &self.stats,
        )
        .await
        {
            Ok(message) => message,
            Err(response) => return response,
        };

        self.send_sms(request.into_sms_request(message)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::mock::MockSmsProvider;
    use crate::notification::DeliveryStatus;
    use crate::template::{NotificationTemplate, TemplateEngine};
    use serde_json::json;

    #[tokio::test]
    async fn test_send_sms_returns_success() {
        let provider = Arc::new(MockSmsProvider::new());
        let service = SmsService::new(provider.clone());

        let response = service.send_sms(SmsRequest::new("+10000000000", "Hello")).await;
        assert_eq!(response.status, DeliveryStatus::Sent);
        assert_eq!(provider.requests().await[0].message, "Hello");
    }

    #[tokio::test]
    async fn test_provider_error_becomes_failed_response() {
        let service = SmsService::new(Arc::new(MockSmsProvider::failing("rate limited")));

        let response = service.send_sms(SmsRequest::new("+10000000000", "Hello")).await;
        assert_eq!(response.status, DeliveryStatus::Failed);
        assert_eq!(response.channel, Channel::Sms);
        assert!(response.error_message.unwrap().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_rejected_response_passes_through() {
        let service = SmsService::new(Arc::new(MockSmsProvider::rejecting("unroutable number")));

        let response = service.send_sms(SmsRequest::new("+10000000000", "Hello")).await;
        assert_eq!(response.status, DeliveryStatus::Failed);
        assert_eq!(response.error_message.as_deref(), Some("unroutable number"));
        assert_eq!(service.stats().total_failed, 1);
    }

    #[tokio::test]
    async fn test_template_sms() {
        let engine = Arc::new(TemplateEngine::new());
        engine
            .create(NotificationTemplate::new("otp", "Your code is {{code}}"))
            .unwrap();

        let provider = Arc::new(MockSmsProvider::new());
        let service = SmsService::new(provider.clone()).with_renderer(engine);

        let response = service
            .send_template_sms(SmsTemplateRequest::new("otp", "+10000000000").variable("code", json!(123456)))
            .await;

        assert!(response.is_sent());
        assert_eq!(provider.requests().await[0].message, "Your code is 123456");
    }

    #[tokio::test]
    async fn test_template_sms_without_renderer() {
        let provider = Arc::new(MockSmsProvider::new());
        let service = SmsService::new(provider.clone());

        let response = service
            .send_template_sms(SmsTemplateRequest::new("otp", "+10000000000"))
            .await;

        assert_eq!(response.status, DeliveryStatus::Failed);
        assert_eq!(provider.sent_count().await, 0);
    }
}
