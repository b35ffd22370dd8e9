//! Single entry point bundling the channel services with user preferences.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::{NotificationError, Result};
use crate::preferences::{create_preference_store, MemoryPreferenceStore, PreferenceService};
use crate::template::{create_template_engine, TemplateRenderer};

use super::email::EmailService;
use super::provider::{EmailProvider, PushProvider, SmsProvider};
use super::push::PushService;
use super::requests::{
    EmailRequest, EmailTemplateRequest, PushRequest, PushTemplateRequest, SmsRequest,
    SmsTemplateRequest,
};
use super::sms::SmsService;
use super::types::{Channel, DeliveryResponse};

/// Notification facade.
///
/// Channels without a configured provider return
/// [`NotificationError::ChannelNotConfigured`]; every other outcome,
/// including provider and template failures, is a [`DeliveryResponse`].
pub struct NotificationFacade {
    email: Option<EmailService>,
    sms: Option<SmsService>,
    push: Option<PushService>,
    preferences: PreferenceService,
}

impl NotificationFacade {
    pub fn builder() -> NotificationFacadeBuilder {
        NotificationFacadeBuilder::default()
    }

    pub fn preferences(&self) -> &PreferenceService {
        &self.preferences
    }

    pub fn email(&self) -> Result<&EmailService> {
        self.email
            .as_ref()
            .ok_or(NotificationError::ChannelNotConfigured(Channel::Email))
    }

    pub fn sms(&self) -> Result<&SmsService> {
        self.sms
            .as_ref()
            .ok_or(NotificationError::ChannelNotConfigured(Channel::Sms))
    }

    pub fn push(&self) -> Result<&PushService> {
        self.push
            .as_ref()
            .ok_or(NotificationError::ChannelNotConfigured(Channel::Push))
    }

    pub async fn send_email(&self, request: EmailRequest) -> Result<DeliveryResponse> {
        Ok(self.email()?.send_email(request).await)
    }

    pub async fn send_template_email(&self, request: EmailTemplateRequest) -> Result<DeliveryResponse> {
        Ok(self.email()?.send_template_email(request).await)
    }

    pub async fn send_sms(&self, request: SmsRequest) -> Result<DeliveryResponse> {
        Ok(self.sms()?.send_sms(request).await)
    }

    pub async fn send_template_sms(&self, request: SmsTemplateRequest) -> Result<DeliveryResponse> {
        Ok(self.sms()?.send_template_sms(request).await)
    }

    pub async fn send_push(&self, request: PushRequest) -> Result<DeliveryResponse> {
        Ok(self.push()?.send_push(request).await)
    }

    pub async fn send_template_push(&self, request: PushTemplateRequest) -> Result<DeliveryResponse> {
        Ok(self.push()?.send_template_push(request).await)
    }

    /// Send an email unless `user_id` has email disabled
    pub async fn send_email_to_user(
        &self,
        user_id: &str,
        request: EmailRequest,
    ) -> Result<DeliveryResponse> {
        let service = self.email()?;
        if self.channel_disabled(user_id, Channel::Email).await {
            return Ok(service.suppress(user_id));
        }
        Ok(service.send_email(request).await)
    }

    pub async fn send_template_email_to_user(
        &self,
        user_id: &str,
        request: EmailTemplateRequest,
    ) -> Result<DeliveryResponse> {
        let service = self.email()?;
        if self.channel_disabled(user_id, Channel::Email).await {
            return Ok(service.suppress(user_id));
        }
        Ok(service.send_template_email(request).await)
    }

    /// Send an SMS unless `user_id` has SMS disabled
    pub async fn send_sms_to_user(&self, user_id: &str, request: SmsRequest) -> Result<DeliveryResponse> {
        let service = self.sms()?;
        if self.channel_disabled(user_id, Channel::Sms).await {
            return Ok(service.suppress(user_id));
        }
        Ok(service.send_sms(request).await)
    }

    pub async fn send_template_sms_to_user(
        &self,
        user_id: &str,
        request: SmsTemplateRequest,
    ) -> Result<DeliveryResponse> {
        let service = self.sms()?;
        if self.channel_disabled(user_id, Channel::Sms).await {
            return Ok(service.suppress(user_id));
        }
        Ok(service.send_template_sms(request).await)
    }

    /// Send a push notification unless `user_id` has push disabled
    pub async fn send_push_to_user(&self, user_id: &str, request: PushRequest) -> Result<DeliveryResponse> {
        let service = self.push()?;
        if self.channel_disabled(user_id, Channel::Push).await {
            return Ok(service.suppress(user_id));
        }
        Ok(service.send_push(request).await)
    }

    pub async fn send_template_push_to_user(
        &self,
        user_id: &str,
        request: PushTemplateRequest,
    ) -> Result<DeliveryResponse> {
        let service = self.push()?;
        if self.channel_disabled(user_id, Channel::Push).await {
            return Ok(service.suppress(user_id));
        }
        Ok(service.send_template_push(request).await)
    }

    /// Whether the user disabled `channel`
    async fn channel_disabled(&self, user_id: &str, channel: Channel) -> bool {
        !self
            .preferences
            .is_channel_enabled(user_id, channel.as_str())
            .await
    }
}

/// Builder for [`NotificationFacade`]
#[derive(Default)]
pub struct NotificationFacadeBuilder {
    email_provider: Option<Arc<dyn EmailProvider>>,
    sms_provider: Option<Arc<dyn SmsProvider>>,
    push_provider: Option<Arc<dyn PushProvider>>,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    preferences: Option<PreferenceService>,
    default_from: Option<String>,
}

impl NotificationFacadeBuilder {
    /// Builder seeded from settings: preference backend, template engine and
    /// default sender. Providers still have to be supplied.
    pub fn from_settings(settings: &Settings) -> Self {
        let store = create_preference_store(&settings.preferences);
        let engine = create_template_engine(&settings.templates);

        Self {
            renderer: Some(engine),
            preferences: Some(PreferenceService::new(store)),
            default_from: settings.dispatch.default_from.clone(),
            ..Default::default()
        }
    }

    pub fn email_provider(mut self, provider: Arc<dyn EmailProvider>) -> Self {
        self.email_provider = Some(provider);
        self
    }

    pub fn sms_provider(mut self, provider: Arc<dyn SmsProvider>) -> Self {
        self.sms_provider = Some(provider);
        self
    }

    pub fn push_provider(mut self, provider: Arc<dyn PushProvider>) -> Self {
        self.push_provider = Some(provider);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn preferences(mut self, preferences: PreferenceService) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn default_from(mut self, from: impl Into<String>) -> Self {
        self.default_from = Some(from.into());
        self
    }

    pub fn build(self) -> NotificationFacade {
        let renderer = self.renderer;

        let email = self.email_provider.map(|provider| {
            let mut service = EmailService::new(provider);
            if let Some(renderer) = &renderer {
                service = service.with_renderer(renderer.clone());
            }
            if let Some(from) = &self.default_from {
                service = service.with_default_from(from.clone());
            }
            service
        });

        let sms = self.sms_provider.map(|provider| {
            let service = SmsService::new(provider);
            match &renderer {
                Some(renderer) => service.with_renderer(renderer.clone()),
                None => service,
            }
        });

        let push = self.push_provider.map(|provider| {
            let service = PushService::new(provider);
            match &renderer {
                Some(renderer) => service.with_renderer(renderer.clone()),
                None => service,
            }
        });

        let preferences = self
            .preferences
            .unwrap_or_else(|| PreferenceService::new(Arc::new(MemoryPreferenceStore::new())));

        tracing::info!(
            email = email.is_some(),
            sms = sms.is_some(),
            push = push.is_some(),
            templates = renderer.is_some(),
            "Notification facade initialized"
        );

        NotificationFacade {
            email,
            sms,
            push,
            preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::mock::{MockEmailProvider, MockPushProvider, MockSmsProvider};
    use crate::notification::DeliveryStatus;
    use crate::preferences::NotificationPreferences;
    use crate::template::{TemplateResult, TemplateVariables};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingRenderer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TemplateRenderer for CountingRenderer {
        async fn render(&self, _template_id: &str, _variables: &TemplateVariables) -> TemplateResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("rendered".to_string())
        }
    }

    #[tokio::test]
    async fn test_unconfigured_channel_is_error() {
        let facade = NotificationFacade::builder()
            .email_provider(Arc::new(MockEmailProvider::new()))
            .build();

        let result = facade.send_sms(SmsRequest::new("+10000000000", "Hello")).await;
        assert!(matches!(
            result,
            Err(NotificationError::ChannelNotConfigured(Channel::Sms))
        ));
        assert!(facade.push().is_err());
        assert!(facade.email().is_ok());
    }

    #[tokio::test]
    async fn test_send_to_user_respects_preferences() {
        let sms = Arc::new(MockSmsProvider::new());
        let facade = NotificationFacade::builder().sms_provider(sms.clone()).build();

        facade
            .preferences()
            .update_preferences("u1", NotificationPreferences::new("u1").with_sms_enabled(false))
            .await
            .unwrap();

        let response = facade
            .send_sms_to_user("u1", SmsRequest::new("+10000000000", "Hello"))
            .await
            .unwrap();
        assert_eq!(response.status, DeliveryStatus::Suppressed);
        assert_eq!(sms.sent_count().await, 0);

        let response = facade
            .send_sms_to_user("u2", SmsRequest::new("+10000000000", "Hello"))
            .await
            .unwrap();
        assert!(response.is_sent());
        assert_eq!(sms.sent_count().await, 1);

        let stats = facade.sms().unwrap().stats();
        assert_eq!(stats.total_suppressed, 1);
        assert_eq!(stats.total_sent, 1);
    }

    #[tokio::test]
    async fn test_override_disables_push_for_user() {
        let push = Arc::new(MockPushProvider::new());
        let facade = NotificationFacade::builder().push_provider(push.clone()).build();

        facade
            .preferences()
            .update_preferences("u3", NotificationPreferences::new("u3").with_override("PUSH", false))
            .await
            .unwrap();

        let response = facade
            .send_push_to_user("u3", PushRequest::new("token", "Title", "Body"))
            .await
            .unwrap();
        assert_eq!(response.status, DeliveryStatus::Suppressed);
        assert_eq!(push.sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_templated_send_to_disabled_user_skips_rendering() {
        let email = Arc::new(MockEmailProvider::new());
        let sms = Arc::new(MockSmsProvider::new());
        let push = Arc::new(MockPushProvider::new());
        let renderer = Arc::new(CountingRenderer::default());
        let facade = NotificationFacade::builder()
            .email_provider(email.clone())
            .sms_provider(sms.clone())
            .push_provider(push.clone())
            .renderer(renderer.clone())
            .build();

        facade
            .preferences()
            .update_preferences(
                "u7",
                NotificationPreferences::new("u7")
                    .with_email_enabled(false)
                    .with_sms_enabled(false)
                    .with_push_enabled(false),
            )
            .await
            .unwrap();

        let responses = [
            facade
                .send_template_email_to_user(
                    "u7",
                    EmailTemplateRequest::new("welcome", "a@example.com", "b@example.com", "Hi"),
                )
                .await
                .unwrap(),
            facade
                .send_template_sms_to_user("u7", SmsTemplateRequest::new("welcome", "+10000000000"))
                .await
                .unwrap(),
            facade
                .send_template_push_to_user("u7", PushTemplateRequest::new("welcome", "token", "Hi"))
                .await
                .unwrap(),
        ];

        for response in &responses {
            assert_eq!(response.status, DeliveryStatus::Suppressed);
        }
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(email.sent_count().await, 0);
        assert_eq!(sms.sent_count().await, 0);
        assert_eq!(push.sent_count().await, 0);
        assert_eq!(facade.email().unwrap().stats().total_suppressed, 1);
        assert_eq!(facade.push().unwrap().stats().template_failures, 0);
    }

    #[tokio::test]
    async fn test_unconfigured_channel_checked_before_preferences() {
        let facade = NotificationFacade::builder().build();

        let result = facade
            .send_email_to_user("u1", EmailRequest::new("a@example.com", "b@example.com", "Hi"))
            .await;
        assert!(matches!(
            result,
            Err(NotificationError::ChannelNotConfigured(Channel::Email))
        ));
    }

    #[tokio::test]
    async fn test_from_settings_wires_templates_and_default_from() {
        let mut settings = Settings::default();
        settings.dispatch.default_from = Some("noreply@example.com".to_string());

        let email = Arc::new(MockEmailProvider::new());
        let facade = NotificationFacadeBuilder::from_settings(&settings)
            .email_provider(email.clone())
            .build();

        // Memory-only engine with nothing registered: renderer present, template missing
        let response = facade
            .send_template_email(EmailTemplateRequest::new("welcome", "", "user@example.com", "Hi"))
            .await
            .unwrap();
        assert_eq!(response.status, DeliveryStatus::Failed);
        assert!(response.error_message.unwrap().contains("Template not found"));

        let response = facade
            .send_email(EmailRequest::new("", "user@example.com", "Hi"))
            .await
            .unwrap();
        assert!(response.is_sent());
        assert_eq!(email.requests().await[0].from, "noreply@example.com");
    }
}
