use std::sync::Arc;

use crate::template::TemplateRenderer;

use super::pipeline::{complete, invalid, render_body, suppressed};
use super::provider::EmailProvider;
use super::requests::{EmailRequest, EmailTemplateRequest};
use super::stats::{DispatchStats, DispatchStatsSnapshot};
use super::types::{Channel, DeliveryResponse};

/// Sends email through an [`EmailProvider`], optionally rendering templates
pub struct EmailService {
    provider: Arc<dyn EmailProvider>,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    default_from: Option<String>,
    stats: DispatchStats,
}

impl EmailService {
    pub fn new(provider: Arc<dyn EmailProvider>) -> Self {
        Self {
            provider,
            renderer: None,
            default_from: None,
            stats: DispatchStats::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Sender used when a request leaves `from` blank
    pub fn with_default_from(mut self, from: impl Into<String>) -> Self {
        self.default_from = Some(from.into());
        self
    }

    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.stats.snapshot()
    }

    /// Record a send skipped by user preference
    pub(crate) fn suppress(&self, user_id: &str) -> DeliveryResponse {
        suppressed(&self.stats, Channel::Email, user_id)
    }

    #[tracing::instrument(name = "email.send", skip(self, request), fields(provider = self.provider.name()))]
    pub async fn send_email(&self, mut request: EmailRequest) -> DeliveryResponse {
        if request.from.trim().is_empty() {
            if let Some(from) = &self.default_from {
                request.from = from.clone();
            }
        }

        if let Err(e) = request.validate() {
            return invalid(&self.stats, Channel::Email, e);
        }

        let result = self.provider.send_email(&request).await;
        complete(&self.stats, Channel::Email, self.provider.name(), result)
    }

    #[tracing::instrument(
        name = "email.send_template",
        skip(self, request),
        fields(template_id = %request.template_id)
    )]
    pub async fn send_template_email(&self, request: EmailTemplateRequest) -> DeliveryResponse {
        let html = match render_body(
            self.renderer.as_deref(),
            Channel::Email,
            &request.template_id,
            &request.template_variables,
            &self.stats,
        )
        .await
        {
            Ok(html) => html,
            Err(response) => return response,
        };

        self.send_email(request.into_email_request(html)).await
    }
}
