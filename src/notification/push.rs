use std::sync::Arc;

use crate::template::TemplateRenderer;

use super::pipeline::{complete, invalid, render_body, suppressed};
use super::provider::PushProvider;
use super::requests::{PushRequest, PushTemplateRequest};
use super::stats::{DispatchStats, DispatchStatsSnapshot};
use super::types::{Channel, DeliveryResponse};

/// Sends push notifications through a [`PushProvider`]
pub struct PushService {
    provider: Arc<dyn PushProvider>,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    stats: DispatchStats,
}

impl PushService {
    pub fn new(provider: Arc<dyn PushProvider>) -> Self {
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
        suppressed(&self.stats, Channel::Push, user_id)
    }

    #[tracing::instrument(name = "push.send", skip(self, request), fields(provider = self.provider.name()))]
    pub async fn send_push(&self, request: PushRequest) -> DeliveryResponse {
        if let Err(e) = request.validate() {
            return invalid(&self.stats, Channel::Push, e);
        }

        let result = self.provider.send_push(&request).await;
        complete(&self.stats, Channel::Push, self.provider.name(), result)
    }

    #[tracing::instrument(
        name = "push.send_template",
        skip(self, request),
        fields(template_id = %request.template_id)
    )]
    pub async fn send_template_push(&self, request: PushTemplateRequest) -> DeliveryResponse {
        let body = match render_body(
            self.renderer.as_deref(),
            Channel::Push,
            &request.template_id,
            &request.template_variables,
            &self.stats,
        )
        .await
        {
            Ok(body) => body,
            Err(response) => return response,
        };

        self.send_push(request.into_push_request(body)).await
    }
}
