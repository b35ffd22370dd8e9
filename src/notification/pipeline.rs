//! Steps shared by the channel services: render a template body, then turn
//! the provider's answer into a `DeliveryResponse`.

use std::sync::atomic::Ordering;

use crate::metrics::{SendMetrics, TemplateMetrics};
use crate::template::{TemplateRenderer, TemplateVariables};

use super::provider::ProviderError;
use super::stats::DispatchStats;
use super::types::{Channel, DeliveryResponse};

/// Record a response in stats and metrics and hand it back
pub(crate) fn finish(stats: &DispatchStats, response: DeliveryResponse) -> DeliveryResponse {
    stats.record(&response);
    SendMetrics::record(&response.channel, response.status);
    response
}

/// Render the body for a templated send.
///
/// On failure the returned `Err` is the response to hand the caller; the
/// delivery port must not be called in that case.
pub(crate) async fn render_body(
    renderer: Option<&dyn TemplateRenderer>,
    channel: Channel,
    template_id: &str,
    variables: &TemplateVariables,
    stats: &DispatchStats,
) -> Result<String, DeliveryResponse> {
    let Some(renderer) = renderer else {
        TemplateMetrics::record_unsupported();
        stats.template_failures.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            channel = %channel,
            template_id = %template_id,
            "Templated send requested but no template renderer is configured"
        );
        let message = format!(
            "Template {} not supported: no template renderer configured",
            channel
        );
        return Err(finish(stats, DeliveryResponse::failed(channel, message)));
    };

    match renderer.render(template_id, variables).await {
        Ok(body) => Ok(body),
        Err(e) => {
            stats.template_failures.fetch_add(1, Ordering::Relaxed);
            tracing::error!(
                channel = %channel,
                template_id = %template_id,
                error = %e,
                "Failed to render template"
            );
            let message = format!("Failed to render template '{}': {}", template_id, e);
            Err(finish(stats, DeliveryResponse::failed(channel, message)))
        }
    }
}

/// Normalize a provider result into a response for `channel`
pub(crate) fn complete(
    stats: &DispatchStats,
    channel: Channel,
    provider: &str,
    result: Result<DeliveryResponse, ProviderError>,
) -> DeliveryResponse {
    let response = match result {
        Ok(mut response) => {
            response.channel = channel;
            response
        }
        Err(e) => {
            tracing::warn!(
                channel = %channel,
                provider = %provider,
                error = %e,
                "Provider failed to send notification"
            );
            DeliveryResponse::failed(channel, e.to_string())
        }
    };

    tracing::debug!(
        channel = %response.channel,
        provider = %provider,
        status = response.status.as_str(),
        message_id = ?response.message_id,
        "Notification send completed"
    );

    finish(stats, response)
}

/// Response for a send skipped because the user disabled the channel
pub(crate) fn suppressed(stats: &DispatchStats, channel: Channel, user_id: &str) -> DeliveryResponse {
    tracing::debug!(
        user_id = %user_id,
        channel = %channel,
        "Channel disabled by user preferences, skipping send"
    );
    finish(stats, DeliveryResponse::suppressed(channel, user_id))
}

/// Response for a request that failed validation before reaching the provider
pub(crate) fn invalid(
    stats: &DispatchStats,
    channel: Channel,
    error: crate::error::NotificationError,
) -> DeliveryResponse {
    tracing::debug!(channel = %channel, error = %error, "Rejected invalid request");
    finish(stats, DeliveryResponse::failed(channel, error.to_string()))
}
