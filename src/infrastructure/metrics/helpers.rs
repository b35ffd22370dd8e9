//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use crate::notification::{Channel, DeliveryStatus};

use super::{
    PREFERENCE_LOOKUPS_TOTAL, PREFERENCE_UPDATES_TOTAL, SENDS_TOTAL, TEMPLATE_RENDERS_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording send metrics
pub struct SendMetrics;

impl SendMetrics {
    /// Record the outcome of one send on a channel
    pub fn record(channel: &Channel, status: DeliveryStatus) {
        SENDS_TOTAL
            .with_label_values(&[channel.metric_label(), status.as_str()])
            .inc();
    }
}

/// Helper struct for recording template metrics
pub struct TemplateMetrics;

impl TemplateMetrics {
    pub fn record_success() {
        TEMPLATE_RENDERS_TOTAL.with_label_values(&["success"]).inc();
    }

    pub fn record_failure() {
        TEMPLATE_RENDERS_TOTAL.with_label_values(&["failure"]).inc();
    }

    /// Record a templated send attempted without a renderer configured
    pub fn record_unsupported() {
        TEMPLATE_RENDERS_TOTAL.with_label_values(&["unsupported"]).inc();
    }
}

/// Helper struct for recording preference metrics
pub struct PreferenceMetrics;

impl PreferenceMetrics {
    pub fn record_update() {
        PREFERENCE_UPDATES_TOTAL.inc();
    }

    pub fn record_lookup(enabled: bool) {
        let result = if enabled { "enabled" } else { "disabled" };
        PREFERENCE_LOOKUPS_TOTAL.with_label_values(&[result]).inc();
    }
}
