//! Prometheus metrics for the notification facade.
//!
//! - Send outcomes by channel and status
//! - Template render outcomes
//! - Preference updates and lookups

mod helpers;

pub use helpers::{encode_metrics, PreferenceMetrics, SendMetrics, TemplateMetrics};

use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "notify";

lazy_static! {
    /// Total send attempts by channel and resulting status
    pub static ref SENDS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_sends_total", METRIC_PREFIX),
        "Total notification send attempts",
        &["channel", "status"]
    ).unwrap();

    /// Template renders by outcome (success, failure, unsupported)
    pub static ref TEMPLATE_RENDERS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_template_renders_total", METRIC_PREFIX),
        "Total template render attempts",
        &["outcome"]
    ).unwrap();

    /// Preference records written
    pub static ref PREFERENCE_UPDATES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_preference_updates_total", METRIC_PREFIX),
        "Total preference record updates"
    ).unwrap();

    /// Channel enablement lookups by result
    pub static ref PREFERENCE_LOOKUPS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_preference_lookups_total", METRIC_PREFIX),
        "Total channel enablement lookups",
        &["result"]
    ).unwrap();
}
