use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::types::{DeliveryResponse, DeliveryStatus};

/// Statistics for one channel service
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Sends accepted by the provider
    pub total_sent: AtomicU64,
    /// Sends that ended in a failed response
    pub total_failed: AtomicU64,
    /// Sends skipped by user preference
    pub total_suppressed: AtomicU64,
    /// Failed sends caused by template rendering (including a missing renderer)
    pub template_failures: AtomicU64,
}

impl DispatchStats {
    pub(crate) fn record(&self, response: &DeliveryResponse) {
        let counter = match response.status {
            DeliveryStatus::Sent => &self.total_sent,
            DeliveryStatus::Failed => &self.total_failed,
            DeliveryStatus::Suppressed => &self.total_suppressed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            total_sent: self.total_sent.load(Ordering::Relaxed),
            total_failed: self.total_failed.load(Ordering::Relaxed),
            total_suppressed: self.total_suppressed.load(Ordering::Relaxed),
            template_failures: self.template_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of dispatch statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStatsSnapshot {
    pub total_sent: u64,
    pub total_failed: u64,
    pub total_suppressed: u64,
    pub template_failures: u64,
}
