use thiserror::Error;

use crate::notification::Channel;
use crate::preferences::PreferenceStoreError;

/// Errors surfaced to callers as exceptional conditions.
///
/// Ordinary delivery and rendering failures never show up here; those are
/// reported inside a [`DeliveryResponse`](crate::notification::DeliveryResponse).
/// Only wiring mistakes and infrastructure faults are returned as `Err`.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No {0} service configured")]
    ChannelNotConfigured(Channel),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Preference store error: {0}")]
    PreferenceStore(#[from] PreferenceStoreError),
}

pub type Result<T> = std::result::Result<T, NotificationError>;
