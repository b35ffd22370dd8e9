//! Backend trait for preference storage.
//!
//! This module defines the abstraction layer for preference backends,
//! allowing different storage implementations to be used interchangeably.

use async_trait::async_trait;
use thiserror::Error;

use super::types::NotificationPreferences;

/// Errors that can occur during preference backend operations.
///
/// The in-memory backend never produces these; they exist for backends
/// that talk to external storage.
#[derive(Debug, Error)]
pub enum PreferenceStoreError {
    /// Backend is temporarily unavailable
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Stored record could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value storage of one preference record per user.
///
/// Every `get` and `put` is a single atomic operation on one key: a
/// concurrent reader observes either the previous or the new full record.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Backend type identifier
    fn backend_type(&self) -> &'static str;

    /// Stored record for a user, or `None` if nothing was ever written
    async fn get(&self, user_id: &str) -> Result<Option<NotificationPreferences>, PreferenceStoreError>;

    /// Insert or replace the record for a user.
    ///
    /// The stored record's `user_id` is set to `user_id`.
    async fn put(
        &self,
        user_id: &str,
        preferences: NotificationPreferences,
    ) -> Result<(), PreferenceStoreError>;

    /// Number of users with a stored record
    async fn count(&self) -> usize;
}
