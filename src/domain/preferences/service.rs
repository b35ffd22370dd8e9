//! Preference lookups and updates on top of a [`PreferenceStore`].

use std::sync::Arc;

use crate::metrics::PreferenceMetrics;

use super::backend::{PreferenceStore, PreferenceStoreError};
use super::types::NotificationPreferences;

/// Reads, writes and resolves user preferences.
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Preferences for a user. Users without a stored record get a default
    /// (all channels enabled) record, which is not persisted.
    pub async fn get_preferences(
        &self,
        user_id: &str,
    ) -> Result<NotificationPreferences, PreferenceStoreError> {
        Ok(self
            .store
            .get(user_id)
            .await?
            .unwrap_or_else(|| NotificationPreferences::new(user_id)))
    }

    /// Replace the stored record for a user and return it
    pub async fn update_preferences(
        &self,
        user_id: &str,
        mut preferences: NotificationPreferences,
    ) -> Result<NotificationPreferences, PreferenceStoreError> {
        preferences.user_id = user_id.to_string();
        self.store.put(user_id, preferences.clone()).await?;
        PreferenceMetrics::record_update();

        tracing::debug!(
            user_id = %user_id,
            backend = self.store.backend_type(),
            "Updated notification preferences"
        );

        Ok(preferences)
    }

    /// Whether a channel is enabled for a user.
    ///
    /// Never fails: if the store cannot be read the channel counts as enabled.
    pub async fn is_channel_enabled(&self, user_id: &str, channel: &str) -> bool {
        let enabled = match self.get_preferences(user_id).await {
            Ok(preferences) => preferences.is_channel_enabled(channel),
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    channel = %channel,
                    error = %e,
                    "Preference lookup failed, treating channel as enabled"
                );
                true
            }
        };

        PreferenceMetrics::record_lookup(enabled);
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferenceStore;
    use async_trait::async_trait;

    struct UnavailableStore;

    #[async_trait]
    impl PreferenceStore for UnavailableStore {
        fn backend_type(&self) -> &'static str {
            "unavailable"
        }

        async fn get(
            &self,
            _user_id: &str,
        ) -> Result<Option<NotificationPreferences>, PreferenceStoreError> {
            Err(PreferenceStoreError::Unavailable("connection refused".into()))
        }

        async fn put(
            &self,
            _user_id: &str,
            _preferences: NotificationPreferences,
        ) -> Result<(), PreferenceStoreError> {
            Err(PreferenceStoreError::Unavailable("connection refused".into()))
        }

        async fn count(&self) -> usize {
            0
        }
    }

    fn memory_service() -> (PreferenceService, Arc<MemoryPreferenceStore>) {
        let store = Arc::new(MemoryPreferenceStore::new());
        (PreferenceService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_missing_user_gets_default_without_persisting() {
        let (service, store) = memory_service();

        let prefs = service.get_preferences("u1").await.unwrap();
        assert_eq!(prefs, NotificationPreferences::new("u1"));
        assert!(store.get("u1").await.unwrap().is_none());
        assert!(service.is_channel_enabled("u1", "push").await);
    }

    #[tokio::test]
    async fn test_update_then_resolve() {
        let (service, _) = memory_service();

        let updated = service
            .update_preferences(
                "u2",
                NotificationPreferences::new("ignored")
                    .with_email_enabled(false)
                    .with_sms_enabled(true)
                    .with_push_enabled(true),
            )
            .await
            .unwrap();
        assert_eq!(updated.user_id, "u2");

        assert!(!service.is_channel_enabled("u2", "email").await);
        assert!(service.is_channel_enabled("u2", "sms").await);
    }

    #[tokio::test]
    async fn test_sms_override_ignores_named_toggle() {
        let (service, _) = memory_service();

        for sms_enabled in [true, false] {
            service
                .update_preferences(
                    "u3",
                    NotificationPreferences::new("u3")
                        .with_sms_enabled(sms_enabled)
                        .with_override("sms", false),
                )
                .await
                .unwrap();
            assert!(!service.is_channel_enabled("u3", "sms").await);
        }
    }

    #[tokio::test]
    async fn test_get_twice_returns_equal_records() {
        let (service, _) = memory_service();
        service
            .update_preferences("u4", NotificationPreferences::new("u4").with_override("Push", false))
            .await
            .unwrap();

        let first = service.get_preferences("u4").await.unwrap();
        let second = service.get_preferences("u4").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_store_failure_fails_open() {
        let service = PreferenceService::new(Arc::new(UnavailableStore));

        assert!(service.get_preferences("u5").await.is_err());
        assert!(service.is_channel_enabled("u5", "email").await);
        assert!(service
            .update_preferences("u5", NotificationPreferences::new("u5"))
            .await
            .is_err());
    }
}
