//! In-memory preference backend using DashMap.
//!
//! Records are lost on restart. Suitable for development, tests and
//! single-instance deployments.

use async_trait::async_trait;
use dashmap::DashMap;

use super::backend::{PreferenceStore, PreferenceStoreError};
use super::types::NotificationPreferences;

/// In-memory preference backend.
pub struct MemoryPreferenceStore {
    records: DashMap<String, NotificationPreferences>,
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    fn backend_type(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, user_id: &str) -> Result<Option<NotificationPreferences>, PreferenceStoreError> {
        Ok(self.records.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn put(
        &self,
        user_id: &str,
        mut preferences: NotificationPreferences,
    ) -> Result<(), PreferenceStoreError> {
        preferences.user_id = user_id.to_string();
        self.records.insert(user_id.to_string(), preferences);
        Ok(())
    }

    async fn count(&self) -> usize {
        self.records.len()
    }
}
