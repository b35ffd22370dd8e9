//! Preference backend factory

use std::sync::Arc;

use crate::config::PreferencesConfig;

use super::backend::PreferenceStore;
use super::memory_backend::MemoryPreferenceStore;

/// Create a preference backend based on configuration.
///
/// Only `"memory"` ships with this crate. Any other value logs a warning
/// and falls back to memory; external backends are plugged in by
/// implementing [`PreferenceStore`] directly.
pub fn create_preference_store(settings: &PreferencesConfig) -> Arc<dyn PreferenceStore> {
    match settings.backend.as_str() {
        "memory" => {
            tracing::info!(backend = "memory", "Creating memory preference backend");
        }
        other => {
            tracing::warn!(
                backend = %other,
                "Unknown preference backend requested, falling back to memory"
            );
        }
    }

    Arc::new(MemoryPreferenceStore::new())
}
