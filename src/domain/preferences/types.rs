//! Preference record type

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::resolver::{self, normalize_channel};

fn enabled() -> bool {
    true
}

/// A user's notification channel preferences.
///
/// Override keys are always stored lowercase, whichever path they arrive
/// through, so `"Email"` and `"email"` name the same override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Owning user
    pub user_id: String,

    #[serde(default = "enabled")]
    pub email_enabled: bool,

    #[serde(default = "enabled")]
    pub sms_enabled: bool,

    #[serde(default = "enabled")]
    pub push_enabled: bool,

    /// Per-channel overrides, taking precedence over the named toggles
    #[serde(default, deserialize_with = "deserialize_overrides")]
    channel_overrides: HashMap<String, bool>,
}

impl NotificationPreferences {
    /// Default record for a user: every channel enabled, no overrides
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email_enabled: true,
            sms_enabled: true,
            push_enabled: true,
            channel_overrides: HashMap::new(),
        }
    }

    pub fn with_email_enabled(mut self, enabled: bool) -> Self {
        self.email_enabled = enabled;
        self
    }

    pub fn with_sms_enabled(mut self, enabled: bool) -> Self {
        self.sms_enabled = enabled;
        self
    }

    pub fn with_push_enabled(mut self, enabled: bool) -> Self {
        self.push_enabled = enabled;
        self
    }

    /// Add an override for a channel
    pub fn with_override(mut self, channel: &str, enabled: bool) -> Self {
        self.set_override(channel, enabled);
        self
    }

    /// Set or replace the override for a channel
    pub fn set_override(&mut self, channel: &str, enabled: bool) {
        self.channel_overrides
            .insert(normalize_channel(channel), enabled);
    }

    /// Remove the override for a channel, returning its previous value
    pub fn remove_override(&mut self, channel: &str) -> Option<bool> {
        self.channel_overrides.remove(&normalize_channel(channel))
    }

    /// Override for a channel, if one is set
    pub fn override_for(&self, channel: &str) -> Option<bool> {
        self.channel_overrides
            .get(&normalize_channel(channel))
            .copied()
    }

    /// All overrides, keyed by lowercase channel name
    pub fn overrides(&self) -> &HashMap<String, bool> {
        &self.channel_overrides
    }

    /// Whether the channel is enabled for this user
    pub fn is_channel_enabled(&self, channel: &str) -> bool {
        resolver::is_channel_enabled(self, channel)
    }
}

/// Lowercase incoming override keys. Keys that collide after lowercasing
/// resolve to enabled if any of them is enabled.
fn deserialize_overrides<'de, D>(deserializer: D) -> Result<HashMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, bool>::deserialize(deserializer)?;
    let mut overrides = HashMap::with_capacity(raw.len());
    for (channel, enabled) in raw {
        overrides
            .entry(normalize_channel(&channel))
            .and_modify(|current: &mut bool| *current |= enabled)
            .or_insert(enabled);
    }
    Ok(overrides)
}
