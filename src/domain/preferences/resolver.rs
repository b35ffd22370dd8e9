//! Channel enablement resolution

use crate::notification::Channel;

use super::types::NotificationPreferences;

/// Canonical form of a channel name used for every comparison
pub fn normalize_channel(channel: &str) -> String {
    channel.to_lowercase()
}

/// Decide whether `channel` is enabled under `preferences`.
///
/// An override for the channel wins outright. Otherwise the named toggle
/// applies for email, SMS and push, and any other channel is enabled.
pub fn is_channel_enabled(preferences: &NotificationPreferences, channel: &str) -> bool {
    if let Some(enabled) = preferences.override_for(channel) {
        return enabled;
    }

    match Channel::from_name(channel) {
        Channel::Email => preferences.email_enabled,
        Channel::Sms => preferences.sms_enabled,
        Channel::Push => preferences.push_enabled,
        Channel::Custom(_) => true,
    }
}
