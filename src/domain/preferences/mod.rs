//! User notification preferences.
//!
//! Each user has one [`NotificationPreferences`] record holding the three
//! named channel toggles plus free-form per-channel overrides. Lookups are
//! fail-open: a user without a record, or a channel nobody configured, is
//! treated as enabled.
//!
//! # Storage
//!
//! Records live behind the [`PreferenceStore`] trait so the resolver never
//! depends on a particular backing:
//!
//! - `MemoryPreferenceStore`: In-memory storage using DashMap (default)
//!
//! Use `create_preference_store()` to build the configured backend.

mod backend;
mod factory;
mod memory_backend;
mod resolver;
mod service;
mod types;

pub use backend::{PreferenceStore, PreferenceStoreError};
pub use factory::create_preference_store;
pub use memory_backend::MemoryPreferenceStore;
pub use resolver::{is_channel_enabled, normalize_channel};
pub use service::PreferenceService;
pub use types::NotificationPreferences;
