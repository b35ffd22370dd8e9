//! Domain layer modules
//!
//! This module contains business domain logic:
//! - `preferences`: Per-user channel enablement and resolution
//! - `template`: Notification body templates

pub mod preferences;
pub mod template;
