//! Notification template system.
//!
//! This module provides:
//! - The [`TemplateRenderer`] port consumed by the channel services
//! - Template definitions with variable placeholders ({{variable}})
//! - [`TemplateEngine`]: in-memory templates with an optional directory fallback
//!
//! # Example
//!
//! ```ignore
//! let engine = TemplateEngine::new();
//!
//! engine.create(NotificationTemplate::new(
//!     "order-shipped",
//!     "Order {{order_id}} is on its way via {{carrier}}",
//! ))?;
//!
//! let mut variables = serde_json::Map::new();
//! variables.insert("order_id".into(), json!("ORD-123"));
//! variables.insert("carrier".into(), json!("FedEx"));
//!
//! let body = engine.render("order-shipped", &variables).await?;
//! ```

mod engine;
mod renderer;
mod substitution;
mod types;

use std::sync::Arc;

use crate::config::TemplateConfig;

pub use engine::TemplateEngine;
pub use renderer::{TemplateRenderer, TemplateVariables};
pub use substitution::substitute_variables;
pub use types::{NotificationTemplate, TemplateError, TemplateResult};

/// Create an Arc-wrapped template engine from configuration
pub fn create_template_engine(settings: &TemplateConfig) -> Arc<TemplateEngine> {
    let engine = match &settings.directory {
        Some(directory) => {
            tracing::info!(
                directory = %directory,
                extension = %settings.extension,
                "Template engine initialized with directory fallback"
            );
            TemplateEngine::with_directory(directory, &settings.extension)
        }
        None => {
            tracing::info!("Template engine initialized (memory only)");
            TemplateEngine::new()
        }
    };
    Arc::new(engine)
}
