//! Template types and error definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid template ID: {0}")]
    InvalidId(String),

    #[error("Variable substitution failed: {0}")]
    SubstitutionFailed(String),

    #[error("Failed to load template {id}: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// A notification body template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationTemplate {
    /// Unique template identifier
    pub id: String,

    /// Body text with {{variable}} placeholders
    pub body: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl NotificationTemplate {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            body: body.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> TemplateResult<()> {
        validate_id(&self.id)
    }
}

/// Check a template ID: 1-64 characters of alphanumerics, dash, underscore
/// or dot, never `..` and never a leading dot.
pub(crate) fn validate_id(id: &str) -> TemplateResult<()> {
    if id.is_empty() || id.len() > 64 {
        return Err(TemplateError::InvalidId(
            "ID must be 1-64 characters".to_string(),
        ));
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(TemplateError::InvalidId(
            "ID must contain only alphanumeric, dash, underscore, or dot".to_string(),
        ));
    }

    if id.starts_with('.') || id.contains("..") {
        return Err(TemplateError::InvalidId(format!(
            "ID must not start with a dot or contain '..': {}",
            id
        )));
    }

    Ok(())
}
