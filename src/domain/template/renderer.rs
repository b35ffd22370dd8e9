use async_trait::async_trait;

use super::types::TemplateResult;

/// Variables substituted into a template
pub type TemplateVariables = serde_json::Map<String, serde_json::Value>;

/// Renders a template by ID into message text.
///
/// Implementations must fail explicitly when the template does not exist
/// or cannot be rendered; they never return partial output.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render(&self, template_id: &str, variables: &TemplateVariables) -> TemplateResult<String>;
}
