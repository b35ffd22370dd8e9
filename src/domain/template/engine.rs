//! Built-in template engine with in-memory storage

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::metrics::TemplateMetrics;

use super::renderer::{TemplateRenderer, TemplateVariables};
use super::substitution::substitute_variables;
use super::types::{validate_id, NotificationTemplate, TemplateError, TemplateResult};

/// Template engine backed by an in-memory map, optionally falling back to
/// `<directory>/<id>.<extension>` files for IDs that were never registered.
pub struct TemplateEngine {
    templates: DashMap<String, NotificationTemplate>,
    directory: Option<PathBuf>,
    extension: String,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Create an engine that only serves registered templates
    pub fn new() -> Self {
        Self {
            templates: DashMap::new(),
            directory: None,
            extension: "tmpl".to_string(),
        }
    }

    /// Create an engine that also loads templates from `directory`
    pub fn with_directory(directory: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            templates: DashMap::new(),
            directory: Some(directory.into()),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Register a new template
    pub fn create(&self, template: NotificationTemplate) -> TemplateResult<NotificationTemplate> {
        template.validate()?;

        match self.templates.entry(template.id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(TemplateError::AlreadyExists(template.id))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(template.clone());
                Ok(template)
            }
        }
    }

    /// Get a registered template by ID
    pub fn get(&self, id: &str) -> TemplateResult<NotificationTemplate> {
        self.templates
            .get(id)
            .map(|t| t.clone())
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    /// List all registered templates
    pub fn list(&self) -> Vec<NotificationTemplate> {
        self.templates
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Replace the body of a registered template
    pub fn update(&self, id: &str, body: impl Into<String>) -> TemplateResult<NotificationTemplate> {
        let mut entry = self
            .templates
            .get_mut(id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;

        entry.body = body.into();
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Delete a registered template by ID
    pub fn delete(&self, id: &str) -> TemplateResult<()> {
        self.templates
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Template source for an ID: registered templates first, then the directory
    async fn load(&self, id: &str) -> TemplateResult<String> {
        if let Some(template) = self.templates.get(id) {
            return Ok(template.body.clone());
        }

        let Some(directory) = &self.directory else {
            return Err(TemplateError::NotFound(id.to_string()));
        };

        let suffix = format!(".{}", self.extension);
        let file_name = if id.ends_with(&suffix) {
            id.to_string()
        } else {
            format!("{}{}", id, suffix)
        };

        match tokio::fs::read_to_string(directory.join(file_name)).await {
            Ok(source) => Ok(source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TemplateError::NotFound(id.to_string()))
            }
            Err(e) => Err(TemplateError::Io {
                id: id.to_string(),
                source: e,
            }),
        }
    }
}

#[async_trait]
impl TemplateRenderer for TemplateEngine {
    #[tracing::instrument(name = "template.render", skip(self, variables))]
    async fn render(&self, template_id: &str, variables: &TemplateVariables) -> TemplateResult<String> {
        let rendered = async {
            validate_id(template_id)?;
            let source = self.load(template_id).await?;
            substitute_variables(&source, variables)
        }
        .await;

        match &rendered {
            Ok(_) => TemplateMetrics::record_success(),
            Err(e) => {
                TemplateMetrics::record_failure();
                tracing::error!(
                    template_id = %template_id,
                    error = %e,
                    "Failed to render template"
                );
            }
        }

        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, serde_json::Value)]) -> TemplateVariables {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_create_and_get() {
        let engine = TemplateEngine::new();
        engine
            .create(NotificationTemplate::new("welcome", "Hi {{name}}"))
            .unwrap();

        assert!(engine.exists("welcome"));
        assert_eq!(engine.get("welcome").unwrap().body, "Hi {{name}}");
        assert_eq!(engine.count(), 1);
    }

    #[test]
    fn test_create_duplicate() {
        let engine = TemplateEngine::new();
        let template = NotificationTemplate::new("duplicate", "body");

        engine.create(template.clone()).unwrap();
        assert!(matches!(
            engine.create(template),
            Err(TemplateError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_create_invalid_id() {
        let engine = TemplateEngine::new();
        assert!(matches!(
            engine.create(NotificationTemplate::new("bad id", "body")),
            Err(TemplateError::InvalidId(_))
        ));
    }

    #[test]
    fn test_update_and_delete() {
        let engine = TemplateEngine::new();
        engine
            .create(NotificationTemplate::new("reset", "Old"))
            .unwrap();

        let updated = engine.update("reset", "New {{code}}").unwrap();
        assert_eq!(updated.body, "New {{code}}");
        assert!(updated.updated_at >= updated.created_at);

        engine.delete("reset").unwrap();
        assert!(!engine.exists("reset"));
        assert!(matches!(engine.delete("reset"), Err(TemplateError::NotFound(_))));
        assert!(matches!(engine.update("reset", "x"), Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_list() {
        let engine = TemplateEngine::new();
        for i in 0..3 {
            engine
                .create(NotificationTemplate::new(format!("template-{}", i), "body"))
                .unwrap();
        }
        assert_eq!(engine.list().len(), 3);
    }

    #[tokio::test]
    async fn test_render_registered() {
        let engine = TemplateEngine::new();
        engine
            .create(NotificationTemplate::new("greeting", "Hi {{name}}"))
            .unwrap();

        let rendered = engine
            .render("greeting", &vars(&[("name", json!("Bob"))]))
            .await
            .unwrap();
        assert_eq!(rendered, "Hi Bob");
    }

    #[tokio::test]
    async fn test_render_missing_template() {
        let engine = TemplateEngine::new();
        let result = engine.render("nope", &TemplateVariables::new()).await;
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_render_missing_variable() {
        let engine = TemplateEngine::new();
        engine
            .create(NotificationTemplate::new("greeting", "Hi {{name}}"))
            .unwrap();

        let result = engine.render("greeting", &TemplateVariables::new()).await;
        assert!(matches!(result, Err(TemplateError::SubstitutionFailed(_))));
    }

    #[tokio::test]
    async fn test_render_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("order-shipped.tmpl"), "Order {{id}} shipped").unwrap();

        let engine = TemplateEngine::with_directory(dir.path(), ".tmpl");
        let variables = vars(&[("id", json!("ORD-9"))]);

        assert_eq!(
            engine.render("order-shipped", &variables).await.unwrap(),
            "Order ORD-9 shipped"
        );
        assert_eq!(
            engine.render("order-shipped.tmpl", &variables).await.unwrap(),
            "Order ORD-9 shipped"
        );
        assert!(matches!(
            engine.render("absent", &variables).await,
            Err(TemplateError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_registered_template_shadows_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("welcome.tmpl"), "From disk").unwrap();

        let engine = TemplateEngine::with_directory(dir.path(), "tmpl");
        engine
            .create(NotificationTemplate::new("welcome", "From memory"))
            .unwrap();

        assert_eq!(
            engine.render("welcome", &TemplateVariables::new()).await.unwrap(),
            "From memory"
        );
    }

    #[tokio::test]
    async fn test_render_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::with_directory(dir.path(), "tmpl");

        let result = engine.render("../etc/passwd", &TemplateVariables::new()).await;
        assert!(matches!(result, Err(TemplateError::InvalidId(_))));
    }
}
