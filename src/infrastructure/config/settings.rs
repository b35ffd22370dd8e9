use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;

use crate::error::{NotificationError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub otel: OtelConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    /// Storage backend for user preferences ("memory")
    #[serde(default = "default_preferences_backend")]
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    /// Directory searched for templates not registered in memory
    #[serde(default)]
    pub directory: Option<String>,
    /// File extension appended to template IDs when loading from disk
    #[serde(default = "default_template_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtelConfig {
    #[serde(default)]
    pub enabled: bool,
    /// OTLP gRPC endpoint
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Trace sampling ratio (0.0-1.0)
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispatchConfig {
    /// Sender address used when an email request leaves `from` blank
    #[serde(default)]
    pub default_from: Option<String>,
}

fn default_preferences_backend() -> String {
    "memory".to_string()
}

fn default_template_extension() -> String {
    "tmpl".to_string()
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "notification-facade".to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

impl Settings {
    pub fn new() -> Result<Self> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("preferences.backend", "memory")?
            .set_default("templates.extension", "tmpl")?
            .set_default("otel.enabled", false)?
            .set_default("otel.endpoint", "http://localhost:4317")?
            .set_default("otel.service_name", "notification-facade")?
            .set_default("otel.sampling_ratio", 1.0)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Section and key are joined by `__`: DISPATCH__DEFAULT_FROM, OTEL__SAMPLING_RATIO
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.otel.sampling_ratio) {
            return Err(NotificationError::Validation(format!(
                "otel.sampling_ratio must be within 0.0-1.0, got {}",
                self.otel.sampling_ratio
            )));
        }

        if self.templates.extension.trim().is_empty() {
            return Err(NotificationError::Validation(
                "templates.extension must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            backend: default_preferences_backend(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            directory: None,
            extension: default_template_extension(),
        }
    }
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
        }
    }
}
