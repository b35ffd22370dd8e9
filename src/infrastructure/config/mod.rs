mod settings;

pub use settings::{DispatchConfig, OtelConfig, PreferencesConfig, Settings, TemplateConfig};
