use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// No explicit timeout unless set; the HTTP stack's defaults apply.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Fixed highlight language for suggested code; the service never reports one.
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_idle_label")]
    pub idle_label: String,
    #[serde(default = "default_busy_label")]
    pub busy_label: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            idle_label: default_idle_label(),
            busy_label: default_busy_label(),
            theme: default_theme(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_language() -> String {
    "python".to_string()
}

fn default_idle_label() -> String {
    "Get Suggestion ✨".to_string()
}

fn default_busy_label() -> String {
    "Generating...".to_string()
}

fn default_theme() -> String {
    "base16-ocean.dark".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}
