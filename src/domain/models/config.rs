use serde::{Deserialize, Serialize};

/// Main configuration structure for casegen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Generation Service connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Workflow behaviour
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generation Service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceConfig {
    /// Base URL the `/api/*` endpoints hang off
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://test-case-generator-api.onrender.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Workflow behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkflowConfig {
    /// Prefix of the file name proposed on submission
    #[serde(default = "default_file_name_prefix")]
    pub file_name_prefix: String,

    /// Extension (without dot) of the file name proposed on submission
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Fetch selected file contents in the background after each toggle
    #[serde(default = "default_preview_on_toggle")]
    pub preview_on_toggle: bool,
}

fn default_file_name_prefix() -> String {
    "test-case".to_string()
}

fn default_file_extension() -> String {
    "js".to_string()
}

const fn default_preview_on_toggle() -> bool {
    true
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            file_name_prefix: default_file_name_prefix(),
            file_extension: default_file_extension(),
            preview_on_toggle: default_preview_on_toggle(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for JSON log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Log file rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
