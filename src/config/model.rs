//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML. Every field has a
//! sensible default so the site renders out of the box with no config file.

use crate::content::SiteContent;
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub site: SiteContent,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Scroll units per terminal row.
    #[serde(default = "default_row_height")]
    pub row_height: u32,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    #[serde(default = "default_scroll_step")]
    pub scroll_step: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            dark_mode: true,
            notification_secs: default_notification_secs(),
            scroll_step: default_scroll_step(),
        }
    }
}

/// Navigation bar visibility thresholds, in scroll units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(default = "default_fade_window")]
    pub fade_window: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            fade_window: default_fade_window(),
        }
    }
}

/// Contact form delivery settings.
///
/// Without `service_id`, `template_id` and `public_key` messages are only
/// logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_recipient")]
    pub recipient: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_dry_run_latency_ms")]
    pub dry_run_latency_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
            endpoint: default_endpoint(),
            service_id: None,
            template_id: None,
            public_key: None,
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            dry_run_latency_ms: default_dry_run_latency_ms(),
        }
    }
}

/// Diagnostic log file settings. The terminal belongs to the UI, so logs only
/// ever go to a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_row_height() -> u32 {
    10
}
fn default_notification_secs() -> u64 {
    5
}
fn default_scroll_step() -> u16 {
    3
}
fn default_threshold() -> u32 {
    50
}
fn default_fade_window() -> u32 {
    100
}
fn default_recipient() -> String {
    "contact@example.com".to_string()
}
fn default_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_attempts() -> u32 {
    3
}
fn default_dry_run_latency_ms() -> u64 {
    600
}
fn default_log_dir() -> String {
    "~/.local/share/folio/logs".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
