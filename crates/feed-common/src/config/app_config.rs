//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).
//! Timing defaults mirror the reference deployment: 24 h item TTL, 10 s feed
//! refresh, 500 ms double-tap window, 300 ms single-tap settle, 1 s reaction
//! flash, 50 % focus visibility threshold.

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub backend: BackendConfig,
    pub feed: FeedConfig,
    pub viewport: ViewportConfig,
    pub gesture: GestureConfig,
    pub engagement: EngagementConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Hosted backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl BackendConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Feed lifetime and refresh configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
    #[serde(default = "default_refresh_seconds")]
    pub refresh_seconds: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl FeedConfig {
    /// Item time-to-live as a chrono duration
    #[must_use]
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours)
    }

    /// Background refresh cadence
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_seconds)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            refresh_seconds: default_refresh_seconds(),
            page_size: default_page_size(),
        }
    }
}

/// Viewport focus configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ViewportConfig {
    /// Fraction of an element that must be visible before it can take focus
    #[serde(default = "default_focus_threshold")]
    pub focus_threshold: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            focus_threshold: default_focus_threshold(),
        }
    }
}

/// Gesture timing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GestureConfig {
    #[serde(default = "default_double_tap_ms")]
    pub double_tap_ms: u64,
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default = "default_flash_ms")]
    pub flash_ms: u64,
}

impl GestureConfig {
    /// Window within which a second tap upgrades to a double-tap
    #[must_use]
    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_ms)
    }

    /// Delay after the window closes before the single-tap commits
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Lifetime of the transient double-tap acknowledgment
    #[must_use]
    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_ms: default_double_tap_ms(),
            settle_ms: default_settle_ms(),
            flash_ms: default_flash_ms(),
        }
    }
}

/// View-tracking policy
///
/// The reference deployment records a view on every focus gain; sessions that
/// prefer unique-reach style counting can dedup per viewer session instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewPolicy {
    #[default]
    EveryFocus,
    OncePerSession,
}

impl std::str::FromStr for ViewPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "every_focus" => Ok(Self::EveryFocus),
            "once_per_session" => Ok(Self::OncePerSession),
            _ => Err(format!("Invalid view policy: {s}")),
        }
    }
}

/// Engagement tracking configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EngagementConfig {
    #[serde(default)]
    pub view_policy: ViewPolicy,
}

// Default value functions
fn default_app_name() -> String {
    "campus-feed".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_request_timeout() -> u64 {
    10
}

fn default_ttl_hours() -> i64 {
    24
}

fn default_refresh_seconds() -> u64 {
    10
}

fn default_page_size() -> usize {
    50
}

fn default_focus_threshold() -> f32 {
    0.5
}

fn default_double_tap_ms() -> u64 {
    500
}

fn default_settle_ms() -> u64 {
    300
}

fn default_flash_ms() -> u64 {
    1000
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            backend: BackendConfig {
                base_url: env::var("BACKEND_BASE_URL")
                    .map_err(|_| ConfigError::MissingVar("BACKEND_BASE_URL"))?,
                api_key: env::var("BACKEND_API_KEY").ok(),
                request_timeout_seconds: env::var("BACKEND_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_request_timeout),
            },
            feed: FeedConfig {
                ttl_hours: env::var("FEED_TTL_HOURS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_ttl_hours),
                refresh_seconds: env::var("FEED_REFRESH_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_refresh_seconds),
                page_size: env::var("FEED_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_page_size),
            },
            viewport: ViewportConfig {
                focus_threshold: env::var("FEED_FOCUS_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_focus_threshold),
            },
            gesture: GestureConfig {
                double_tap_ms: env::var("FEED_DOUBLE_TAP_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_double_tap_ms),
                settle_ms: env::var("FEED_SETTLE_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_settle_ms),
                flash_ms: env::var("FEED_FLASH_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_flash_ms),
            },
            engagement: EngagementConfig {
                view_policy: env::var("FEED_VIEW_POLICY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
