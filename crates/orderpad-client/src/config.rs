//! # Client Configuration
//!
//! Settings for the backend connection, list caching and this device.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ORDERPAD_API_URL=https://pos.example.com                           │
//! │     ORDERPAD_CACHE_WINDOW_MS=60000                                     │
//! │                                                                         │
//! │  2. TOML Settings File (written by the settings screen)                │
//! │     ~/.config/orderpad/settings.toml (Linux)                           │
//! │     ~/Library/Application Support/com.orderpad.orderpad/ (macOS)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:5000, 30 s timeout, 30 s freshness window         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settings File Format
//! ```toml
//! [api]
//! base_url = "https://pos.example.com"
//! timeout_secs = 30
//!
//! [cache]
//! freshness_window_ms = 30000
//! error_title = "Error"
//!
//! [device]
//! name = "Waiter Tablet 3"
//! default_order_type = "dine_in"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use orderpad_core::{OrderType, DEFAULT_FRESHNESS_WINDOW_MS};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Longest request timeout the settings screen accepts.
pub const MAX_TIMEOUT_SECS: u64 = 300;

// =============================================================================
// API Settings
// =============================================================================

/// Connection to the POS backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Root URL of the backend. Endpoint paths are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("orderpad/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Cache Settings
// =============================================================================

/// How cached lists behave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// A repeat load within this many milliseconds of the last successful
    /// one is served from memory.
    #[serde(default = "default_freshness_window")]
    pub freshness_window_ms: u64,

    /// Title of the error shown when a manual refresh fails.
    #[serde(default = "default_error_title")]
    pub error_title: String,

    /// Shown when a failed load has no message of its own.
    #[serde(default = "default_error_message")]
    pub default_error_message: String,
}

fn default_freshness_window() -> u64 {
    DEFAULT_FRESHNESS_WINDOW_MS
}

fn default_error_title() -> String {
    "Error".to_string()
}

fn default_error_message() -> String {
    "Failed to load data".to_string()
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            freshness_window_ms: default_freshness_window(),
            error_title: default_error_title(),
            default_error_message: default_error_message(),
        }
    }
}

impl CacheSettings {
    pub fn freshness_window(&self) -> Duration {
        Duration::from_millis(self.freshness_window_ms)
    }
}

// =============================================================================
// Device Settings
// =============================================================================

/// Settings for this terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSettings {
    /// Human-readable device name (e.g., "Waiter Tablet 3").
    #[serde(default = "default_device_name")]
    pub name: String,

    /// Order type preselected on the order-type screen.
    #[serde(default)]
    pub default_order_type: OrderType,
}

fn default_device_name() -> String {
    "OrderPad Terminal".to_string()
}

impl Default for DeviceSettings {
    fn default() -> Self {
        DeviceSettings {
            name: default_device_name(),
            default_order_type: OrderType::default(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiSettings,

    /// Cached list behavior.
    #[serde(default)]
    pub cache: CacheSettings,

    /// This device.
    #[serde(default)]
    pub device: DeviceSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Settings file (settings.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        Self::load_from(config_path, |key| std::env::var(key).ok())
    }

    /// [`ClientConfig::load`] with an explicit variable lookup.
    pub fn load_from<F>(config_path: Option<PathBuf>, lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::read_file(config_path)?;
        config.apply_overrides_from(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Reads the settings file alone: no environment, no validation.
    ///
    /// This is what the settings screen edits, so a file holding a bad
    /// value can still be opened and corrected.
    pub fn read_file(config_path: Option<PathBuf>) -> ClientResult<Self> {
        match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading settings from file");
                let contents = std::fs::read_to_string(&path)?;
                Ok(toml::from_str(&contents)?)
            }
            Some(path) => {
                debug!(?path, "Settings file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load settings: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No settings path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Settings saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.base_url()?;

        if self.api.timeout_secs == 0 || self.api.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ClientError::InvalidConfig(format!(
                "timeout_secs must be between 1 and {}, got {}",
                MAX_TIMEOUT_SECS, self.api.timeout_secs
            )));
        }

        if self.api.user_agent.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "user_agent must not be empty".into(),
            ));
        }

        if self.cache.default_error_message.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "default_error_message must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Parsed backend URL, always ending in `/` so relative endpoint paths
    /// resolve underneath it.
    pub fn base_url(&self) -> ClientResult<Url> {
        parse_base_url(&self.api.base_url)
    }

    /// Applies `ORDERPAD_*` overrides using `lookup` to read variables.
    ///
    /// Unparseable numbers and order types are ignored with a warning.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ORDERPAD_API_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("ORDERPAD_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid ORDERPAD_TIMEOUT_SECS"),
            }
        }

        if let Some(window) = lookup("ORDERPAD_CACHE_WINDOW_MS") {
            match window.parse::<u64>() {
                Ok(ms) => {
                    debug!(window_ms = ms, "Overriding freshness window from environment");
                    self.cache.freshness_window_ms = ms;
                }
                Err(_) => warn!(value = %window, "Ignoring invalid ORDERPAD_CACHE_WINDOW_MS"),
            }
        }

        if let Some(name) = lookup("ORDERPAD_DEVICE_NAME") {
            self.device.name = name;
        }

        if let Some(order_type) = lookup("ORDERPAD_ORDER_TYPE") {
            match order_type.parse() {
                Ok(parsed) => self.device.default_order_type = parsed,
                Err(_) => warn!(value = %order_type, "Unknown order type in environment"),
            }
        }
    }

    /// Returns the default settings file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "orderpad", "orderpad")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }
}

/// Parses a backend URL and normalizes it to end with `/`.
pub fn parse_base_url(raw: &str) -> ClientResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("backend URL is empty".into()));
    }

    let mut url = Url::parse(trimmed)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "backend URL must start with http:// or https://, got: {}",
            trimmed
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
