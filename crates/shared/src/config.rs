//! Application configuration management.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Exchange-rate provider and refresh configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Calculator configuration.
    #[serde(default)]
    pub calculator: CalculatorConfig,
}

/// Exchange-rate provider and refresh configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Endpoint prefix; the base currency code is appended to it.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upper bound for a single rate fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long the transient refresh message stays visible, in seconds.
    #[serde(default = "default_status_message_secs")]
    pub status_message_secs: u64,
    /// Delay before the eager fetch issued at startup, in milliseconds.
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,
    /// Initially selected source (base) currency.
    #[serde(default = "default_from")]
    pub default_from: String,
    /// Initially selected target currency.
    #[serde(default = "default_to")]
    pub default_to: String,
}

fn default_api_url() -> String {
    "https://api.exchangerate-api.com/v4/latest/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_status_message_secs() -> u64 {
    5
}

fn default_startup_delay_ms() -> u64 {
    1000
}

fn default_from() -> String {
    "USD".to_string()
}

fn default_to() -> String {
    "INR".to_string()
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            status_message_secs: default_status_message_secs(),
            startup_delay_ms: default_startup_delay_ms(),
            default_from: default_from(),
            default_to: default_to(),
        }
    }
}

impl RatesConfig {
    /// Fetch timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Transient message lifetime as a `Duration`.
    #[must_use]
    pub const fn status_message_ttl(&self) -> Duration {
        Duration::from_secs(self.status_message_secs)
    }

    /// Startup fetch delay as a `Duration`.
    #[must_use]
    pub const fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}

/// Calculator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorConfig {
    /// Mode selected at startup (`Basic`, `Scientific` or `Financial`).
    #[serde(default = "default_mode")]
    pub default_mode: String,
}

fn default_mode() -> String {
    "Basic".to_string()
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("ABACUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
