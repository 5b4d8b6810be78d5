//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Cookie store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Cookie jar persistence configuration.
    #[serde(default)]
    pub jar: JarConfig,
    /// Exchange-rate cache configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Demo behaviour.
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Cookie store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Prefix every managed cookie name starts with.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Cookie path attribute.
    #[serde(default = "default_path")]
    pub path: String,
    /// Days until a written cookie expires.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,
    /// Maximum size of one encoded `name=value` pair, in bytes.
    #[serde(default = "default_max_cookie_bytes")]
    pub max_cookie_bytes: usize,
    /// Maximum number of cookies the jar accepts.
    #[serde(default = "default_max_cookies")]
    pub max_cookies: usize,
}

impl StoreConfig {
    /// Checks that `expiry_days` is within `1..=MAX_EXPIRY_DAYS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the offending value.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if (1..=MAX_EXPIRY_DAYS).contains(&self.expiry_days) {
            Ok(())
        } else {
            Err(config::ConfigError::Message(format!(
                "store.expiry_days must be between 1 and {MAX_EXPIRY_DAYS}, got {}",
                self.expiry_days
            )))
        }
    }
}

/// Longest cookie lifetime browsers honour, in days.
pub const MAX_EXPIRY_DAYS: i64 = 400;

fn default_prefix() -> String {
    "expapp_".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

fn default_expiry_days() -> i64 {
    30
}

fn default_max_cookie_bytes() -> usize {
    4096
}

fn default_max_cookies() -> usize {
    180
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            path: default_path(),
            expiry_days: default_expiry_days(),
            max_cookie_bytes: default_max_cookie_bytes(),
            max_cookies: default_max_cookies(),
        }
    }
}

/// Cookie jar persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JarConfig {
    /// File the command-line tools persist the jar to.
    #[serde(default = "default_jar_path")]
    pub path: PathBuf,
}

fn default_jar_path() -> PathBuf {
    PathBuf::from("expapp.cookies")
}

impl Default for JarConfig {
    fn default() -> Self {
        Self {
            path: default_jar_path(),
        }
    }
}

/// Exchange-rate cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Hours a cached rate table counts as fresh.
    #[serde(default = "default_rates_ttl_hours")]
    pub ttl_hours: i64,
}

fn default_rates_ttl_hours() -> i64 {
    12
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_rates_ttl_hours(),
        }
    }
}

/// Demo behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Print the demo notice on every start.
    #[serde(default = "default_show_notice")]
    pub show_notice: bool,
}

fn default_show_notice() -> bool {
    true
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            show_notice: default_show_notice(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `EXPAPP__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or a value is out of range.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("EXPAPP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.store.validate()?;
        Ok(config)
    }
}
