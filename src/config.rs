use compute::dashboard::MAX_WINDOW_DAYS;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime configuration.
///
/// Layered as: built-in defaults, then an optional `finpanel.toml` in the
/// working directory, then environment variables (`API_BASE_URL`,
/// `BIND_ADDRESS`, `WINDOW_DAYS`, `RECENT_LIMIT`, `CURRENCY_SYMBOL`,
/// `API_TOKEN`). Command line flags are applied on top by the CLI.
#[derive(Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Base URL of the remote account API
    pub api_base_url: String,
    /// Bind address for the web server
    pub bind_address: String,
    /// Length of the recent window in days
    pub window_days: i64,
    /// Number of transactions listed by the text dashboard
    pub recent_limit: usize,
    /// Prefix used when printing amounts
    pub currency_symbol: String,
    /// Bearer token used by the `dashboard` command
    pub api_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3333".to_string(),
            bind_address: "0.0.0.0:3000".to_string(),
            window_days: 30,
            recent_limit: 5,
            currency_symbol: "R$".to_string(),
            api_token: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_base_url", &self.api_base_url)
            .field("bind_address", &self.bind_address)
            .field("window_days", &self.window_days)
            .field("recent_limit", &self.recent_limit)
            .field("currency_symbol", &self.currency_symbol)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Settings {
    /// Load settings from `.env`, `finpanel.toml` and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(Environment::default())
    }

    /// Load settings with an explicit environment source
    pub fn load_from(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let settings: Settings = Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("bind_address", defaults.bind_address)?
            .set_default("window_days", defaults.window_days)?
            .set_default("recent_limit", defaults.recent_limit as i64)?
            .set_default("currency_symbol", defaults.currency_symbol)?
            .add_source(File::with_name("finpanel").required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        tracing::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Rejects values the dashboard cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(ConfigError::Message(format!(
                "window_days must be between 0 and {}, got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Message("api_base_url must not be empty".to_string()));
        }
        Ok(())
    }
}
