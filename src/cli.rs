use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use compute::dashboard::MAX_WINDOW_DAYS;
use config::ConfigError;

pub mod commands;

use crate::config::Settings;
use commands::{dashboard, serve};

/// Output format of the `dashboard` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable cards, list and charts
    Text,
    /// The computed dashboard as pretty-printed JSON
    Json,
}

#[derive(Parser)]
#[command(name = "finpanel")]
#[command(about = "Personal finance dashboard over a remote account API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,

        /// Base URL of the account API (e.g., https://bank.example.com/api)
        #[arg(long)]
        api_base_url: Option<String>,
    },
    /// Load the dashboard once and print it
    ///
    /// Fetches the first account of the token owner and its statement,
    /// then prints the balance, the latest transactions and the
    /// credit/debit and expense charts for the recent window.
    Dashboard {
        /// Base URL of the account API
        #[arg(long)]
        api_base_url: Option<String>,

        /// Bearer token for the account API (defaults to API_TOKEN)
        #[arg(short, long)]
        token: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Number of latest transactions to list
        #[arg(long)]
        recent: Option<usize>,

        /// Length of the recent window in days
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..=MAX_WINDOW_DAYS))]
        window_days: Option<i64>,
    },
}

impl Commands {
    /// Applies the command line overrides on top of the loaded settings and
    /// validates the result.
    fn apply_overrides(&self, mut settings: Settings) -> Result<Settings, ConfigError> {
        match self {
            Commands::Serve { bind_address, api_base_url } => {
                if let Some(bind_address) = bind_address {
                    settings.bind_address = bind_address.clone();
                }
                if let Some(api_base_url) = api_base_url {
                    settings.api_base_url = api_base_url.clone();
                }
            }
            Commands::Dashboard { api_base_url, token, recent, window_days, .. } => {
                if let Some(api_base_url) = api_base_url {
                    settings.api_base_url = api_base_url.clone();
                }
                if token.is_some() {
                    settings.api_token = token.clone();
                }
                if let Some(recent) = recent {
                    settings.recent_limit = *recent;
                }
                if let Some(window_days) = window_days {
                    settings.window_days = *window_days;
                }
            }
        }
        settings.validate()?;
        Ok(settings)
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let settings = self.command.apply_overrides(Settings::load()?)?;

        match self.command {
            Commands::Serve { .. } => serve(settings).await?,
            Commands::Dashboard { format, .. } => dashboard(&settings, format).await?,
        }
        Ok(())
    }
}
