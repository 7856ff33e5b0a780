use anyhow::{anyhow, Result};
use chrono::Utc;
use client::{load_dashboard, ApiClient, DashboardOptions};
use tracing::{debug, error, info};

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::render::{render_dashboard, RenderOptions};

pub async fn dashboard(settings: &Settings, format: OutputFormat) -> Result<()> {
    debug!("Account API: {}", settings.api_base_url);

    let token = settings
        .api_token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| anyhow!("No API token configured; pass --token or set API_TOKEN"))?;

    let client = ApiClient::new(settings.api_base_url.as_str(), token);
    let options = DashboardOptions {
        now: Utc::now(),
        window_days: settings.window_days,
    };

    let view = match load_dashboard(&client, &options).await {
        Ok(view) => view,
        Err(e) => {
            error!("Failed to load dashboard: {}", e);
            return Err(e.into());
        }
    };
    info!("Dashboard loaded with {} transactions", view.transactions.len());

    match format {
        OutputFormat::Text => {
            let render_options = RenderOptions {
                recent_limit: settings.recent_limit,
                currency_symbol: settings.currency_symbol.clone(),
            };
            print!("{}", render_dashboard(&view, &render_options));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}
