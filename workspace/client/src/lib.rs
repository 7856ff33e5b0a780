//! HTTP client for the remote account API and the dashboard loading flow
//! built on top of it.

pub mod dashboard;
pub mod error;
pub mod source;

#[cfg(test)]
mod testing;

pub use dashboard::{load_dashboard, DashboardOptions};
pub use error::{ClientError, DashboardError};
pub use source::AccountSource;

use common::{AccountEnvelope, AccountSummary, StatementEnvelope, Transaction};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use std::fmt;

use crate::error::Result;

/// Bearer-authenticated client for the account API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, token)
    }

    /// Builds a client on top of an existing connection pool.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    /// Common GET request handler
    async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("GET request to: {}", url);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("GET {} - Request failed: {}", endpoint, e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("GET {} - HTTP error: {}", endpoint, status);
            return Err(crate::ClientError::Status(status));
        }

        tracing::trace!("GET {} - Response received, parsing JSON", endpoint);
        let body = response.bytes().await?;
        let parsed = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("GET {} - Failed to parse response: {}", endpoint, e);
            e
        })?;

        tracing::info!("GET {} - Success", endpoint);
        Ok(parsed)
    }

    /// Lists the accounts visible to the token.
    pub async fn accounts(&self) -> Result<Vec<AccountSummary>> {
        tracing::trace!("Fetching accounts");
        let envelope: AccountEnvelope = self.get("/account").await?;
        tracing::info!("Fetched {} accounts", envelope.result.account.len());
        Ok(envelope.result.account)
    }

    /// Fetches the full statement of an account.
    pub async fn statement(&self, account_id: &str) -> Result<Vec<Transaction>> {
        tracing::trace!("Fetching statement for account ID: {}", account_id);
        let envelope: StatementEnvelope = self
            .get(&format!("/account/{}/statement", account_id))
            .await?;
        tracing::info!(
            "Fetched {} transactions for account ID: {}",
            envelope.result.transactions.len(),
            account_id
        );
        Ok(envelope.result.transactions)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
