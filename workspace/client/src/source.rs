use async_trait::async_trait;
use common::{AccountSummary, Transaction};

use crate::ApiClient;
use crate::error::Result;

/// Where the dashboard reads accounts and statements from.
#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Lists the accounts of the authenticated user.
    async fn accounts(&self) -> Result<Vec<AccountSummary>>;

    /// Fetches every transaction of one account.
    async fn statement(&self, account_id: &str) -> Result<Vec<Transaction>>;
}

#[async_trait]
impl AccountSource for ApiClient {
    async fn accounts(&self) -> Result<Vec<AccountSummary>> {
        ApiClient::accounts(self).await
    }

    async fn statement(&self, account_id: &str) -> Result<Vec<Transaction>> {
        ApiClient::statement(self, account_id).await
    }
}
