use chrono::{DateTime, Utc};
use common::DashboardView;
use compute::dashboard::{DashboardComputer, DEFAULT_WINDOW_DAYS};
use tracing::{debug, error, info, instrument};

use crate::error::{ClientError, DashboardError};
use crate::source::AccountSource;

/// Parameters of one dashboard load.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    /// Instant the recent window is measured from
    pub now: DateTime<Utc>,
    pub window_days: i64,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            now: Utc::now(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Loads the dashboard of the first account visible to the source.
///
/// The statement request is only issued once the account list has been
/// fetched successfully, since it needs the account id.
#[instrument(skip(source))]
pub async fn load_dashboard<S>(
    source: &S,
    options: &DashboardOptions,
) -> Result<DashboardView, DashboardError>
where
    S: AccountSource + ?Sized,
{
    let accounts = source.accounts().await.map_err(|e| {
        error!("Failed to fetch accounts: {}", e);
        DashboardError::AccountFetchFailed(e)
    })?;

    let account = accounts.into_iter().next().ok_or_else(|| {
        error!("Account list is empty");
        DashboardError::AccountFetchFailed(ClientError::NoAccount)
    })?;
    debug!("Using account ID: {}", account.id);

    let transactions = source.statement(&account.id).await.map_err(|e| {
        error!("Failed to fetch statement for account {}: {}", account.id, e);
        DashboardError::StatementFetchFailed(e)
    })?;

    let view = DashboardComputer::new(options.now)
        .with_window_days(options.window_days)
        .compute(transactions)?;

    info!(
        "Dashboard loaded for account {} ({} transactions)",
        account.id,
        view.transactions.len()
    );
    Ok(view)
}
