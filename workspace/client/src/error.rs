use compute::ComputeError;
use thiserror::Error;

/// Error types for requests against the account API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    /// The body was not the expected JSON envelope
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The account list came back empty
    #[error("No account returned by the API")]
    NoAccount,
}

/// Failure of one of the two dashboard loading steps
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to fetch account data: {0}")]
    AccountFetchFailed(#[source] ClientError),

    #[error("Failed to fetch transactions: {0}")]
    StatementFetchFailed(#[source] ClientError),

    /// The statement was fetched but its amounts cannot be aggregated
    #[error("Failed to compute dashboard: {0}")]
    ComputeFailed(#[from] ComputeError),
}

impl DashboardError {
    /// Stable machine-readable code for API error responses.
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::AccountFetchFailed(_) => "ACCOUNT_FETCH_FAILED",
            DashboardError::StatementFetchFailed(_) => "STATEMENT_FETCH_FAILED",
            DashboardError::ComputeFailed(_) => "COMPUTE_FAILED",
        }
    }
}

/// Type alias for Result with ClientError
pub type Result<T> = std::result::Result<T, ClientError>;
