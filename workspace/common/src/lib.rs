//! Common transport-layer types shared between the upstream API client,
//! the aggregation code and the dashboard service.
//! The upstream envelopes mirror the remote account/statement API so both the
//! client and the test stubs can (de)serialize them without duplicating shapes.

pub mod converters;
mod dashboard;
mod transaction;

pub use dashboard::{ChartEntry, DashboardView, ExpenseEntry};
pub use transaction::{
    AccountEnvelope, AccountList, AccountSummary, StatementEnvelope, StatementList, Transaction,
    TransactionType,
};
