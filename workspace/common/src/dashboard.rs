use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::transaction::Transaction;

/// Named value for a chart series (bar chart bucket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartEntry {
    pub name: String,
    pub value: Decimal,
}

impl ChartEntry {
    pub fn new(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Debit amount accumulated for one recipient inside the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExpenseEntry {
    pub recipient: String,
    /// Positive sum of the debits sent to this recipient
    pub value: Decimal,
    /// Percentage of all recipient expenses, rounded to two decimal places
    pub share: Decimal,
}

/// Display-ready aggregate of one account statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    /// Instant the window was computed against
    pub generated_at: DateTime<Utc>,
    /// Length of the recent window in days
    pub window_days: i64,
    /// Sum of every transaction value
    pub balance: Decimal,
    /// Whole statement, newest first
    pub transactions: Vec<Transaction>,
    /// Transactions inside the window, newest first
    pub recent_transactions: Vec<Transaction>,
    pub credit_total: Decimal,
    pub debit_total: Decimal,
    /// `[Credits, Debits]` series for the bar chart
    pub credit_debit: Vec<ChartEntry>,
    /// Recipients in first-seen order
    pub expense_by_recipient: Vec<ExpenseEntry>,
}

impl DashboardView {
    /// The `limit` newest transactions of the statement.
    pub fn latest(&self, limit: usize) -> &[Transaction] {
        let end = limit.min(self.transactions.len());
        &self.transactions[..end]
    }

    pub fn is_balance_negative(&self) -> bool {
        self.balance.is_sign_negative() && !self.balance.is_zero()
    }

    pub fn expense_for(&self, recipient: &str) -> Option<Decimal> {
        self.expense_by_recipient
            .iter()
            .find(|entry| entry.recipient == recipient)
            .map(|entry| entry.value)
    }
}
