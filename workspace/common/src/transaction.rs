use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::converters::{flexible_timestamp, string_or_number};

/// Direction of a transaction as reported by the statement API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "Credit",
            TransactionType::Debit => "Debit",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single statement entry.
///
/// `value` is signed: credits are positive, debits are already negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "flexible_timestamp")]
    pub date: DateTime<Utc>,
    pub value: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Counterparty of the transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        date: DateTime<Utc>,
        value: Decimal,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            value,
            kind,
            to: None,
        }
    }

    pub fn with_recipient(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Recipient of the transaction, treating an empty string as absent.
    pub fn recipient(&self) -> Option<&str> {
        self.to.as_deref().filter(|to| !to.is_empty())
    }

    pub fn is_credit(&self) -> bool {
        self.kind == TransactionType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TransactionType::Debit
    }
}

/// Account reference returned by `GET /account`. Only the id is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountList {
    #[serde(default)]
    pub account: Vec<AccountSummary>,
}

/// Body of `GET /account`: `{ "result": { "account": [...] } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountEnvelope {
    pub result: AccountList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementList {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Body of `GET /account/{id}/statement`: `{ "result": { "transactions": [...] } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementEnvelope {
    pub result: StatementList,
}
