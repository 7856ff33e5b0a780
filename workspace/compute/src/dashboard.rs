use chrono::{DateTime, TimeDelta, Utc};
use common::{ChartEntry, DashboardView, ExpenseEntry, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};

use crate::error::{ComputeError, Result};

/// Default length of the recent window, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Longest accepted window, roughly a century.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

pub const CREDITS_LABEL: &str = "Credits";
pub const DEBITS_LABEL: &str = "Debits";

/// A computer that turns an account statement into the dashboard aggregates.
///
/// It computes the balance over the whole statement, and the credit/debit
/// split plus the expense distribution over the transactions dated within
/// `window_days` of `now`.
#[derive(Debug, Clone)]
pub struct DashboardComputer {
    now: DateTime<Utc>,
    window_days: i64,
}

impl DashboardComputer {
    /// Creates a computer anchored at `now` with the default 30 day window.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Sets the window length, clamped to `0..=MAX_WINDOW_DAYS`.
    pub fn with_window_days(mut self, window_days: i64) -> Self {
        let clamped = window_days.clamp(0, MAX_WINDOW_DAYS);
        if clamped != window_days {
            debug!("Window of {} days clamped to {}", window_days, clamped);
        }
        self.window_days = clamped;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    /// Oldest instant still inside the window.
    ///
    /// Saturates at the earliest representable instant.
    pub fn window_start(&self) -> DateTime<Utc> {
        TimeDelta::try_days(self.window_days)
            .and_then(|window| self.now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether the transaction falls in the window. The start is inclusive.
    pub fn in_window(&self, transaction: &Transaction) -> bool {
        transaction.date >= self.window_start()
    }

    /// Computes the dashboard aggregates for a statement.
    ///
    /// # Arguments
    ///
    /// * `transactions` - The statement as returned by the API. Its order is
    ///   kept when grouping expenses, so recipients appear in first-seen order.
    ///
    /// # Returns
    ///
    /// A `DashboardView` whose transaction lists are sorted newest first, or
    /// `ComputeError::Overflow` when an amount total does not fit a `Decimal`.
    #[instrument(skip(self, transactions), fields(num_transactions = transactions.len(), window_days = self.window_days))]
    pub fn compute(&self, transactions: Vec<Transaction>) -> Result<DashboardView> {
        info!(
            "Computing dashboard for {} transactions since {}",
            transactions.len(),
            self.window_start()
        );

        let balance = balance(&transactions)?;

        let window: Vec<Transaction> = transactions
            .iter()
            .filter(|t| self.in_window(t))
            .cloned()
            .collect();

        debug!("Filtered to {} transactions within window", window.len());

        let (credit_total, debit_total) = credit_debit_totals(&window)?;
        let expense_by_recipient = with_shares(expense_by_recipient(&window)?)?;

        let mut recent_transactions = window;
        sort_newest_first(&mut recent_transactions);

        let mut transactions = transactions;
        sort_newest_first(&mut transactions);

        Ok(DashboardView {
            generated_at: self.now,
            window_days: self.window_days,
            balance,
            transactions,
            recent_transactions,
            credit_total,
            debit_total,
            credit_debit: vec![
                ChartEntry::new(CREDITS_LABEL, credit_total),
                ChartEntry::new(DEBITS_LABEL, debit_total),
            ],
            expense_by_recipient,
        })
    }
}

fn overflow(what: &'static str) -> ComputeError {
    let err = ComputeError::Overflow(what);
    error!(?err, "Amount overflow");
    err
}

/// Sorts transactions by date, newest first. Equal dates keep their order.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Sum of every transaction value.
pub fn balance(transactions: &[Transaction]) -> Result<Decimal> {
    transactions
        .iter()
        .try_fold(Decimal::ZERO, |total, t| total.checked_add(t.value))
        .ok_or_else(|| overflow("balance"))
}

/// Returns `(credits, debits)` where debits are reported as a positive amount.
pub fn credit_debit_totals<'a, I>(transactions: I) -> Result<(Decimal, Decimal)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(credits, debits), t| {
            if t.is_credit() {
                credits
                    .checked_add(t.value)
                    .map(|credits| (credits, debits))
                    .ok_or_else(|| overflow("credit total"))
            } else {
                debits
                    .checked_sub(t.value)
                    .map(|debits| (credits, debits))
                    .ok_or_else(|| overflow("debit total"))
            }
        })
}

/// Sums debits per recipient in first-seen order.
///
/// Debits without a recipient are skipped, credits are ignored.
pub fn expense_by_recipient<'a, I>(transactions: I) -> Result<Vec<(String, Decimal)>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<(String, Decimal)> = Vec::new();

    for transaction in transactions.into_iter().filter(|t| t.is_debit()) {
        let Some(recipient) = transaction.recipient() else {
            continue;
        };

        let expense = -transaction.value;
        match positions.get(recipient) {
            Some(&index) => {
                totals[index].1 = totals[index]
                    .1
                    .checked_add(expense)
                    .ok_or_else(|| overflow("expense by recipient"))?;
            }
            None => {
                positions.insert(recipient, totals.len());
                totals.push((recipient.to_string(), expense));
            }
        }
    }

    Ok(totals)
}

/// Attaches each recipient's percentage of the total expense, rounded to
/// two decimal places.
pub fn with_shares(totals: Vec<(String, Decimal)>) -> Result<Vec<ExpenseEntry>> {
    let total = totals
        .iter()
        .try_fold(Decimal::ZERO, |sum, (_, value)| sum.checked_add(*value))
        .ok_or_else(|| overflow("expense total"))?;

    totals
        .into_iter()
        .map(|(recipient, value)| -> Result<ExpenseEntry> {
            let share = share_of(value, total)
                .ok_or_else(|| overflow("expense share"))?
                .round_dp(2);
            Ok(ExpenseEntry {
                recipient,
                value,
                share,
            })
        })
        .collect()
}

/// Unrounded percentage of `total` that `value` represents. Zero when
/// `total` is zero.
pub fn share_of(value: Decimal, total: Decimal) -> Option<Decimal> {
    if total.is_zero() {
        return Some(Decimal::ZERO);
    }
    value
        .checked_div(total)?
        .checked_mul(Decimal::ONE_HUNDRED)
}
