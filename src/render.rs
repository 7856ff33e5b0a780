//! Plain-text rendering of the dashboard: the balance card, the latest
//! transactions list, the credits-vs-debits bar chart and the expense
//! distribution chart.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use common::{DashboardView, Transaction};
use compute::dashboard::share_of;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

const BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '█';

/// Presentation options taken from the settings.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub recent_limit: usize,
    pub currency_symbol: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            currency_symbol: "R$".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{} {:.2}", self.currency_symbol, amount)
    }
}

/// Renders the whole dashboard as text.
pub fn render_dashboard(view: &DashboardView, options: &RenderOptions) -> String {
    let mut out = String::new();

    let title = "Financial Dashboard";
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.len()));
    let _ = writeln!(out);

    render_balance(&mut out, view, options);
    render_latest(&mut out, view, options);
    render_credit_debit(&mut out, view, options);
    render_expenses(&mut out, view, options);

    out
}

fn render_balance(out: &mut String, view: &DashboardView, options: &RenderOptions) {
    let status = if view.is_balance_negative() { "negative" } else { "positive" };
    let _ = writeln!(
        out,
        "Current balance: {} ({})",
        options.format_amount(view.balance),
        status
    );
    let _ = writeln!(out);
}

fn render_latest(out: &mut String, view: &DashboardView, options: &RenderOptions) {
    let _ = writeln!(out, "Last {} transactions", options.recent_limit);

    if view.transactions.is_empty() {
        let _ = writeln!(out, "No transactions found.");
        let _ = writeln!(out);
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Recipient", "Amount", "Date", "Type"]);
    for transaction in view.latest(options.recent_limit) {
        table.add_row(transaction_row(transaction, options));
    }
    let _ = writeln!(out, "{table}");
    let _ = writeln!(out);
}

fn transaction_row(transaction: &Transaction, options: &RenderOptions) -> Vec<Cell> {
    vec![
        Cell::new(transaction.recipient().unwrap_or("No recipient")),
        Cell::new(options.format_amount(transaction.value)).set_alignment(CellAlignment::Right),
        Cell::new(transaction.date.format("%Y-%m-%d")),
        Cell::new(transaction.kind),
    ]
}

/// Bar scaled against `max`, at least one cell wide for non-zero values.
fn bar(value: Decimal, max: Decimal) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let ratio = (value / max).to_f64().unwrap_or(0.0);
    let width = ((ratio * BAR_WIDTH as f64).round() as usize).clamp(1, BAR_WIDTH);
    BAR_CHAR.to_string().repeat(width)
}

fn render_credit_debit(out: &mut String, view: &DashboardView, options: &RenderOptions) {
    let _ = writeln!(out, "Credits vs Debits (last {} days)", view.window_days);

    let max = view
        .credit_debit
        .iter()
        .map(|entry| entry.value)
        .max()
        .unwrap_or(Decimal::ZERO);
    let label_width = view
        .credit_debit
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);

    for entry in &view.credit_debit {
        let _ = writeln!(
            out,
            "{:<label_width$}  {:<bar_width$}  {}",
            entry.name,
            bar(entry.value, max),
            options.format_amount(entry.value),
            label_width = label_width,
            bar_width = BAR_WIDTH,
        );
    }
    let _ = writeln!(out);
}

fn render_expenses(out: &mut String, view: &DashboardView, options: &RenderOptions) {
    let _ = writeln!(
        out,
        "Expenses by recipient (last {} days)",
        view.window_days
    );

    if view.expense_by_recipient.is_empty() {
        let _ = writeln!(
            out,
            "No expense data in the last {} days.",
            view.window_days
        );
        return;
    }

    let total = view
        .expense_by_recipient
        .iter()
        .try_fold(Decimal::ZERO, |sum, entry| sum.checked_add(entry.value));

    let label_width = view
        .expense_by_recipient
        .iter()
        .map(|entry| entry.recipient.chars().count())
        .max()
        .unwrap_or(0);

    for entry in &view.expense_by_recipient {
        let _ = writeln!(
            out,
            "{:<label_width$}  {:<bar_width$}  {:>3}%  {}",
            entry.recipient,
            bar(entry.share, Decimal::ONE_HUNDRED),
            whole_percent(entry.value, total, entry.share),
            options.format_amount(entry.value),
            label_width = label_width,
            bar_width = BAR_WIDTH,
        );
    }
}

/// Whole percentage shown next to a pie slice, rounding halves up.
///
/// Falls back to the stored two-decimal share when the total is unknown.
fn whole_percent(value: Decimal, total: Option<Decimal>, share: Decimal) -> Decimal {
    total
        .and_then(|total| share_of(value, total))
        .unwrap_or(share)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
