use rust_decimal::Decimal;
use time::Date;
use tracing::warn;

use crate::models::Transaction;
use crate::stats::YearMonth;
use crate::types::Currency;

/// Which transactions the month totals are summed over.
///
/// Per-transaction figures (average, maximum) are always limited to the selected
/// currency. Month totals default to the same scope; `AllCurrencies` sums every
/// record regardless of its symbol and exists for hosts that only ever record a
/// single currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TotalsScope {
    #[default]
    SelectedCurrency,
    AllCurrencies
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub this_month_total: Decimal,
    pub last_month_total: Decimal,
    /// Change from last month to this month in percent, `0` when last month is empty.
    pub monthly_change_percent: Decimal,
    pub avg_per_transaction: Decimal,
    pub max_transaction: Decimal,
    /// Size of the whole collection, every currency included.
    pub total_transaction_count: usize,
    pub current_currency_transaction_count: usize
}

pub fn compute_stats(transactions: &[Transaction], selected_currency: &Currency, today: Date) -> StatsSnapshot {
    compute_stats_with_scope(transactions, selected_currency, today, TotalsScope::default())
}

pub fn compute_stats_with_scope(
    transactions: &[Transaction],
    selected_currency: &Currency,
    today: Date,
    scope: TotalsScope
) -> StatsSnapshot {
    let this_month = YearMonth::from(today);
    let last_month = this_month.previous();

    let in_scope = |transaction: &&Transaction| match scope {
        TotalsScope::SelectedCurrency => transaction.currency == *selected_currency,
        TotalsScope::AllCurrencies => true
    };

    let mut this_month_total = Decimal::ZERO;
    let mut last_month_total = Decimal::ZERO;

    for transaction in transactions.iter().filter(in_scope) {
        if this_month.contains(transaction.date) {
            this_month_total = accumulate(this_month_total, transaction.amount.value());
        } else if last_month.contains(transaction.date) {
            last_month_total = accumulate(last_month_total, transaction.amount.value());
        }
    }

    let monthly_change_percent = change_percent(this_month_total, last_month_total);

    let scoped: Vec<Decimal> = transactions.iter()
        .filter(|transaction| transaction.currency == *selected_currency)
        .map(|transaction| transaction.amount.value())
        .collect();

    let avg_per_transaction = if scoped.is_empty() {
        Decimal::ZERO
    } else {
        scoped.iter().fold(Decimal::ZERO, |total, amount| accumulate(total, *amount)) / Decimal::from(scoped.len())
    };

    let max_transaction = scoped.iter().copied().max().unwrap_or(Decimal::ZERO);

    StatsSnapshot {
        this_month_total,
        last_month_total,
        monthly_change_percent: monthly_change_percent.normalize(),
        avg_per_transaction: avg_per_transaction.normalize(),
        max_transaction,
        total_transaction_count: transactions.len(),
        current_currency_transaction_count: scoped.len()
    }
}

/// Adds `amount` to `total`, saturating at `Decimal::MAX` instead of overflowing.
pub(super) fn accumulate(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!("Total overflowed while adding {amount}, saturating at {}", Decimal::MAX);
        Decimal::MAX
    })
}

fn change_percent(this_month_total: Decimal, last_month_total: Decimal) -> Decimal {
    if last_month_total <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    //NOTE: both totals are non-negative, so the difference cannot overflow
    let difference = this_month_total - last_month_total;

    difference.checked_div(last_month_total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            warn!("Monthly change overflowed for {this_month_total} against {last_month_total}, saturating");
            Decimal::MAX
        })
}
