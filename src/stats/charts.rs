//! Chart inputs: spending per category and per recent month.

use std::collections::HashMap;

use rust_decimal::Decimal;
use time::Date;

use crate::models::Transaction;
use crate::stats::snapshot::accumulate;
use crate::stats::YearMonth;
use crate::types::{Currency, DEFAULT_CATEGORIES};

pub const DEFAULT_TREND_MONTHS: usize = 6;
/// Longest trend `monthly_trend` produces; longer requests are clamped.
pub const MAX_TREND_MONTHS: usize = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Decimal
}

/// Default categories followed by any others in the order they first appear.
pub fn known_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut categories: Vec<String> = DEFAULT_CATEGORIES.iter().map(|category| category.to_string()).collect();

    for transaction in transactions {
        if !categories.contains(&transaction.category) {
            categories.push(transaction.category.clone());
        }
    }

    categories
}

/// Totals per category for `currency`. Every default category is present, possibly at zero.
pub fn category_breakdown(transactions: &[Transaction], currency: &Currency) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = known_categories(transactions).into_iter()
        .map(|category| CategoryTotal { category, total: Decimal::ZERO })
        .collect();

    let positions: HashMap<String, usize> = totals.iter()
        .enumerate()
        .map(|(index, entry)| (entry.category.clone(), index))
        .collect();

    for transaction in transactions.iter().filter(|transaction| transaction.currency == *currency) {
        if let Some(&index) = positions.get(&transaction.category) {
            totals[index].total = accumulate(totals[index].total, transaction.amount.value());
        }
    }

    totals
}

/// Totals for the `months` calendar months ending with the month of `today`, oldest first.
/// At most [`MAX_TREND_MONTHS`] months are returned.
pub fn monthly_trend(transactions: &[Transaction], currency: &Currency, today: Date, months: usize) -> Vec<MonthlyTotal> {
    let months = months.min(MAX_TREND_MONTHS);
    let mut trend = Vec::with_capacity(months);
    let mut month = YearMonth::from(today);

    for _ in 0..months {
        trend.push(MonthlyTotal { month, total: Decimal::ZERO });
        month = month.previous();
    }

    trend.reverse();

    for transaction in transactions.iter().filter(|transaction| transaction.currency == *currency) {
        let bucket = YearMonth::from(transaction.date);

        if let Some(entry) = trend.iter_mut().find(|entry| entry.month == bucket) {
            entry.total = accumulate(entry.total, transaction.amount.value());
        }
    }

    trend
}
