use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::engine::errors::FilterError;
use crate::models::Transaction;

const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String)
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        let value = value.trim();

        if value.is_empty() || value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    Category
}

impl SortOrder {
    pub(crate) fn compare(&self, left: &Transaction, right: &Transaction) -> Ordering {
        match self {
            SortOrder::DateDesc => right.date.cmp(&left.date),
            SortOrder::DateAsc => left.date.cmp(&right.date),
            SortOrder::AmountDesc => right.amount.cmp(&left.amount),
            SortOrder::AmountAsc => left.amount.cmp(&right.amount),
            SortOrder::Category => left.category.cmp(&right.category)
        }
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "date_desc" => Ok(SortOrder::DateDesc),
            "date_asc" => Ok(SortOrder::DateAsc),
            "amount_desc" => Ok(SortOrder::AmountDesc),
            "amount_asc" => Ok(SortOrder::AmountAsc),
            "category" => Ok(SortOrder::Category),
            _ => Err(FilterError::UnknownSortOrder(value.to_string()))
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::DateDesc => "date_desc",
            SortOrder::DateAsc => "date_asc",
            SortOrder::AmountDesc => "amount_desc",
            SortOrder::AmountAsc => "amount_asc",
            SortOrder::Category => "category"
        };

        formatter.write_str(name)
    }
}

/// The active criteria that derive a view over the transaction collection.
///
/// Every unset field disables its predicate; set predicates combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub category: CategoryFilter,
    /// Case-insensitive substring matched against note, amount and category.
    pub search: String,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub from_date: Option<Date>,
    pub to_date: Option<Date>,
    pub sort: SortOrder
}

impl FilterSpec {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_category(transaction)
            && self.matches_search(transaction)
            && self.matches_amount(transaction)
            && self.matches_date(transaction)
    }

    fn matches_category(&self, transaction: &Transaction) -> bool {
        match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => transaction.category == *category
        }
    }

    fn matches_search(&self, transaction: &Transaction) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();

        transaction.note.to_lowercase().contains(&needle)
            || transaction.amount.to_string().contains(&needle)
            || transaction.category.to_lowercase().contains(&needle)
    }

    fn matches_amount(&self, transaction: &Transaction) -> bool {
        let amount = transaction.amount.value();

        self.min_amount.is_none_or(|min| amount >= min) && self.max_amount.is_none_or(|max| amount <= max)
    }

    fn matches_date(&self, transaction: &Transaction) -> bool {
        self.from_date.is_none_or(|from| transaction.date >= from) && self.to_date.is_none_or(|to| transaction.date <= to)
    }
}
