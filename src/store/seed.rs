use rust_decimal::Decimal;
use time::{Date, Duration};

use crate::models::{NewTransaction, Transaction};
use crate::types::{TransactionId, ValidationError};

/// (mantissa, scale, category, days before today, note)
const EXAMPLES: [(i64, u32, &str, i64, &str); 6] = [
    (85, 1, "Food", 1, "Morning coffee at Starbucks"),
    (242, 1, "Travel", 5, "Uber ride to downtown"),
    (12000, 2, "Bills", 20, "Monthly electricity bill"),
    (564, 1, "Shopping", 40, "Programming books from Amazon"),
    (150, 1, "Food", 2, "Lunch at local restaurant"),
    (450, 1, "Entertainment", 3, "Movie tickets for weekend"),
];

/// The example ledger written on first start, dated relative to `today`.
pub(crate) fn example_transactions(today: Date) -> Result<Vec<Transaction>, ValidationError> {
    EXAMPLES.iter()
        .map(|&(mantissa, scale, category, days_ago, note)| {
            NewTransaction::new(Decimal::new(mantissa, scale), category, today.saturating_sub(Duration::days(days_ago)))
                .with_note(note)
                .into_transaction(TransactionId::generate())
        })
        .collect()
}
