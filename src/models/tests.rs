use super::{LedgerError, NewTransaction, Transaction, TransactionChanges};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use time::{Date, Month};

use crate::types::{Amount, Currency, TransactionId, ValidationError};

fn march(day: u8) -> Result<Date> {
    Ok(Date::from_calendar_date(2024, Month::March, day)?)
}

#[test]
fn test_new_transaction_becomes_transaction_with_given_id() -> Result<()> {
    let candidate = NewTransaction::new(Decimal::from_str("12.50")?, " Food ", march(4)?)
        .with_note("Sandwich")
        .with_currency(Currency::new("€"))
        .with_time("12:30");

    let transaction = candidate.into_transaction(TransactionId::from("abc"))?;

    assert_eq!(transaction.id.as_str(), "abc");
    assert_eq!(transaction.amount.to_string(), "12.5");
    assert_eq!(transaction.category, "Food");
    assert_eq!(transaction.note, "Sandwich");
    assert_eq!(transaction.currency.as_str(), "€");
    assert_eq!(transaction.time.as_deref(), Some("12:30"));

    Ok(())
}

#[test]
fn test_new_transaction_rejects_zero_negative_and_blank_category() -> Result<()> {
    let zero = NewTransaction::new(Decimal::ZERO, "Food", march(1)?);
    let negative = NewTransaction::new(Decimal::from(-5), "Food", march(1)?);
    let blank = NewTransaction::new(Decimal::from(5), "   ", march(1)?);

    assert!(matches!(zero.into_transaction(TransactionId::generate()), Err(ValidationError::NonPositive(_))));
    assert!(matches!(negative.into_transaction(TransactionId::generate()), Err(ValidationError::NonPositive(_))));
    assert!(matches!(blank.into_transaction(TransactionId::generate()), Err(ValidationError::EmptyCategory)));

    Ok(())
}

#[test]
fn test_changes_keep_id_and_recorded_time_when_not_resupplied() -> Result<()> {
    let original = NewTransaction::new(Decimal::from(10), "Bills", march(2)?)
        .with_time("08:15")
        .into_transaction(TransactionId::from("keep-me"))?;

    let mut changes = TransactionChanges::from_existing(&original);
    changes.amount = Decimal::from(42);
    changes.category = "Health".to_string();

    let updated = changes.apply_to(&original)?;

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.amount, Amount::from_str("42")?);
    assert_eq!(updated.category, "Health");
    assert_eq!(updated.time.as_deref(), Some("08:15"));

    Ok(())
}

#[test]
fn test_changes_replace_time_when_resupplied() -> Result<()> {
    let original = NewTransaction::new(Decimal::from(10), "Bills", march(2)?)
        .with_time("08:15")
        .into_transaction(TransactionId::generate())?;

    let mut changes = TransactionChanges::from_existing(&original);
    changes.time = Some("21:00".to_string());

    assert_eq!(changes.apply_to(&original)?.time.as_deref(), Some("21:00"));

    Ok(())
}

#[test]
fn test_invalid_changes_are_rejected() -> Result<()> {
    let original = NewTransaction::new(Decimal::from(10), "Bills", march(2)?)
        .into_transaction(TransactionId::generate())?;

    let mut changes = TransactionChanges::from_existing(&original);
    changes.amount = Decimal::ZERO;

    assert!(changes.apply_to(&original).is_err());

    Ok(())
}

#[test]
fn test_snapshot_format_uses_iso_dates_and_defaults_missing_fields() -> Result<()> {
    let json = r#"[{"id":"x1","amount":8.5,"category":"Food","date":"2024-03-09"}]"#;
    let transactions: Vec<Transaction> = serde_json::from_str(json)?;

    assert_eq!(transactions[0].note, "");
    assert_eq!(transactions[0].currency, Currency::default());
    assert_eq!(transactions[0].date, march(9)?);

    let serialized = serde_json::to_string(&transactions)?;

    assert!(serialized.contains(r#""date":"2024-03-09""#));
    assert!(serialized.contains(r#""amount":8.5"#));
    assert!(!serialized.contains("time"));

    Ok(())
}

#[test]
fn test_not_found_error_names_the_id() {
    let error = LedgerError::not_found(&TransactionId::from("missing-1"));

    assert!(error.to_string().contains("missing-1"));
}
