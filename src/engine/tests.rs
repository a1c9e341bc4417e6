use super::{apply_view, CategoryFilter, FilterError, FilterSpec, SearchDebouncer, SortOrder};

use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use tokio::time::sleep;

use crate::models::Transaction;
use crate::types::{parse_iso_date, Amount, Currency, TransactionId};

fn create_transaction(id: &str, amount: &str, category: &str, date: &str, note: &str) -> Result<Transaction> {
    Ok(Transaction {
        id: TransactionId::from(id),
        amount: Amount::from_str(amount)?,
        category: category.to_string(),
        date: parse_iso_date(date)?,
        time: None,
        note: note.to_string(),
        currency: Currency::default()
    })
}

fn sample_ledger() -> Result<Vec<Transaction>> {
    Ok(vec![
        create_transaction("1", "8.5", "Food", "2024-03-14", "Morning coffee at Starbucks")?,
        create_transaction("2", "24.2", "Travel", "2024-03-10", "Uber ride to downtown")?,
        create_transaction("3", "120", "Bills", "2024-02-24", "Monthly electricity bill")?,
        create_transaction("4", "56.4", "Shopping", "2024-02-04", "Programming books from Amazon")?,
        create_transaction("5", "15", "Food", "2024-03-13", "Lunch at local restaurant")?,
        create_transaction("6", "45", "Entertainment", "2024-03-12", "Movie tickets for weekend")?,
    ])
}

fn ids(view: &[Transaction]) -> Vec<&str> {
    view.iter().map(|transaction| transaction.id.as_str()).collect()
}

#[test]
fn test_default_spec_keeps_everything_newest_first() -> Result<()> {
    let ledger = sample_ledger()?;
    let view = apply_view(&ledger, &FilterSpec::default());

    assert_eq!(ids(&view), vec!["1", "5", "6", "2", "3", "4"]);

    Ok(())
}

#[test]
fn test_amount_descending_orders_largest_first() -> Result<()> {
    let ledger = vec![
        create_transaction("a", "5", "Food", "2024-01-01", "")?,
        create_transaction("b", "20", "Food", "2024-01-01", "")?,
        create_transaction("c", "1", "Food", "2024-01-01", "")?,
    ];
    let spec = FilterSpec { sort: SortOrder::AmountDesc, ..FilterSpec::default() };

    let amounts: Vec<String> = apply_view(&ledger, &spec).iter().map(|t| t.amount.to_string()).collect();

    assert_eq!(amounts, vec!["20", "5", "1"]);

    Ok(())
}

#[test]
fn test_remaining_sort_orders() -> Result<()> {
    let ledger = sample_ledger()?;

    let ascending = FilterSpec { sort: SortOrder::DateAsc, ..FilterSpec::default() };
    assert_eq!(ids(&apply_view(&ledger, &ascending)), vec!["4", "3", "2", "6", "5", "1"]);

    let cheapest = FilterSpec { sort: SortOrder::AmountAsc, ..FilterSpec::default() };
    assert_eq!(ids(&apply_view(&ledger, &cheapest)), vec!["1", "5", "2", "6", "4", "3"]);

    let by_category = FilterSpec { sort: SortOrder::Category, ..FilterSpec::default() };
    let categories: Vec<String> = apply_view(&ledger, &by_category).into_iter().map(|t| t.category).collect();
    assert_eq!(categories, vec!["Bills", "Entertainment", "Food", "Food", "Shopping", "Travel"]);

    Ok(())
}

#[test]
fn test_category_filter_is_exact_and_all_disables_it() -> Result<()> {
    let ledger = sample_ledger()?;

    let food = FilterSpec { category: CategoryFilter::from("Food"), ..FilterSpec::default() };
    assert_eq!(ids(&apply_view(&ledger, &food)), vec!["1", "5"]);

    let lowercase = FilterSpec { category: CategoryFilter::from("food"), ..FilterSpec::default() };
    assert!(apply_view(&ledger, &lowercase).is_empty());

    assert_eq!(CategoryFilter::from("All"), CategoryFilter::All);
    assert_eq!(CategoryFilter::from(""), CategoryFilter::All);

    Ok(())
}

#[test]
fn test_search_matches_note_amount_and_category_case_insensitively() -> Result<()> {
    let ledger = sample_ledger()?;

    let by_note = FilterSpec { search: "COFFEE".to_string(), ..FilterSpec::default() };
    assert_eq!(ids(&apply_view(&ledger, &by_note)), vec!["1"]);

    let by_amount = FilterSpec { search: "24.2".to_string(), ..FilterSpec::default() };
    assert_eq!(ids(&apply_view(&ledger, &by_amount)), vec!["2"]);

    let by_category = FilterSpec { search: "shop".to_string(), ..FilterSpec::default() };
    assert_eq!(ids(&apply_view(&ledger, &by_category)), vec!["4"]);

    let nothing = FilterSpec { search: "zzz".to_string(), ..FilterSpec::default() };
    assert!(apply_view(&ledger, &nothing).is_empty());

    Ok(())
}

#[test]
fn test_amount_and_date_bounds_are_inclusive() -> Result<()> {
    let ledger = sample_ledger()?;

    let amounts = FilterSpec {
        min_amount: Some(Decimal::from(15)),
        max_amount: Some(Decimal::from(45)),
        sort: SortOrder::AmountAsc,
        ..FilterSpec::default()
    };
    assert_eq!(ids(&apply_view(&ledger, &amounts)), vec!["5", "2", "6"]);

    let dates = FilterSpec {
        from_date: Some(parse_iso_date("2024-02-24")?),
        to_date: Some(parse_iso_date("2024-03-12")?),
        sort: SortOrder::DateAsc,
        ..FilterSpec::default()
    };
    assert_eq!(ids(&apply_view(&ledger, &dates)), vec!["3", "2", "6"]);

    Ok(())
}

#[test]
fn test_view_never_grows_and_every_record_satisfies_the_spec() -> Result<()> {
    let ledger = sample_ledger()?;
    let snapshot = ledger.clone();
    let spec = FilterSpec {
        category: CategoryFilter::from("Food"),
        search: "l".to_string(),
        min_amount: Some(Decimal::from(1)),
        max_amount: None,
        from_date: Some(parse_iso_date("2024-03-01")?),
        to_date: None,
        sort: SortOrder::AmountDesc
    };

    let view = apply_view(&ledger, &spec);

    assert!(view.len() <= ledger.len());
    assert!(view.iter().all(|transaction| spec.matches(transaction)));
    assert_eq!(ids(&view), vec!["5"]);
    assert_eq!(ledger, snapshot);

    Ok(())
}

#[test]
fn test_sort_order_parses_from_and_prints_to_its_wire_names() -> Result<()> {
    for name in ["date_desc", "date_asc", "amount_desc", "amount_asc", "category"] {
        assert_eq!(SortOrder::from_str(name)?.to_string(), name);
    }

    assert_eq!(SortOrder::from_str("newest"), Err(FilterError::UnknownSortOrder("newest".to_string())));

    Ok(())
}

#[tokio::test]
async fn test_debouncer_delivers_only_the_last_value_of_a_burst() -> Result<()> {
    let settled = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = settled.clone();

    let debouncer = SearchDebouncer::spawn(Duration::from_millis(100), move |search| {
        if let Ok(mut values) = sink.lock() {
            values.push(search);
        }
    });

    for search in ["c", "co", "cof", "coffee"] {
        assert!(debouncer.push(search));
    }

    sleep(Duration::from_millis(400)).await;

    assert!(debouncer.push("tea"));
    debouncer.finish().await?;

    let values = settled.lock().map_err(|_| anyhow!("Settled values lock poisoned"))?;

    assert_eq!(*values, vec!["coffee".to_string(), "tea".to_string()]);

    Ok(())
}
