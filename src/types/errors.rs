use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Validation error: amount '{0}' is not a number")]
    NotANumber(String),
    #[error("Validation error: amount must be greater than zero, got {0}")]
    NonPositive(Decimal),
    #[error("Validation error: amount {0} has more significant digits than can be stored")]
    TooPrecise(Decimal),
    #[error("Validation error: category is required")]
    EmptyCategory,
    #[error("Validation error: date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String)
}
