//! `YYYY-MM-DD` calendar dates, used as a serde `with` module for snapshot fields.

use crate::types::errors::ValidationError;
use serde::{de, Deserialize, Deserializer, Serializer};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub fn parse_iso_date(value: &str) -> Result<Date, ValidationError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// The local calendar date, or the UTC one when the local offset cannot be determined.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(date)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_iso_date(&value).map_err(de::Error::custom)
}
