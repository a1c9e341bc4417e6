use crate::types::errors::ValidationError;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A strictly positive monetary value.
///
/// The value is stored normalized, so `120.00` and `120` compare and print the same.
/// Snapshots hold amounts as plain JSON numbers; strings are accepted on the way in
/// so that hand-edited or imported files still load. Only values a JSON number
/// reproduces exactly are accepted, so every amount survives a save and reload.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositive(value));
        }

        let value = value.normalize();

        if !fits_json_number(value) {
            return Err(ValidationError::TooPrecise(value));
        }

        Ok(Amount(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Parses free text into a decimal without applying the positivity rule.
pub fn parse_amount(value: &str) -> Result<Decimal, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::NotANumber(value.to_string()));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::NotANumber(value.to_string()))
}

//NOTE: must agree with `Serialize` and `AmountVisitor::visit_f64` below
fn fits_json_number(value: Decimal) -> bool {
    value.to_string()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .and_then(|number| Decimal::from_str(&number.to_string()).ok())
        .is_some_and(|round_trip| round_trip == value)
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Amount::new(parse_amount(value)?)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = self.0.to_string();

        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => serializer.serialize_f64(value),
            _ => serializer.serialize_str(&text)
        }
    }
}

struct AmountVisitor;

impl de::Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("a positive number or numeric string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        if !value.is_finite() {
            return Err(E::custom(ValidationError::NotANumber(value.to_string())));
        }

        //NOTE: f64 Display yields the shortest round-trip form, so 24.2 stays 24.2
        Amount::from_str(&value.to_string()).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Amount::new(Decimal::from(value)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Amount::new(Decimal::from(value)).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Amount::from_str(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}
