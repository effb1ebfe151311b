use std::{borrow::Borrow, fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

const KEY_SEPARATOR: char = ';';
const REPORT_DECIMALS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Composite salesperson key, stored as `<docType>;<docNumber>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SellerKey(String);

impl SellerKey {
    pub fn new(doc_type: &str, doc_number: &str) -> Self {
        Self(format!("{}{}{}", doc_type, KEY_SEPARATOR, doc_number))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Splits the key back into document type and number. Keys that do not have exactly two
    /// components yield `None`.
    pub fn parts(&self) -> Option<(&str, &str)> {
        let mut parts = self.0.split(KEY_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(doc_type), Some(doc_number), None) => Some((doc_type, doc_number)),
            _ => None,
        }
    }
}

impl fmt::Display for SellerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    // Used for testing
    #[cfg(test)]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses a decimal written with either `.` or `,` as separator.
    pub fn parse(raw: &str) -> Option<Self> {
        Decimal::from_str(&raw.trim().replace(',', ".")).ok().map(Self)
    }

    #[cfg(test)]
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_times(self, quantity: Quantity) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity.value())).map(Self)
    }

    /// Always exactly two decimals, `.` separated, half away from zero.
    pub fn to_report_string(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(REPORT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(REPORT_DECIMALS);
        rounded.to_string()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("not an integer")]
    NotANumber,
    #[error("not positive")]
    NotPositive,
}

/// A strictly positive number of units.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Quantity(u64);

impl Quantity {
    #[cfg(test)]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn parse(raw: &str) -> Result<Self, QuantityError> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| QuantityError::NotANumber)?;
        if value <= 0 {
            return Err(QuantityError::NotPositive);
        }
        u64::try_from(value)
            .map(Self)
            .map_err(|_| QuantityError::NotPositive)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: MonetaryAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salesperson {
    pub doc_type: String,
    pub doc_number: String,
    pub first_names: String,
    pub last_names: String,
}

impl Salesperson {
    pub fn key(&self) -> SellerKey {
        SellerKey::new(&self.doc_type, &self.doc_number)
    }

    pub fn full_name(&self) -> String {
        if self.last_names.is_empty() {
            self.first_names.clone()
        } else {
            format!("{} {}", self.first_names, self.last_names)
        }
    }

    /// Display-only identity for a key missing from the roster. Never stored in the catalog.
    pub fn synthesized(key: &SellerKey) -> Self {
        match key.parts() {
            Some((doc_type, doc_number)) => Self {
                doc_type: doc_type.to_string(),
                doc_number: doc_number.to_string(),
                first_names: format!("{} {}", doc_type, doc_number),
                last_names: String::new(),
            },
            None => Self {
                doc_type: key.value().to_string(),
                doc_number: String::new(),
                first_names: key.value().to_string(),
                last_names: String::new(),
            },
        }
    }
}
