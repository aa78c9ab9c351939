use crate::error::{ReaderError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Largest scale `rust_decimal` can represent.
const MAX_MINOR_UNIT: u32 = 28;

/// The amount a card reader is asked to collect.
///
/// `value` is expressed in minor units of `currency` (e.g. cents), and
/// `minor_unit` is the number of decimal digits the currency uses. The
/// serialized form is exactly the `total_amount` object of the checkout API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    currency: String,
    minor_unit: u32,
    value: i64,
}

impl CheckoutRequest {
    pub fn new(currency: impl Into<String>, minor_unit: u32, value: i64) -> Result<Self> {
        let currency: String = currency.into();
        let currency = currency.trim().to_string();
        if currency.is_empty() {
            return Err(ReaderError::Config(
                "payment currency cannot be empty".to_string(),
            ));
        }
        if minor_unit > MAX_MINOR_UNIT {
            return Err(ReaderError::Config(format!(
                "payment minor unit {minor_unit} exceeds {MAX_MINOR_UNIT}"
            )));
        }
        Ok(Self {
            currency,
            minor_unit,
            value,
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn minor_unit(&self) -> u32 {
        self.minor_unit
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// The amount in major units, e.g. `1050` with minor unit 2 is `10.50`.
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.value, self.minor_unit)
    }
}

impl fmt::Display for CheckoutRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount(), self.currency)
    }
}

/// Merchant account and card reader a checkout is created on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderTarget {
    merchant_code: String,
    reader_id: String,
}

impl ReaderTarget {
    pub fn new(merchant_code: &str, reader_id: &str) -> Result<Self> {
        let merchant_code = merchant_code.trim();
        let reader_id = reader_id.trim();
        if merchant_code.is_empty() {
            return Err(ReaderError::Config(
                "merchant code cannot be empty".to_string(),
            ));
        }
        if reader_id.is_empty() {
            return Err(ReaderError::Config("reader ID cannot be empty".to_string()));
        }
        Ok(Self {
            merchant_code: merchant_code.to_string(),
            reader_id: reader_id.to_string(),
        })
    }

    pub fn merchant_code(&self) -> &str {
        &self.merchant_code
    }

    pub fn reader_id(&self) -> &str {
        &self.reader_id
    }
}

/// Identifier of a checkout created on a reader, used to look up its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResult {
    pub transaction_id: String,
}
