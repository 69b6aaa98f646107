use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Currency;

#[derive(Debug, Error)]
pub enum DivTaxError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Allocation ratios sum to {total}% but must not exceed 100%")]
    RatioSumExceeded { total: Decimal },

    #[error("Allocation ratios sum to {total}% but must equal 100%")]
    RatioSumIncomplete { total: Decimal },

    #[error("Exchange rate missing or non-positive for: {}", .currencies.iter().map(|c| c.code()).collect::<Vec<_>>().join(", "))]
    MissingExchangeRate { currencies: Vec<Currency> },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DivTaxError {
    fn from(e: serde_json::Error) -> Self {
        DivTaxError::SerializationError(e.to_string())
    }
}
