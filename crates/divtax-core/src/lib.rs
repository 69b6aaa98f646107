//! Dividend-income projections and Korean dividend-tax calculations.
//!
//! Pure, synchronous functions over immutable inputs: a portfolio of
//! holdings goes in, annual/monthly dividend figures and the
//! comprehensive-tax delta come out. All arithmetic uses
//! `rust_decimal::Decimal`. No `f64`.

pub mod config;
pub mod dividend;
pub mod error;
pub mod fx;
pub mod projection;
pub mod tax;
pub mod types;
pub mod validate;

pub use config::TaxConfig;
pub use error::DivTaxError;
pub use types::*;

/// Standard result type for all divtax operations
pub type DivTaxResult<T> = Result<T, DivTaxError>;
