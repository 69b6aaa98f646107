//! Node.js bindings for the dividend/tax core.
//!
//! Each function takes a JSON string and returns a JSON string, so the web
//! frontend can call the calculation engine without a typed FFI layer.

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use divtax_core::projection;
use divtax_core::tax::comprehensive;
use divtax_core::types::{DividendProjectionInput, InvestmentSizingInput};
use divtax_core::TaxConfig;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Forward mode: dividend projection from a total investment.
#[napi]
pub fn project_dividends(input_json: String) -> NapiResult<String> {
    let input: DividendProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        projection::project_dividends(&input, &TaxConfig::default()).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Inverse mode: investment sizing from a target annual dividend.
#[napi]
pub fn size_investment(input_json: String) -> NapiResult<String> {
    let input: InvestmentSizingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        projection::size_investment(&input, &TaxConfig::default()).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Debug, Deserialize)]
struct TaxInput {
    annual_dividend_income: Decimal,
    #[serde(default)]
    foreign_dividend_income: Decimal,
    average_foreign_tax_rate: Option<Decimal>,
}

/// Comprehensive-tax delta for a year's dividend income.
/// Returns a JSON number (KRW delta) or null when separate taxation is final.
#[napi]
pub fn comprehensive_tax(input_json: String) -> NapiResult<String> {
    let input: TaxInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = TaxConfig::default();
    let rate = input
        .average_foreign_tax_rate
        .unwrap_or(config.default_foreign_withholding_rate);

    let delta = comprehensive::additional_tax(
        input.annual_dividend_income,
        input.foreign_dividend_income,
        rate,
        &config,
    );
    serde_json::to_string(&delta).map_err(to_napi_error)
}
