use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.154 = 15.4%). Never as percentages.
pub type Rate = Decimal;

/// Supported trading currencies. KRW is the home currency; everything
/// else is converted through an [`ExchangeRates`] table before use.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Currency {
    #[default]
    KRW,
    USD,
    EUR,
    JPY,
    GBP,
    CNY,
    AUD,
    CAD,
    CHF,
    HKD,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::KRW => "KRW",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
            Currency::GBP => "GBP",
            Currency::CNY => "CNY",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::HKD => "HKD",
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Currency::KRW)
    }
}

/// KRW per one unit of foreign currency. The home currency never appears
/// in the table; holdings priced in KRW bypass conversion entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRates(pub BTreeMap<Currency, Decimal>);

impl ExchangeRates {
    pub fn rate(&self, currency: Currency) -> Option<Decimal> {
        self.0.get(&currency).copied()
    }
}

impl FromIterator<(Currency, Decimal)> for ExchangeRates {
    fn from_iter<I: IntoIterator<Item = (Currency, Decimal)>>(iter: I) -> Self {
        ExchangeRates(iter.into_iter().collect())
    }
}

/// A single portfolio position as entered by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub name: String,
    pub ticker: String,
    /// Share price in the holding's own currency.
    pub price: Money,
    pub currency: Currency,
    /// Annual dividend yield as a percentage (2.5 = 2.5%).
    pub annual_yield_pct: Decimal,
    /// Share of the total investment allocated to this holding (0..=100).
    pub allocation_pct: Decimal,
    /// Calendar months (1..=12) in which the holding pays dividends.
    #[serde(default)]
    pub dividend_months: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
}

/// Whether allocation ratios must fill the portfolio exactly or may
/// leave part of the investment unallocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioPolicy {
    /// Σ allocation_pct ≤ 100.
    #[default]
    AtMostFull,
    /// Σ allocation_pct == 100 within a 0.1 tolerance.
    ExactlyFull,
}

/// Forward mode: a fixed total investment is split across holdings and
/// projected into dividend income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendProjectionInput {
    pub holdings: Vec<Holding>,
    /// Total investment in KRW.
    pub total_investment: Money,
    #[serde(default)]
    pub exchange_rates: ExchangeRates,
    #[serde(default)]
    pub ratio_policy: RatioPolicy,
}

/// Inverse mode: a target annual dividend is inverted into the
/// investment required to produce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentSizingInput {
    pub holdings: Vec<Holding>,
    /// Pre-tax target annual dividend in KRW.
    pub target_annual_dividend: Money,
    #[serde(default)]
    pub exchange_rates: ExchangeRates,
    #[serde(default)]
    pub ratio_policy: RatioPolicy,
}

/// Per-holding projection detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingDividend {
    pub ticker: String,
    /// KRW allocated to this holding.
    pub investment_amount: Money,
    /// Whole shares purchasable with the allocated amount.
    pub share_quantity: Money,
    /// Pre-tax annual dividend in KRW, floored to a whole amount.
    pub annual_dividend: Money,
    /// After-tax dividend per scheduled month, keyed by month (1..=12).
    pub monthly_dividends: BTreeMap<u32, Money>,
    pub is_foreign: bool,
    /// Withholding rate applied to this holding's monthly schedule.
    pub withholding_rate: Rate,
}

/// Aggregate projection for a whole portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendProjection {
    pub holdings: Vec<HoldingDividend>,
    /// Pre-tax annual dividend across all holdings, in KRW.
    pub total_annual_dividend: Money,
    /// Pre-tax annual dividend from non-KRW holdings.
    pub total_foreign_annual_dividend: Money,
    /// Dividend-weighted average of foreign withholding rates.
    pub average_foreign_tax_rate: Rate,
    /// After-tax dividends by calendar month; index 0 is January.
    pub monthly_schedule: [Money; 12],
    /// Comprehensive-tax delta: positive = payment due, negative =
    /// refund, `None` = separate taxation is final.
    pub additional_tax: Option<Money>,
}

/// Inverse-mode result: the sized investment plus its projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentSizing {
    /// Total KRW investment required to hit the target dividend.
    pub required_investment: Money,
    #[serde(flatten)]
    pub projection: DividendProjection,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
