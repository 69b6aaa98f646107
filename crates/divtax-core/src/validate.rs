//! Portfolio validation.
//!
//! Every calculation entry point validates before computing anything; a
//! violated rule is a blocking error, never a warning, and no partial
//! result is produced. Checks run in a fixed order: allocation ratios,
//! primary amount, exchange-rate coverage, then per-holding field sanity.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::DivTaxError;
use crate::types::{Currency, ExchangeRates, Holding, Money, RatioPolicy};
use crate::DivTaxResult;

/// Tolerance for the `ExactlyFull` ratio check, absorbing entry drift
/// like 33.3 + 33.3 + 33.4.
const RATIO_EPSILON: Decimal = dec!(0.1);

/// Run the full ordered portfolio validation.
///
/// `amount` is the active mode's primary input (total investment in
/// forward mode, target annual dividend in inverse mode), named by
/// `amount_field` in errors.
pub fn validate_portfolio(
    holdings: &[Holding],
    amount: Money,
    amount_field: &str,
    rates: &ExchangeRates,
    policy: RatioPolicy,
) -> DivTaxResult<()> {
    validate_ratio_sum(holdings, policy)?;
    validate_amount(amount, amount_field)?;
    validate_exchange_rates(holdings, rates)?;
    for holding in holdings {
        validate_holding(holding)?;
    }
    Ok(())
}

/// Allocation ratios must not exceed 100%, or must hit it exactly under
/// the strict policy.
pub fn validate_ratio_sum(holdings: &[Holding], policy: RatioPolicy) -> DivTaxResult<()> {
    let total: Decimal = holdings.iter().map(|h| h.allocation_pct).sum();
    match policy {
        RatioPolicy::AtMostFull => {
            if total > dec!(100) {
                return Err(DivTaxError::RatioSumExceeded { total });
            }
        }
        RatioPolicy::ExactlyFull => {
            if (total - dec!(100)).abs() > RATIO_EPSILON {
                if total > dec!(100) {
                    return Err(DivTaxError::RatioSumExceeded { total });
                }
                return Err(DivTaxError::RatioSumIncomplete { total });
            }
        }
    }
    Ok(())
}

/// The active mode's primary amount must be present and positive.
pub fn validate_amount(amount: Money, field: &str) -> DivTaxResult<()> {
    if amount <= Decimal::ZERO {
        return Err(DivTaxError::InvalidInput {
            field: field.to_string(),
            reason: "must be positive".into(),
        });
    }
    Ok(())
}

/// Every foreign currency used by a holding needs a positive rate; the
/// error names the specific missing currencies in holding order.
pub fn validate_exchange_rates(holdings: &[Holding], rates: &ExchangeRates) -> DivTaxResult<()> {
    let mut missing: Vec<Currency> = Vec::new();
    for holding in holdings {
        let currency = holding.currency;
        if currency.is_home() || missing.contains(&currency) {
            continue;
        }
        match rates.rate(currency) {
            Some(rate) if rate > Decimal::ZERO => {}
            _ => missing.push(currency),
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DivTaxError::MissingExchangeRate { currencies: missing })
    }
}

/// Field-level sanity for a single holding.
pub fn validate_holding(holding: &Holding) -> DivTaxResult<()> {
    let field = |name: &str| format!("{} ({})", name, holding.ticker);

    if holding.price <= Decimal::ZERO {
        return Err(DivTaxError::InvalidInput {
            field: field("price"),
            reason: "must be positive".into(),
        });
    }
    if holding.annual_yield_pct < Decimal::ZERO {
        return Err(DivTaxError::InvalidInput {
            field: field("annual_yield_pct"),
            reason: "must be non-negative".into(),
        });
    }
    if holding.allocation_pct < Decimal::ZERO || holding.allocation_pct > dec!(100) {
        return Err(DivTaxError::InvalidInput {
            field: field("allocation_pct"),
            reason: "must be between 0 and 100".into(),
        });
    }
    let mut seen = [false; 12];
    for &month in &holding.dividend_months {
        if !(1..=12).contains(&month) {
            return Err(DivTaxError::InvalidInput {
                field: field("dividend_months"),
                reason: format!("month {month} is outside 1..=12"),
            });
        }
        if seen[(month - 1) as usize] {
            return Err(DivTaxError::InvalidInput {
                field: field("dividend_months"),
                reason: format!("month {month} appears more than once"),
            });
        }
        seen[(month - 1) as usize] = true;
    }
    Ok(())
}
