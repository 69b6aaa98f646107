//! Per-holding dividend figures.
//!
//! Annual dividends are floored to whole KRW. Monthly amounts are rounded
//! to 2dp independently per month, so a holding's schedule may total
//! slightly off from `annual × (1 − rate)`.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::config::TaxConfig;
use crate::fx;
use crate::types::{ExchangeRates, Holding, Money};

/// Pre-tax annual dividend of one holding for a given allocated investment,
/// in KRW.
///
/// Derived from the holding's yield: shares purchasable at the KRW price
/// times the per-share dividend. A zero KRW price (unpriced holding or
/// missing exchange rate) contributes no dividend instead of dividing by
/// zero.
pub fn annual_dividend(holding: &Holding, investment: Money, rates: &ExchangeRates) -> Money {
    let price_in_krw = fx::convert_to_krw(holding.price, holding.currency, rates);
    if price_in_krw <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let shares = investment / price_in_krw;
    let dividend_per_share = price_in_krw * holding.annual_yield_pct / dec!(100);
    (shares * dividend_per_share).floor()
}

/// Whole shares purchasable with the allocated investment.
pub fn share_quantity(holding: &Holding, investment: Money, rates: &ExchangeRates) -> Money {
    let price_in_krw = fx::convert_to_krw(holding.price, holding.currency, rates);
    if price_in_krw <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (investment / price_in_krw).floor()
}

/// After-tax dividend per scheduled payment month.
///
/// The annual dividend is split evenly across the holding's payment months
/// and reduced by the currency's withholding rate. Holdings without payment
/// months produce an empty schedule.
pub fn monthly_schedule(
    holding: &Holding,
    annual_dividend: Money,
    config: &TaxConfig,
) -> BTreeMap<u32, Money> {
    if holding.dividend_months.is_empty() {
        return BTreeMap::new();
    }

    let tax_rate = config.withholding_rate(holding.currency);
    let month_count = Decimal::from(holding.dividend_months.len() as u64);

    holding
        .dividend_months
        .iter()
        .map(|&month| {
            let amount = (annual_dividend / month_count) * (Decimal::ONE - tax_rate);
            (
                month,
                amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            )
        })
        .collect()
}
