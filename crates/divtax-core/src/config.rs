//! Tax-year constants.
//!
//! Every rate, threshold and bracket the engine uses lives in [`TaxConfig`]
//! so a different tax year (or a test fixture) can swap the whole table
//! without touching the calculation code. [`TaxConfig::default`] carries the
//! simplified 2023 Korean figures; it is not a filing-grade rate source.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Currency, Money, Rate};

/// One progressive income-tax bracket. Brackets are ordered ascending by
/// `limit`; the open-ended top bracket has `limit: None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the taxable base covered by this bracket, inclusive.
    pub limit: Option<Money>,
    pub rate: Rate,
    /// Cumulative deduction (누진공제) for this bracket.
    pub deduction: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Dividend income at or below this amount is finally taxed at source
    /// (분리과세); above it the comprehensive regime applies.
    pub separate_tax_threshold: Money,
    /// Domestic withholding: 14% income tax + 1.4% local surtax.
    pub domestic_withholding_rate: Rate,
    /// Gross-up factor applied to the domestic comprehensive portion.
    pub gross_up_factor: Decimal,
    /// Dividend tax credit rate on the grossed-up domestic portion.
    pub dividend_tax_credit_rate: Rate,
    /// Local income surtax as a fraction of the computed income tax.
    pub local_surtax_rate: Rate,
    /// Statutory dividend withholding rates by source currency.
    pub foreign_withholding_rates: BTreeMap<Currency, Rate>,
    /// Applied when a foreign currency is absent from the table.
    pub default_foreign_withholding_rate: Rate,
    pub brackets: Vec<TaxBracket>,
}

impl Default for TaxConfig {
    fn default() -> Self {
        TaxConfig {
            separate_tax_threshold: dec!(20_000_000),
            domestic_withholding_rate: dec!(0.154),
            gross_up_factor: dec!(1.11),
            dividend_tax_credit_rate: dec!(0.15),
            local_surtax_rate: dec!(0.10),
            foreign_withholding_rates: BTreeMap::from([
                (Currency::USD, dec!(0.15)),
                // Germany as the euro-area proxy; varies by country
                (Currency::EUR, dec!(0.26375)),
                (Currency::JPY, dec!(0.15315)),
                (Currency::GBP, dec!(0.0)),
                (Currency::CNY, dec!(0.10)),
                (Currency::AUD, dec!(0.0)),
                (Currency::CAD, dec!(0.25)),
                (Currency::CHF, dec!(0.35)),
                (Currency::HKD, dec!(0.0)),
            ]),
            default_foreign_withholding_rate: dec!(0.15),
            brackets: vec![
                bracket(Some(dec!(14_000_000)), dec!(0.06), dec!(0)),
                bracket(Some(dec!(50_000_000)), dec!(0.15), dec!(1_260_000)),
                bracket(Some(dec!(88_000_000)), dec!(0.24), dec!(5_760_000)),
                bracket(Some(dec!(150_000_000)), dec!(0.35), dec!(15_440_000)),
                bracket(Some(dec!(300_000_000)), dec!(0.38), dec!(19_940_000)),
                bracket(Some(dec!(500_000_000)), dec!(0.40), dec!(25_940_000)),
                bracket(Some(dec!(1_000_000_000)), dec!(0.42), dec!(35_940_000)),
                bracket(None, dec!(0.45), dec!(65_940_000)),
            ],
        }
    }
}

fn bracket(limit: Option<Money>, rate: Rate, deduction: Money) -> TaxBracket {
    TaxBracket {
        limit,
        rate,
        deduction,
    }
}

// An empty bracket table taxes nothing.
static ZERO_BRACKET: TaxBracket = TaxBracket {
    limit: None,
    rate: Decimal::ZERO,
    deduction: Decimal::ZERO,
};

impl TaxConfig {
    /// Withholding rate applied to a holding's dividend schedule.
    pub fn withholding_rate(&self, currency: Currency) -> Rate {
        if currency.is_home() {
            self.domestic_withholding_rate
        } else {
            self.foreign_withholding_rates
                .get(&currency)
                .copied()
                .unwrap_or(self.default_foreign_withholding_rate)
        }
    }

    /// First bracket whose limit covers the taxable base.
    pub fn bracket_for(&self, taxable_base: Money) -> &TaxBracket {
        self.brackets
            .iter()
            .find(|b| b.limit.map_or(true, |limit| taxable_base <= limit))
            .unwrap_or(&ZERO_BRACKET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withholding_rate_home_currency() {
        let cfg = TaxConfig::default();
        assert_eq!(cfg.withholding_rate(Currency::KRW), dec!(0.154));
    }

    #[test]
    fn test_withholding_rate_known_foreign() {
        let cfg = TaxConfig::default();
        assert_eq!(cfg.withholding_rate(Currency::USD), dec!(0.15));
        assert_eq!(cfg.withholding_rate(Currency::EUR), dec!(0.26375));
        assert_eq!(cfg.withholding_rate(Currency::HKD), dec!(0.0));
    }

    #[test]
    fn test_withholding_rate_falls_back_to_default() {
        let mut cfg = TaxConfig::default();
        cfg.foreign_withholding_rates.remove(&Currency::CAD);
        assert_eq!(cfg.withholding_rate(Currency::CAD), dec!(0.15));
    }

    #[test]
    fn test_bracket_lookup_boundaries() {
        let cfg = TaxConfig::default();
        assert_eq!(cfg.bracket_for(dec!(14_000_000)).rate, dec!(0.06));
        assert_eq!(cfg.bracket_for(dec!(14_000_001)).rate, dec!(0.15));
        assert_eq!(cfg.bracket_for(dec!(50_000_000)).rate, dec!(0.15));
        assert_eq!(cfg.bracket_for(dec!(2_000_000_000)).rate, dec!(0.45));
    }

    #[test]
    fn test_empty_bracket_table_taxes_nothing() {
        let cfg = TaxConfig {
            brackets: vec![],
            ..TaxConfig::default()
        };
        let b = cfg.bracket_for(dec!(100_000_000));
        assert_eq!(b.rate, Decimal::ZERO);
        assert_eq!(b.deduction, Decimal::ZERO);
    }
}
