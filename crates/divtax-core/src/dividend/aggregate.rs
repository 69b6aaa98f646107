//! Portfolio-level aggregation of per-holding dividend figures.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{HoldingDividend, Money, Rate};

/// Aggregate totals for a portfolio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioTotals {
    pub total_annual_dividend: Money,
    pub total_foreign_annual_dividend: Money,
    pub average_foreign_tax_rate: Rate,
    pub monthly_schedule: [Money; 12],
}

/// Sum per-holding annual dividends, derive the dividend-weighted average
/// foreign withholding rate, and merge every holding's monthly schedule
/// into a single January-to-December series.
///
/// `default_foreign_rate` is the neutral assumption reported when the
/// portfolio has no foreign dividend income to weight.
pub fn aggregate(holdings: &[HoldingDividend], default_foreign_rate: Rate) -> PortfolioTotals {
    let total_annual_dividend: Money = holdings.iter().map(|h| h.annual_dividend).sum();

    let total_foreign_annual_dividend: Money = holdings
        .iter()
        .filter(|h| h.is_foreign)
        .map(|h| h.annual_dividend)
        .sum();

    let average_foreign_tax_rate = if total_foreign_annual_dividend > Decimal::ZERO {
        let weighted: Decimal = holdings
            .iter()
            .filter(|h| h.is_foreign)
            .map(|h| h.annual_dividend * h.withholding_rate)
            .sum();
        weighted / total_foreign_annual_dividend
    } else {
        default_foreign_rate
    };

    PortfolioTotals {
        total_annual_dividend,
        total_foreign_annual_dividend,
        average_foreign_tax_rate,
        monthly_schedule: merge_monthly(holdings),
    }
}

/// Accumulate every holding's `(month, amount)` entries into a 12-slot
/// series (slot 0 = January), then round each slot to 2dp.
pub fn merge_monthly(holdings: &[HoldingDividend]) -> [Money; 12] {
    let mut slots = [Decimal::ZERO; 12];
    for holding in holdings {
        for (&month, &amount) in &holding.monthly_dividends {
            slots[(month - 1) as usize] += amount;
        }
    }
    for slot in &mut slots {
        *slot = slot.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    }
    slots
}
