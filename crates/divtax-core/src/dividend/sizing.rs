//! Inverse mode: solve for the investment required to hit a target
//! annual dividend.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::DivTaxError;
use crate::types::{Holding, Money};
use crate::DivTaxResult;

/// Allocation-weighted dividend yield of the portfolio, as a decimal.
///
/// Σ (yield% / 100) × (allocation% / 100). A holding with zero yield or
/// zero allocation contributes nothing.
pub fn weighted_yield(holdings: &[Holding]) -> Decimal {
    holdings
        .iter()
        .map(|h| (h.annual_yield_pct / dec!(100)) * (h.allocation_pct / dec!(100)))
        .sum()
}

/// Total investment required to produce `target_annual_dividend`.
///
/// Inverts the forward calculation through the weighted yield. A portfolio
/// whose weighted yield is zero cannot produce any dividend; that is a
/// degenerate input, surfaced as an error rather than a division by zero.
pub fn required_investment(holdings: &[Holding], target_annual_dividend: Money) -> DivTaxResult<Money> {
    let yield_sum = weighted_yield(holdings);
    if yield_sum <= Decimal::ZERO {
        return Err(DivTaxError::DegenerateInput(
            "weighted dividend yield is zero; no holding has both a positive yield and a positive allocation".into(),
        ));
    }

    Ok(target_annual_dividend / yield_sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;

    fn holding(yield_pct: Decimal, allocation_pct: Decimal) -> Holding {
        Holding {
            name: String::new(),
            ticker: "TEST".into(),
            price: dec!(100),
            currency: Currency::USD,
            annual_yield_pct: yield_pct,
            allocation_pct,
            dividend_months: vec![],
            purchase_date: None,
        }
    }

    #[test]
    fn test_weighted_yield_single_full_allocation() {
        assert_eq!(weighted_yield(&[holding(dec!(5), dec!(100))]), dec!(0.05));
    }

    #[test]
    fn test_weighted_yield_split_allocation() {
        // 4% at 60% + 2% at 40% = 0.024 + 0.008 = 0.032
        let holdings = [holding(dec!(4), dec!(60)), holding(dec!(2), dec!(40))];
        assert_eq!(weighted_yield(&holdings), dec!(0.032));
    }

    #[test]
    fn test_required_investment() {
        // 1,200,000 target / 0.032 = 37,500,000
        let holdings = [holding(dec!(4), dec!(60)), holding(dec!(2), dec!(40))];
        assert_eq!(
            required_investment(&holdings, dec!(1_200_000)).unwrap(),
            dec!(37_500_000)
        );
    }

    #[test]
    fn test_zero_weighted_yield_is_degenerate() {
        let holdings = [holding(dec!(0), dec!(100)), holding(dec!(5), dec!(0))];
        let err = required_investment(&holdings, dec!(1_000_000)).unwrap_err();
        assert!(matches!(err, DivTaxError::DegenerateInput(_)));
    }

    #[test]
    fn test_empty_portfolio_is_degenerate() {
        assert!(required_investment(&[], dec!(1_000_000)).is_err());
    }
}
