//! Comprehensive dividend-income taxation (종합과세).
//!
//! Dividend income at or below the separate-taxation threshold is finally
//! taxed at source and owes nothing further. Above it, the excess joins the
//! progressive comprehensive regime:
//!
//! 1. Only domestic income fills the separate-tax bucket; foreign dividends
//!    spill into the comprehensive base in full.
//! 2. The domestic excess is grossed up by 11% to approximate
//!    pre-corporate-tax income; the gross-up later earns a 15% dividend tax
//!    credit. Foreign income is never grossed up and never earns the credit.
//! 3. Tax already withheld abroad is credited back, capped at the share of
//!    the total tax attributable to foreign income.
//!
//! The result is the delta against what was already withheld: positive is
//! an additional payment due at filing, negative a refund.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::TaxConfig;
use crate::types::{Money, Rate};

/// Additional comprehensive tax (or refund) on a year's dividend income.
///
/// `annual_dividend_income` is the pre-tax total (domestic + foreign) in
/// KRW; `foreign_dividend_income` the pre-tax foreign subset;
/// `average_foreign_tax_rate` the dividend-weighted withholding rate of the
/// foreign portion. Returns `None` when separate taxation is final, and the
/// whole-KRW delta otherwise.
pub fn additional_tax(
    annual_dividend_income: Money,
    foreign_dividend_income: Money,
    average_foreign_tax_rate: Rate,
    config: &TaxConfig,
) -> Option<Money> {
    if annual_dividend_income <= config.separate_tax_threshold {
        return None;
    }

    let domestic_income = annual_dividend_income - foreign_dividend_income;

    // Already withheld at source
    let domestic_withheld = domestic_income * config.domestic_withholding_rate;
    let foreign_withheld = foreign_dividend_income * average_foreign_tax_rate;

    // Only domestic income up to the threshold stays separately taxed
    let domestic_separate_income = domestic_income.min(config.separate_tax_threshold);
    let separate_tax = domestic_separate_income * config.domestic_withholding_rate;

    // Comprehensive base: domestic excess grossed up, foreign in full
    let domestic_excess = (domestic_income - config.separate_tax_threshold).max(Decimal::ZERO);
    let grossed_up_domestic = domestic_excess * config.gross_up_factor;
    let taxable_base = grossed_up_domestic + foreign_dividend_income;

    let bracket = config.bracket_for(taxable_base);
    let income_tax = taxable_base * bracket.rate - bracket.deduction;
    let local_surtax = income_tax * config.local_surtax_rate;

    let dividend_tax_credit = grossed_up_domestic * config.dividend_tax_credit_rate;

    let total_tax = separate_tax + income_tax + local_surtax - dividend_tax_credit;

    // Foreign tax credit, capped at the foreign share of the total tax
    let credit_limit = foreign_dividend_income / annual_dividend_income * total_tax;
    let foreign_tax_credit = foreign_withheld.min(credit_limit);

    let delta = total_tax - domestic_withheld - foreign_tax_credit;
    Some(delta.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}
