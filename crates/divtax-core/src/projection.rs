//! End-to-end portfolio operations.
//!
//! Forward mode splits a fixed total investment across holdings and
//! projects dividend income; inverse mode sizes the investment needed for
//! a target annual dividend and then runs the same projection on it. Both
//! validate first, compute the per-holding and aggregate figures, and
//! finish with the comprehensive-tax delta on the aggregate.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use crate::config::TaxConfig;
use crate::dividend::{aggregate, holding as holding_calc, sizing};
use crate::tax::comprehensive;
use crate::types::{
    with_metadata, ComputationOutput, DividendProjection, DividendProjectionInput, ExchangeRates,
    Holding, HoldingDividend, InvestmentSizing, InvestmentSizingInput, Money,
};
use crate::validate;
use crate::DivTaxResult;

/// Forward mode: project dividend income from a fixed total investment.
pub fn project_dividends(
    input: &DividendProjectionInput,
    config: &TaxConfig,
) -> DivTaxResult<ComputationOutput<DividendProjection>> {
    let start = Instant::now();

    validate::validate_portfolio(
        &input.holdings,
        input.total_investment,
        "total_investment",
        &input.exchange_rates,
        input.ratio_policy,
    )?;

    let mut warnings = Vec::new();
    let mut projection = run_projection(
        &input.holdings,
        input.total_investment,
        &input.exchange_rates,
        config,
        &mut warnings,
    );

    projection.additional_tax = comprehensive::additional_tax(
        projection.total_annual_dividend,
        projection.total_foreign_annual_dividend,
        projection.average_foreign_tax_rate,
        config,
    );

    Ok(with_metadata(
        "Yield-derived annual dividends per holding (floored to whole KRW), \
         after-tax monthly schedules by currency withholding rate, and the \
         comprehensive-tax delta on the aggregate income",
        &assumptions(input.ratio_policy, config),
        warnings,
        start.elapsed().as_micros() as u64,
        projection,
    ))
}

/// Inverse mode: size the investment required for a target annual dividend,
/// then project that investment.
pub fn size_investment(
    input: &InvestmentSizingInput,
    config: &TaxConfig,
) -> DivTaxResult<ComputationOutput<InvestmentSizing>> {
    let start = Instant::now();

    validate::validate_portfolio(
        &input.holdings,
        input.target_annual_dividend,
        "target_annual_dividend",
        &input.exchange_rates,
        input.ratio_policy,
    )?;

    let required_investment =
        sizing::required_investment(&input.holdings, input.target_annual_dividend)?;

    let mut warnings = Vec::new();
    let mut projection = run_projection(
        &input.holdings,
        required_investment,
        &input.exchange_rates,
        config,
        &mut warnings,
    );

    // The tax delta is assessed on the target income, not on the floored
    // per-holding sum, which lands slightly under the target.
    projection.additional_tax = comprehensive::additional_tax(
        input.target_annual_dividend,
        projection.total_foreign_annual_dividend,
        projection.average_foreign_tax_rate,
        config,
    );

    Ok(with_metadata(
        "Target dividend inverted through the allocation-weighted yield, \
         then projected forward at the required investment",
        &assumptions(input.ratio_policy, config),
        warnings,
        start.elapsed().as_micros() as u64,
        InvestmentSizing {
            required_investment,
            projection,
        },
    ))
}

fn run_projection(
    holdings: &[Holding],
    total_investment: Money,
    rates: &ExchangeRates,
    config: &TaxConfig,
    warnings: &mut Vec<String>,
) -> DividendProjection {
    let per_holding: Vec<HoldingDividend> = holdings
        .iter()
        .map(|holding| {
            let investment_amount = total_investment * holding.allocation_pct / dec!(100);
            let annual_dividend = holding_calc::annual_dividend(holding, investment_amount, rates);
            let monthly_dividends = holding_calc::monthly_schedule(holding, annual_dividend, config);

            if annual_dividend > Decimal::ZERO && monthly_dividends.is_empty() {
                warnings.push(format!(
                    "{} pays dividends but has no payment months; excluded from the monthly schedule",
                    holding.ticker
                ));
            }

            HoldingDividend {
                ticker: holding.ticker.clone(),
                investment_amount,
                share_quantity: holding_calc::share_quantity(holding, investment_amount, rates),
                annual_dividend,
                monthly_dividends,
                is_foreign: !holding.currency.is_home(),
                withholding_rate: config.withholding_rate(holding.currency),
            }
        })
        .collect();

    let totals = aggregate::aggregate(&per_holding, config.default_foreign_withholding_rate);

    DividendProjection {
        holdings: per_holding,
        total_annual_dividend: totals.total_annual_dividend,
        total_foreign_annual_dividend: totals.total_foreign_annual_dividend,
        average_foreign_tax_rate: totals.average_foreign_tax_rate,
        monthly_schedule: totals.monthly_schedule,
        additional_tax: None,
    }
}

fn assumptions(policy: crate::types::RatioPolicy, config: &TaxConfig) -> serde_json::Value {
    json!({
        "ratio_policy": policy,
        "separate_tax_threshold": config.separate_tax_threshold,
        "domestic_withholding_rate": config.domestic_withholding_rate,
        "default_foreign_withholding_rate": config.default_foreign_withholding_rate,
    })
}
