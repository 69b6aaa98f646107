use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use divtax_core::config::TaxConfig;
use divtax_core::dividend::{aggregate, holding as holding_calc};
use divtax_core::projection::{project_dividends, size_investment};
use divtax_core::types::{
    Currency, DividendProjectionInput, ExchangeRates, Holding, HoldingDividend,
    InvestmentSizingInput, RatioPolicy,
};
use divtax_core::DivTaxError;

// ===========================================================================
// Fixture holdings (reference ETF data)
// ===========================================================================

fn tqqq() -> Holding {
    Holding {
        name: "Proshares QQQ 3X".into(),
        ticker: "TQQQ".into(),
        price: dec!(150),
        currency: Currency::USD,
        annual_yield_pct: dec!(2.5),
        allocation_pct: dec!(100),
        dividend_months: vec![3, 6, 9, 12],
        purchase_date: None,
    }
}

fn jepq() -> Holding {
    Holding {
        name: "JP Morgan Nasdaq Equity Premium Income".into(),
        ticker: "JEPQ".into(),
        price: dec!(58),
        currency: Currency::USD,
        annual_yield_pct: dec!(10.2),
        allocation_pct: dec!(100),
        dividend_months: (1..=12).collect(),
        purchase_date: None,
    }
}

fn sgov() -> Holding {
    Holding {
        name: "iShares 0-3M Treasury Bond".into(),
        ticker: "SGOV".into(),
        price: dec!(100.64),
        currency: Currency::USD,
        annual_yield_pct: dec!(4.2),
        allocation_pct: dec!(100),
        dividend_months: (1..=12).collect(),
        purchase_date: None,
    }
}

fn usd(rate: Decimal) -> ExchangeRates {
    ExchangeRates::from_iter([(Currency::USD, rate)])
}

fn to_holding_dividend(
    holding: &Holding,
    investment: Decimal,
    rates: &ExchangeRates,
    config: &TaxConfig,
) -> HoldingDividend {
    let annual = holding_calc::annual_dividend(holding, investment, rates);
    HoldingDividend {
        ticker: holding.ticker.clone(),
        investment_amount: investment,
        share_quantity: holding_calc::share_quantity(holding, investment, rates),
        annual_dividend: annual,
        monthly_dividends: holding_calc::monthly_schedule(holding, annual, config),
        is_foreign: !holding.currency.is_home(),
        withholding_rate: config.withholding_rate(holding.currency),
    }
}

// ===========================================================================
// Reference three-ETF schedule merge
// ===========================================================================

#[test]
fn test_three_etf_merged_schedule() {
    let config = TaxConfig::default();

    // TQQQ and JEPQ priced at parity, SGOV at a 1.2 rate; per-holding
    // annual figures are 250 / 1,020 / 420.
    let tqqq_div = to_holding_dividend(&tqqq(), dec!(10000), &usd(dec!(1)), &config);
    let jepq_div = to_holding_dividend(&jepq(), dec!(10000), &usd(dec!(1)), &config);
    let sgov_div = to_holding_dividend(&sgov(), dec!(10000), &usd(dec!(1.2)), &config);

    assert_eq!(tqqq_div.annual_dividend, dec!(250));
    assert_eq!(jepq_div.annual_dividend, dec!(1020));
    assert_eq!(sgov_div.annual_dividend, dec!(420));

    let merged = aggregate::merge_monthly(&[tqqq_div, jepq_div, sgov_div]);

    // JEPQ 72.25 + SGOV 29.75 = 102 in plain months; TQQQ adds 53.13 in
    // quarter-end months.
    let expected = [
        dec!(102),
        dec!(102),
        dec!(155.13),
        dec!(102),
        dec!(102),
        dec!(155.13),
        dec!(102),
        dec!(102),
        dec!(155.13),
        dec!(102),
        dec!(102),
        dec!(155.13),
    ];
    assert_eq!(merged, expected);
}

// ===========================================================================
// Forward mode end to end
// ===========================================================================

fn mixed_portfolio() -> Vec<Holding> {
    let mut tqqq = tqqq();
    tqqq.allocation_pct = dec!(39);

    let mut jepq = jepq();
    jepq.allocation_pct = dec!(37.7);

    let domestic = Holding {
        name: "Korea Dividend Holdings".into(),
        ticker: "105560".into(),
        price: dec!(50000),
        currency: Currency::KRW,
        annual_yield_pct: dec!(2.0),
        allocation_pct: dec!(23.3),
        dividend_months: vec![4],
        purchase_date: None,
    };

    vec![tqqq, jepq, domestic]
}

#[test]
fn test_forward_mixed_portfolio() {
    let input = DividendProjectionInput {
        holdings: mixed_portfolio(),
        total_investment: dec!(1_000_000_000),
        exchange_rates: usd(dec!(1300)),
        ratio_policy: RatioPolicy::ExactlyFull,
    };
    let output = project_dividends(&input, &TaxConfig::default()).unwrap();
    let p = &output.result;

    // TQQQ: 390M KRW at 195,000/share = 2,000 shares × 4,875 = 9,750,000
    assert_eq!(p.holdings[0].share_quantity, dec!(2000));
    assert_eq!(p.holdings[0].annual_dividend, dec!(9_750_000));
    // JEPQ: 377M at 75,400/share = 5,000 shares × 7,690.8 = 38,454,000
    assert_eq!(p.holdings[1].share_quantity, dec!(5000));
    assert_eq!(p.holdings[1].annual_dividend, dec!(38_454_000));
    // Domestic: 233M × 2% = 4,660,000
    assert_eq!(p.holdings[2].annual_dividend, dec!(4_660_000));

    assert_eq!(p.total_annual_dividend, dec!(52_864_000));
    assert_eq!(p.total_foreign_annual_dividend, dec!(48_204_000));
    // Both foreign holdings are USD at 15%
    assert_eq!(p.average_foreign_tax_rate, dec!(0.15));

    // Monthly: JEPQ 38,454,000/12 × 0.85 = 2,723,825 every month;
    // TQQQ adds 2,071,875 in 3/6/9/12; domestic adds 3,942,360 in April.
    assert_eq!(p.monthly_schedule[0], dec!(2_723_825));
    assert_eq!(p.monthly_schedule[2], dec!(4_795_700));
    assert_eq!(p.monthly_schedule[3], dec!(6_666_185));

    // Over the 20M threshold with mostly-foreign income: a small refund
    // after the foreign tax credit.
    assert_eq!(p.additional_tax, Some(dec!(-75_436)));
}

#[test]
fn test_forward_under_threshold_has_no_filing() {
    let input = DividendProjectionInput {
        holdings: mixed_portfolio(),
        total_investment: dec!(100_000_000),
        exchange_rates: usd(dec!(1300)),
        ratio_policy: RatioPolicy::ExactlyFull,
    };
    let output = project_dividends(&input, &TaxConfig::default()).unwrap();
    assert!(output.result.total_annual_dividend < dec!(20_000_000));
    assert_eq!(output.result.additional_tax, None);
}

#[test]
fn test_forward_rejects_over_allocation() {
    let mut holdings = mixed_portfolio();
    holdings[0].allocation_pct = dec!(80);
    let input = DividendProjectionInput {
        holdings,
        total_investment: dec!(1_000_000),
        exchange_rates: usd(dec!(1300)),
        ratio_policy: RatioPolicy::AtMostFull,
    };
    let err = project_dividends(&input, &TaxConfig::default()).unwrap_err();
    assert!(matches!(err, DivTaxError::RatioSumExceeded { total } if total == dec!(141)));
}

#[test]
fn test_forward_names_missing_currencies() {
    let input = DividendProjectionInput {
        holdings: mixed_portfolio(),
        total_investment: dec!(1_000_000),
        exchange_rates: ExchangeRates::default(),
        ratio_policy: RatioPolicy::ExactlyFull,
    };
    let err = project_dividends(&input, &TaxConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "Exchange rate missing or non-positive for: USD");
}

// ===========================================================================
// Inverse mode end to end
// ===========================================================================

#[test]
fn test_inverse_mixed_portfolio() {
    // Weighted yield: 2.5%×0.39 + 10.2%×0.377 + 2.0%×0.233
    //               = 0.009750 + 0.038454 + 0.004660 = 0.052864
    let input = InvestmentSizingInput {
        holdings: mixed_portfolio(),
        target_annual_dividend: dec!(52_864_000),
        exchange_rates: usd(dec!(1300)),
        ratio_policy: RatioPolicy::ExactlyFull,
    };
    let output = size_investment(&input, &TaxConfig::default()).unwrap();
    let s = &output.result;

    // 52,864,000 / 0.052864 = exactly the 1B the forward test invests
    assert_eq!(s.required_investment, dec!(1_000_000_000));
    assert_eq!(s.projection.total_annual_dividend, dec!(52_864_000));
    assert_eq!(s.projection.total_foreign_annual_dividend, dec!(48_204_000));
    assert_eq!(s.projection.additional_tax, Some(dec!(-75_436)));
}

#[test]
fn test_inverse_rejects_zero_yield_portfolio() {
    let mut holdings = mixed_portfolio();
    for h in &mut holdings {
        h.annual_yield_pct = dec!(0);
    }
    let input = InvestmentSizingInput {
        holdings,
        target_annual_dividend: dec!(1_000_000),
        exchange_rates: usd(dec!(1300)),
        ratio_policy: RatioPolicy::ExactlyFull,
    };
    let err = size_investment(&input, &TaxConfig::default()).unwrap_err();
    assert!(matches!(err, DivTaxError::DegenerateInput(_)));
}

// ===========================================================================
// Envelope & serialization
// ===========================================================================

#[test]
fn test_output_envelope_serializes() {
    let input = DividendProjectionInput {
        holdings: mixed_portfolio(),
        total_investment: dec!(1_000_000_000),
        exchange_rates: usd(dec!(1300)),
        ratio_policy: RatioPolicy::ExactlyFull,
    };
    let output = project_dividends(&input, &TaxConfig::default()).unwrap();

    let json = serde_json::to_value(&output).unwrap();
    assert!(json.get("result").is_some());
    assert!(json.get("metadata").is_some());
    assert_eq!(json["result"]["monthly_schedule"].as_array().unwrap().len(), 12);

    // Inputs round-trip through serde
    let as_json = serde_json::to_string(&input).unwrap();
    let back: DividendProjectionInput = serde_json::from_str(&as_json).unwrap();
    assert_eq!(back.holdings.len(), 3);
    assert_eq!(back.total_investment, dec!(1_000_000_000));
}
