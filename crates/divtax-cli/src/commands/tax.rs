use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use divtax_core::tax::comprehensive;
use divtax_core::types::with_metadata;
use divtax_core::TaxConfig;

/// Arguments for the comprehensive-tax delta
#[derive(Args)]
pub struct TaxArgs {
    /// Pre-tax annual dividend income in KRW (domestic + foreign)
    #[arg(long)]
    pub income: Decimal,

    /// Foreign portion of the annual dividend income in KRW
    #[arg(long, default_value = "0")]
    pub foreign_income: Decimal,

    /// Weighted average foreign withholding rate (defaults to 0.15)
    #[arg(long)]
    pub foreign_tax_rate: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TaxOutput {
    /// Positive = additional payment due, negative = refund,
    /// null = separate taxation is final
    additional_tax: Option<Decimal>,
    regime: String,
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.foreign_income > args.income {
        return Err("foreign income cannot exceed total income".into());
    }

    let start = Instant::now();
    let config = TaxConfig::default();
    let foreign_tax_rate = args
        .foreign_tax_rate
        .unwrap_or(config.default_foreign_withholding_rate);

    let additional_tax =
        comprehensive::additional_tax(args.income, args.foreign_income, foreign_tax_rate, &config);

    let result = TaxOutput {
        regime: match additional_tax {
            Some(_) => "comprehensive".to_string(),
            None => "separate".to_string(),
        },
        additional_tax,
    };

    let output = with_metadata(
        "Progressive comprehensive taxation over the separate-tax threshold, \
         with domestic gross-up, dividend tax credit, and capped foreign tax credit",
        &serde_json::json!({
            "separate_tax_threshold": config.separate_tax_threshold,
            "foreign_tax_rate": foreign_tax_rate,
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(&output)?)
}
