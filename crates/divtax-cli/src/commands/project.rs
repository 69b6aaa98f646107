use clap::Args;
use serde_json::Value;

use divtax_core::projection;
use divtax_core::types::{DividendProjectionInput, InvestmentSizingInput, RatioPolicy};
use divtax_core::TaxConfig;

use crate::input;

/// Arguments for forward dividend projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to a JSON portfolio file (reads piped stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Require allocation ratios to sum to exactly 100%
    #[arg(long)]
    pub strict_ratio: bool,
}

/// Arguments for inverse investment sizing
#[derive(Args)]
pub struct SizeArgs {
    /// Path to a JSON portfolio file (reads piped stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Require allocation ratios to sum to exactly 100%
    #[arg(long)]
    pub strict_ratio: bool,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut portfolio: DividendProjectionInput = input::load(args.input.as_deref())?;
    if args.strict_ratio {
        portfolio.ratio_policy = RatioPolicy::ExactlyFull;
    }

    let output = projection::project_dividends(&portfolio, &TaxConfig::default())?;
    Ok(serde_json::to_value(&output)?)
}

pub fn run_size(args: SizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut portfolio: InvestmentSizingInput = input::load(args.input.as_deref())?;
    if args.strict_ratio {
        portfolio.ratio_policy = RatioPolicy::ExactlyFull;
    }

    let output = projection::size_investment(&portfolio, &TaxConfig::default())?;
    Ok(serde_json::to_value(&output)?)
}
