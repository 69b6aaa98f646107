mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::project::{ProjectArgs, SizeArgs};
use commands::tax::TaxArgs;

/// Korean dividend-income and tax calculations
#[derive(Parser)]
#[command(
    name = "divtax",
    version,
    about = "Korean dividend-income and tax calculations",
    long_about = "A CLI for projecting dividend income across a multi-currency \
                  stock portfolio with decimal precision. Supports forward \
                  projections from a total investment, inverse sizing from a \
                  target annual dividend, and the comprehensive-taxation delta \
                  (종합과세) including foreign tax credits."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project annual and monthly dividends from a total investment
    Project(ProjectArgs),
    /// Size the investment required for a target annual dividend
    Size(SizeArgs),
    /// Comprehensive-tax delta for a year's dividend income
    Tax(TaxArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::project::run_project(args),
        Commands::Size(args) => commands::project::run_size(args),
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::Version => {
            println!("divtax {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
