use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use value_case_core::simulation::{program_impact, run_simulation};
use value_case_core::strategy::{InvestmentStrategy, DEFAULT_TAX_RATE};
use value_case_core::types::Company;

use crate::input;

/// Input document for `simulate`: the company plus its strategy set.
#[derive(Deserialize)]
pub struct SimulateDocument {
    pub company: Company,
    pub strategies: Vec<InvestmentStrategy>,
    /// Strategy ids included in the projection; can be overridden with
    /// repeated `--select` flags.
    #[serde(default)]
    pub selected_strategy_ids: Vec<String>,
}

/// Input document for `program-impact`: a bare strategy set.
#[derive(Deserialize)]
pub struct StrategySetDocument {
    pub strategies: Vec<InvestmentStrategy>,
}

/// Arguments for the 10-year projection
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to a simulate document (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,

    /// Strategy id to include (repeatable; overrides the document)
    #[arg(long)]
    pub select: Vec<String>,

    /// Effective tax rate as a fraction
    #[arg(long)]
    pub tax_rate: Option<Decimal>,
}

/// Arguments for the truncated-horizon impact summary
#[derive(Args)]
pub struct ProgramImpactArgs {
    /// Path to a strategy-set document (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,

    /// Horizon in years (clamped to 10)
    #[arg(long, default_value = "10")]
    pub years: usize,

    /// Effective tax rate as a fraction
    #[arg(long)]
    pub tax_rate: Option<Decimal>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let doc: SimulateDocument = input::load(args.input.as_deref())?;

    let selected = if args.select.is_empty() {
        doc.selected_strategy_ids
    } else {
        args.select
    };
    let tax_rate = args.tax_rate.unwrap_or(DEFAULT_TAX_RATE);

    let output = run_simulation(&doc.company, &doc.strategies, &selected, tax_rate)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_program_impact(args: ProgramImpactArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let doc: StrategySetDocument = input::load(args.input.as_deref())?;
    let tax_rate = args.tax_rate.unwrap_or(DEFAULT_TAX_RATE);

    let impact = program_impact(&doc.strategies, args.years, tax_rate);
    Ok(serde_json::to_value(impact)?)
}
