use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use value_case_core::strategy::InvestmentStrategy;

use crate::input;

/// Arguments for KPI recomputation
#[derive(Args)]
pub struct KpisArgs {
    /// Path to a strategy document (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,

    /// Effective tax rate as a fraction (e.g. 0.3 for 30%)
    #[arg(long, default_value = "0.3")]
    pub tax_rate: Decimal,
}

pub fn run_kpis(args: KpisArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut strategy: InvestmentStrategy = input::load(args.input.as_deref())?;
    strategy.recalculate(args.tax_rate);
    Ok(serde_json::to_value(strategy)?)
}
