use clap::Args;
use serde_json::Value;

use value_case_core::comparison::sector_average;
use value_case_core::types::Company;

use crate::input;

/// Arguments for the sector-average peer entity
#[derive(Args)]
pub struct SectorAverageArgs {
    /// Path to a company catalog document: an array of companies
    #[arg(long)]
    pub input: Option<String>,

    /// Sector to aggregate (exact match)
    #[arg(long)]
    pub sector: String,
}

pub fn run_sector_average(args: SectorAverageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog: Vec<Company> = input::load(args.input.as_deref())?;

    match sector_average(&args.sector, &catalog) {
        Some(average) => Ok(serde_json::to_value(average)?),
        None => Err(format!("No companies in sector '{}'; no comparison available", args.sector).into()),
    }
}
