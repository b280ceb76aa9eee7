use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use value_case_core::deal::SimulationDeal;
use value_case_core::types::Company;
use value_case_core::valuation::value_deal;

use crate::input;

/// Input document for `ev`: the company plus the deal to value.
#[derive(Deserialize)]
pub struct EvDocument {
    pub company: Company,
    pub deal: SimulationDeal,
}

/// Arguments for the enterprise-value analysis
#[derive(Args)]
pub struct EvArgs {
    /// Path to an ev document (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_ev(args: EvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let doc: EvDocument = input::load(args.input.as_deref())?;

    if doc.deal.company_id != doc.company.id {
        return Err(format!(
            "Deal '{}' references company '{}', but the document carries company '{}'",
            doc.deal.name, doc.deal.company_id, doc.company.id
        )
        .into());
    }

    let analysis = value_deal(&doc.company, &doc.deal)?;
    Ok(serde_json::to_value(analysis)?)
}
