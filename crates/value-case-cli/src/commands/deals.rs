use chrono::Utc;
use clap::Args;
use serde::Deserialize;
use serde_json::{json, Value};

use value_case_core::deal::{remove_deal, upsert_deal, EvParameters};
use value_case_core::strategy::InvestmentStrategy;

use crate::input;
use crate::store;

const DEFAULT_STORE: &str = "deals.json";

/// Input document for `deal-save`.
#[derive(Deserialize)]
pub struct DealSaveDocument {
    pub name: String,
    pub company_id: String,
    pub strategies: Vec<InvestmentStrategy>,
    #[serde(default)]
    pub selected_strategy_ids: Vec<String>,
    #[serde(default)]
    pub ev_parameters: Option<EvParameters>,
}

/// Arguments for saving (upserting) a deal
#[derive(Args)]
pub struct DealSaveArgs {
    /// Path to a deal-save document (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to the deal store file
    #[arg(long, default_value = DEFAULT_STORE)]
    pub store: String,
}

/// Arguments for listing deals
#[derive(Args)]
pub struct DealListArgs {
    /// Path to the deal store file
    #[arg(long, default_value = DEFAULT_STORE)]
    pub store: String,
}

/// Arguments for deleting a deal
#[derive(Args)]
pub struct DealDeleteArgs {
    /// Id of the deal to delete
    #[arg(long)]
    pub id: String,

    /// Path to the deal store file
    #[arg(long, default_value = DEFAULT_STORE)]
    pub store: String,
}

pub fn run_deal_save(args: DealSaveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let doc: DealSaveDocument = input::load(args.input.as_deref())?;

    let mut deals = store::load_deals(&args.store)?;
    let saved = upsert_deal(
        &mut deals,
        &doc.name,
        &doc.company_id,
        doc.strategies,
        doc.selected_strategy_ids,
        doc.ev_parameters,
        Utc::now(),
    );
    store::save_deals(&args.store, &deals)?;

    Ok(serde_json::to_value(saved)?)
}

pub fn run_deal_list(args: DealListArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deals = store::load_deals(&args.store)?;

    let summaries: Vec<Value> = deals
        .iter()
        .map(|d| {
            json!({
                "id": d.id,
                "name": d.name,
                "company_id": d.company_id,
                "strategies": d.strategies.len(),
                "selected": d.selected_strategy_ids.len(),
                "created_at": d.created_at,
            })
        })
        .collect();

    Ok(Value::Array(summaries))
}

pub fn run_deal_delete(args: DealDeleteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut deals = store::load_deals(&args.store)?;

    if !remove_deal(&mut deals, &args.id) {
        return Err(format!("No deal with id '{}' in '{}'", args.id, args.store).into());
    }
    store::save_deals(&args.store, &deals)?;

    Ok(json!({ "deleted": args.id }))
}
