//! Saved deals: a company reference paired with an owned strategy set,
//! selection state, and valuation parameters.
//!
//! The engine never touches storage itself; it operates on an owned deal
//! collection handed in by the application layer, which persists it through
//! whatever key-value mechanism it likes.

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::strategy::InvestmentStrategy;
use crate::types::Percent;

/// Parameters for the enterprise-value analysis, all on the 0–100 scale.
/// Pure configuration embedded by value in a deal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvParameters {
    pub wacc: Percent,
    pub tax_rate: Percent,
    /// Growth applied to market cap in the market approach
    pub short_term_growth_rate: Percent,
    /// Perpetuity growth for the DCF terminal value
    pub long_term_growth_rate: Percent,
}

impl Default for EvParameters {
    fn default() -> Self {
        EvParameters {
            wacc: dec!(8.0),
            tax_rate: dec!(30.0),
            short_term_growth_rate: dec!(3.0),
            long_term_growth_rate: dec!(2.0),
        }
    }
}

/// A saved scenario: strategies are owned by the deal, the company is a
/// foreign reference into the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationDeal {
    pub id: String,
    pub name: String,
    pub company_id: String,
    pub strategies: Vec<InvestmentStrategy>,
    /// Subset of strategy ids included in the active simulation. A strategy
    /// can stay saved while being excluded from projections.
    pub selected_strategy_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ev_parameters: Option<EvParameters>,
    pub created_at: DateTime<Utc>,
}

/// Save a deal into `deals`, upserting by the `(company_id, name)` pair.
///
/// A match updates the stored strategies, selection, and parameters in place
/// and refreshes the timestamp, keeping the original id; otherwise a new
/// deal with a fresh id is appended. Returns a clone of the stored record.
#[allow(clippy::too_many_arguments)]
pub fn upsert_deal(
    deals: &mut Vec<SimulationDeal>,
    name: &str,
    company_id: &str,
    strategies: Vec<InvestmentStrategy>,
    selected_strategy_ids: Vec<String>,
    ev_parameters: Option<EvParameters>,
    now: DateTime<Utc>,
) -> SimulationDeal {
    if let Some(existing) = deals
        .iter_mut()
        .find(|d| d.company_id == company_id && d.name == name)
    {
        existing.strategies = strategies;
        existing.selected_strategy_ids = selected_strategy_ids;
        existing.ev_parameters = ev_parameters;
        existing.created_at = now;
        return existing.clone();
    }

    let deal = SimulationDeal {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        company_id: company_id.to_string(),
        strategies,
        selected_strategy_ids,
        ev_parameters,
        created_at: now,
    };
    deals.push(deal.clone());
    deal
}

/// Delete a deal by id, discarding its strategies. Returns whether a deal
/// was removed.
pub fn remove_deal(deals: &mut Vec<SimulationDeal>, id: &str) -> bool {
    let before = deals.len();
    deals.retain(|d| d.id != id);
    deals.len() != before
}
