//! 10-year projection engine.
//!
//! Overlays the combined effect of the active strategies on a constant
//! baseline taken from the company's latest reported year. The baseline is
//! deliberately not grown across the horizon; only strategy impacts vary by
//! year.

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValueCaseError;
use crate::strategy::{cell, InvestmentStrategy};
use crate::types::{with_metadata, Company, ComputationOutput, Money, Rate, SIMULATION_YEARS};
use crate::ValueCaseResult;

/// One simulated year: constant baseline, aggregated strategy impact, and
/// their sum. Produced fresh on every run, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub year: i32,

    pub base_revenue: Money,
    pub base_ebit: Money,
    pub base_fcf: Money,

    pub impact_revenue: Money,
    pub impact_cost: Money,
    /// Non-cash P&L charge (amortisation etc.)
    pub impact_pl: Money,
    /// Investment cash outlay
    pub impact_cf: Money,
    pub impact_ebit: Money,
    pub impact_fcf: Money,

    pub total_revenue: Money,
    pub total_ebit: Money,
    pub total_fcf: Money,
}

/// Combined effect of a strategy set over a truncated horizon, with no
/// baseline component. Meant to be added to a baseline by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramImpact {
    pub revenue_impact: Money,
    pub ebit_impact: Money,
    pub fcf_impact: Money,
}

#[derive(Serialize)]
struct SimulationAssumptions<'a> {
    company_id: &'a str,
    selected_strategy_ids: &'a [String],
    tax_rate: Rate,
    horizon_years: usize,
}

fn validate_tax_rate(tax_rate: Rate) -> ValueCaseResult<()> {
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
        return Err(ValueCaseError::InvalidInput {
            field: "tax_rate".into(),
            reason: "Tax rate must be a fraction between 0 and 1".into(),
        });
    }
    Ok(())
}

/// Run the 10-year combined projection.
///
/// Only strategies whose id appears in `selected_strategy_ids` contribute
/// impact; the rest are carried but ignored. A company without financial
/// history yields an empty result sequence, not an error. `tax_rate` is a
/// fraction (0.30 = 30%).
pub fn run_simulation(
    company: &Company,
    strategies: &[InvestmentStrategy],
    selected_strategy_ids: &[String],
    tax_rate: Rate,
) -> ValueCaseResult<ComputationOutput<Vec<SimulationResult>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_tax_rate(tax_rate)?;

    let assumptions = SimulationAssumptions {
        company_id: &company.id,
        selected_strategy_ids,
        tax_rate,
        horizon_years: SIMULATION_YEARS,
    };

    let mut results = Vec::new();

    let Some(latest) = company.latest_financial() else {
        warnings.push(format!(
            "Company '{}' has no financial history; returning an empty projection",
            company.name
        ));
        let elapsed = start.elapsed().as_micros() as u64;
        return Ok(with_metadata(
            "Constant-baseline 10-year strategy overlay",
            &assumptions,
            warnings,
            elapsed,
            results,
        ));
    };

    let active: Vec<&InvestmentStrategy> = strategies
        .iter()
        .filter(|s| selected_strategy_ids.contains(&s.id))
        .collect();

    let base_revenue = latest.revenue;
    let base_ebit = latest.operating_income;
    let base_fcf = latest.operating_income * (Decimal::ONE - tax_rate) + latest.depreciation
        - latest.capital_expenditure;

    for year_offset in 0..SIMULATION_YEARS {
        let year = latest.year + year_offset as i32 + 1;

        let mut impact_revenue = Decimal::ZERO;
        let mut impact_cost = Decimal::ZERO;
        let mut impact_pl = Decimal::ZERO;
        let mut impact_cf = Decimal::ZERO;
        let mut impact_cf_change = Decimal::ZERO;

        for strategy in &active {
            impact_revenue += cell(&strategy.input.revenue_change, year_offset);
            impact_cost += cell(&strategy.input.cost_change, year_offset);
            impact_pl += cell(&strategy.input.pl_impact, year_offset);
            impact_cf += cell(&strategy.input.cash_impact, year_offset);
            impact_cf_change += cell(&strategy.input.cf_change, year_offset);
        }

        let impact_ebit = impact_revenue - impact_cost - impact_pl;
        let impact_fcf = impact_ebit * (Decimal::ONE - tax_rate) - impact_cf + impact_cf_change;

        results.push(SimulationResult {
            year,
            base_revenue,
            base_ebit,
            base_fcf,
            impact_revenue,
            impact_cost,
            impact_pl,
            impact_cf,
            impact_ebit,
            impact_fcf,
            total_revenue: base_revenue + impact_revenue,
            total_ebit: base_ebit + impact_ebit,
            total_fcf: base_fcf + impact_fcf,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Constant-baseline 10-year strategy overlay",
        &assumptions,
        warnings,
        elapsed,
        results,
    ))
}

/// Collapse a strategy set's effect over the first `years` years (clamped to
/// the 10-year horizon) into three scalar deltas. All passed-in strategies
/// count; there is no active/inactive filter here.
pub fn program_impact(
    strategies: &[InvestmentStrategy],
    years: usize,
    tax_rate: Rate,
) -> ProgramImpact {
    let mut revenue_impact = Decimal::ZERO;
    let mut ebit_impact = Decimal::ZERO;
    let mut fcf_impact = Decimal::ZERO;

    let actual_years = years.min(SIMULATION_YEARS);

    for year_idx in 0..actual_years {
        let mut year_revenue = Decimal::ZERO;
        let mut year_cost = Decimal::ZERO;
        let mut year_pl = Decimal::ZERO;
        let mut year_cf = Decimal::ZERO;
        let mut year_cf_change = Decimal::ZERO;

        for strategy in strategies {
            year_revenue += cell(&strategy.input.revenue_change, year_idx);
            year_cost += cell(&strategy.input.cost_change, year_idx);
            year_pl += cell(&strategy.input.pl_impact, year_idx);
            year_cf += cell(&strategy.input.cash_impact, year_idx);
            year_cf_change += cell(&strategy.input.cf_change, year_idx);
        }

        revenue_impact += year_revenue;

        let year_ebit_impact = year_revenue - year_cost - year_pl;
        ebit_impact += year_ebit_impact;
        fcf_impact += year_ebit_impact * (Decimal::ONE - tax_rate) - year_cf + year_cf_change;
    }

    ProgramImpact {
        revenue_impact,
        ebit_impact,
        fcf_impact,
    }
}
