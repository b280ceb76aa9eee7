//! Enterprise-value analysis.
//!
//! Consumes a 10-year FCFF/EBITDA projection and the company baseline, and
//! evaluates three approaches (DCF, relative multiple, market-based) at
//! three checkpoints: now, +5 years, +10 years. Rates arrive on the 0–100
//! scale and are converted to fractions internally.

use std::time::Instant;

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::deal::{EvParameters, SimulationDeal};
use crate::simulation::{run_simulation, SimulationResult};
use crate::types::{with_metadata, Company, ComputationOutput, Money, Multiple, Percent};
use crate::ValueCaseResult;

/// One approach evaluated at the three checkpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvCheckpoints {
    pub y0: Money,
    pub y5: Money,
    pub y10: Money,
}

/// DCF checkpoints are tagged: `None` means the terminal value is undefined
/// (growth rate at or above the discount rate), which callers must not read
/// as a zero valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfCheckpoints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y0: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y5: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y10: Option<Money>,
}

/// The three approaches × three checkpoints, plus the multiple backing the
/// relative approach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvAnalysis {
    pub dcf: DcfCheckpoints,
    pub relative: EvCheckpoints,
    pub market: EvCheckpoints,
    /// Current EV/EBITDA from the latest reported figures
    pub ev_ebitda_multiple: Multiple,
}

/// Current EV/EBITDA multiple from the latest reported year. Zero when the
/// company has no history or its current EBITDA is non-positive.
pub fn current_ev_ebitda_multiple(company: &Company) -> Multiple {
    let Some(latest) = company.latest_financial() else {
        return Decimal::ZERO;
    };
    let current_ev =
        company.market_cap + latest.interest_bearing_debt - latest.cash_and_equivalents;
    let current_ebitda = latest.operating_income + latest.depreciation;
    if current_ebitda <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        current_ev / current_ebitda
    }
}

/// DCF approach.
///
/// At checkpoint 0: present value of the explicit FCFF stream plus a
/// Gordon-growth terminal value discounted over the full horizon. At a
/// future checkpoint n: a pure perpetuity on `fcff[min(n, last)]`, not a
/// discounted remainder. Returns `None` when `g >= r` (terminal value
/// undefined); an empty projection values to zero defensively.
pub fn dcf_enterprise_value(
    fcff: &[Money],
    wacc: Percent,
    long_term_growth_rate: Percent,
    years_from_now: usize,
) -> Option<Money> {
    let r = wacc / dec!(100);
    let g = long_term_growth_rate / dec!(100);

    if g >= r {
        return None;
    }

    let Some(&last) = fcff.last() else {
        return Some(Decimal::ZERO);
    };

    if years_from_now == 0 {
        let mut pv = Decimal::ZERO;
        for (t, cash_flow) in fcff.iter().enumerate() {
            pv += cash_flow / (Decimal::ONE + r).powi(t as i64 + 1);
        }
        let terminal_value = last * (Decimal::ONE + g) / (r - g);
        pv += terminal_value / (Decimal::ONE + r).powi(fcff.len() as i64);
        Some(pv)
    } else {
        let index = years_from_now.min(fcff.len() - 1);
        Some(fcff[index] * (Decimal::ONE + g) / (r - g))
    }
}

/// Relative approach: EBITDA at the checkpoint times the current multiple.
pub fn relative_enterprise_value(ebitda: Money, multiple: Multiple) -> Money {
    ebitda * multiple
}

/// Market approach.
///
/// At checkpoint 0: market cap plus net debt from the latest reported year,
/// independent of the projection. At checkpoint n: market cap grown at the
/// short-term rate, plus initial net debt reduced by the first n years of
/// FCFF.
pub fn market_enterprise_value(
    company: &Company,
    fcff: &[Money],
    short_term_growth_rate: Percent,
    years_from_now: usize,
) -> Money {
    let Some(latest) = company.latest_financial() else {
        return Decimal::ZERO;
    };
    let g_st = short_term_growth_rate / dec!(100);

    if years_from_now == 0 {
        return company.market_cap + latest.interest_bearing_debt - latest.cash_and_equivalents;
    }

    let future_market_cap = company.market_cap * (Decimal::ONE + g_st).powi(years_from_now as i64);

    let cumulative_fcff: Money = fcff.iter().take(years_from_now).copied().sum();

    let initial_net_debt = latest.interest_bearing_debt - latest.cash_and_equivalents;
    future_market_cap + (initial_net_debt - cumulative_fcff)
}

/// Projection value at a checkpoint, clamped to the array bound; zero for an
/// empty projection.
fn checkpoint_value(values: &[Money], checkpoint: usize) -> Money {
    if values.is_empty() {
        Decimal::ZERO
    } else {
        values[checkpoint.min(values.len() - 1)]
    }
}

/// Derive the valuation inputs from a simulation run: FCFF is the combined
/// total FCF per year, EBITDA is the combined total EBIT plus the latest
/// reported depreciation (held constant, like the baseline).
pub fn projection_arrays(
    results: &[SimulationResult],
    latest_depreciation: Money,
) -> (Vec<Money>, Vec<Money>) {
    let fcff = results.iter().map(|r| r.total_fcf).collect();
    let ebitda = results
        .iter()
        .map(|r| r.total_ebit + latest_depreciation)
        .collect();
    (fcff, ebitda)
}

/// Evaluate all three approaches at all three checkpoints.
///
/// The tax rate in `params` does not enter any approach directly (the
/// projections are already after-tax); it is carried in the assumptions for
/// reference.
pub fn calculate_ev_analysis(
    company: &Company,
    fcff: &[Money],
    ebitda: &[Money],
    params: &EvParameters,
) -> ComputationOutput<EvAnalysis> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let multiple = current_ev_ebitda_multiple(company);

    if company.financials.is_empty() {
        warnings.push(format!(
            "Company '{}' has no financial history; multiple and market approaches value to zero",
            company.name
        ));
    }

    let dcf = DcfCheckpoints {
        y0: dcf_enterprise_value(fcff, params.wacc, params.long_term_growth_rate, 0),
        y5: dcf_enterprise_value(fcff, params.wacc, params.long_term_growth_rate, 5),
        y10: dcf_enterprise_value(fcff, params.wacc, params.long_term_growth_rate, 10),
    };
    if dcf.y0.is_none() {
        warnings.push(format!(
            "Long-term growth rate ({}%) must be below WACC ({}%) for a finite terminal value; DCF approach unavailable",
            params.long_term_growth_rate, params.wacc
        ));
    }

    let relative = EvCheckpoints {
        y0: relative_enterprise_value(checkpoint_value(ebitda, 0), multiple),
        y5: relative_enterprise_value(checkpoint_value(ebitda, 5), multiple),
        y10: relative_enterprise_value(checkpoint_value(ebitda, 10), multiple),
    };

    let market = EvCheckpoints {
        y0: market_enterprise_value(company, fcff, params.short_term_growth_rate, 0),
        y5: market_enterprise_value(company, fcff, params.short_term_growth_rate, 5),
        y10: market_enterprise_value(company, fcff, params.short_term_growth_rate, 10),
    };

    let result = EvAnalysis {
        dcf,
        relative,
        market,
        ev_ebitda_multiple: multiple,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Three-approach EV analysis (DCF / relative multiple / market)",
        params,
        warnings,
        elapsed,
        result,
    )
}

/// Value a saved deal end to end: run the simulation with the deal's
/// selection and tax rate, derive the projection arrays, and evaluate the
/// three approaches with the deal's parameters (defaults when absent).
pub fn value_deal(
    company: &Company,
    deal: &SimulationDeal,
) -> ValueCaseResult<ComputationOutput<EvAnalysis>> {
    let params = deal.ev_parameters.unwrap_or_default();
    let tax_rate = params.tax_rate / dec!(100);

    let simulation = run_simulation(
        company,
        &deal.strategies,
        &deal.selected_strategy_ids,
        tax_rate,
    )?;

    let latest_depreciation = company
        .latest_financial()
        .map(|f| f.depreciation)
        .unwrap_or(Decimal::ZERO);
    let (fcff, ebitda) = projection_arrays(&simulation.result, latest_depreciation);

    let mut analysis = calculate_ev_analysis(company, &fcff, &ebitda, &params);
    for w in simulation.warnings {
        analysis.warnings.push(format!("[simulation] {w}"));
    }
    Ok(analysis)
}
