//! Investment strategies and their derived KPIs.
//!
//! A strategy is five parallel 10-year input arrays plus a baseline cost.
//! The derived KPI block is always a pure function of those inputs and the
//! tax rate in effect; [`calculate_strategy_kpis`] is the only derivation
//! path, so stale KPIs can only arise from mutating `input` without calling
//! [`InvestmentStrategy::recalculate`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Money, Percent, Rate, SIMULATION_YEARS};

/// Effective tax rate assumed when none is supplied, as a fraction.
pub const DEFAULT_TAX_RATE: Rate = dec!(0.30);

/// The raw inputs of one strategy: reference cost plus five parallel
/// year-offset arrays (length [`SIMULATION_YEARS`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyInput {
    /// Scalar reference cost for cost-reduction-% comparison
    pub baseline_cost: Money,
    /// Actual cash outlay per year
    pub cash_impact: Vec<Money>,
    /// Non-cash P&L charge per year (e.g. amortisation)
    pub pl_impact: Vec<Money>,
    pub revenue_change: Vec<Money>,
    pub cost_change: Vec<Money>,
    /// Other cash-flow adjustments outside the EBIT bridge
    pub cf_change: Vec<Money>,
}

/// KPIs derived from a [`StrategyInput`]. Never hand-edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyKpis {
    /// Total FCF impact over total investment, in percent
    pub roi: Decimal,
    /// Linear IRR approximation, in percent. Deliberately not an iterative
    /// root-finding IRR; saved records depend on this exact formula.
    pub irr: Decimal,
    /// 1-based year in which cumulative FCF impact recovers the investment;
    /// 10 when never recovered within the horizon
    pub payback_period: u32,
    pub total_revenue_increase: Money,
    pub total_ebit_increase: Money,
    pub total_cost_reduction: Money,
    /// Total cost reduction relative to the baseline cost, in percent
    pub cost_reduction_percent: Percent,
    /// Total FCF impact over the horizon
    pub fcf: Money,
}

/// One investment strategy: identity, inputs, and cached KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentStrategy {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub input: StrategyInput,
    #[serde(flatten)]
    pub kpis: StrategyKpis,
}

impl InvestmentStrategy {
    /// A zero-filled strategy with a fresh id and zeroed KPIs.
    pub fn empty(name: impl Into<String>, baseline_cost: Money) -> Self {
        InvestmentStrategy {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            input: StrategyInput {
                baseline_cost,
                cash_impact: vec![Decimal::ZERO; SIMULATION_YEARS],
                pl_impact: vec![Decimal::ZERO; SIMULATION_YEARS],
                revenue_change: vec![Decimal::ZERO; SIMULATION_YEARS],
                cost_change: vec![Decimal::ZERO; SIMULATION_YEARS],
                cf_change: vec![Decimal::ZERO; SIMULATION_YEARS],
            },
            kpis: StrategyKpis::default(),
        }
    }

    /// Refresh the cached KPI block from the current inputs. Must be called
    /// after any mutation of `input`.
    pub fn recalculate(&mut self, tax_rate: Rate) {
        self.kpis = calculate_strategy_kpis(&self.input, tax_rate);
    }
}

/// Array cell with missing entries treated as zero.
pub(crate) fn cell(values: &[Money], idx: usize) -> Money {
    values.get(idx).copied().unwrap_or(Decimal::ZERO)
}

/// Derive the KPI block for one strategy.
///
/// `tax_rate` is a fraction (0.30 = 30%). Per year offset i:
/// EBIT impact = revenueChange − costChange − plImpact, and
/// FCF impact = EBIT impact × (1 − tax) − cashImpact + cfChange.
pub fn calculate_strategy_kpis(input: &StrategyInput, tax_rate: Rate) -> StrategyKpis {
    let total_investment: Money = input.cash_impact.iter().copied().sum();

    let yearly_ebit_impact: Vec<Money> = (0..SIMULATION_YEARS)
        .map(|i| {
            cell(&input.revenue_change, i) - cell(&input.cost_change, i) - cell(&input.pl_impact, i)
        })
        .collect();

    let yearly_fcf_impact: Vec<Money> = yearly_ebit_impact
        .iter()
        .enumerate()
        .map(|(i, ebit)| {
            ebit * (Decimal::ONE - tax_rate) - cell(&input.cash_impact, i)
                + cell(&input.cf_change, i)
        })
        .collect();

    let total_revenue_increase: Money = input.revenue_change.iter().copied().sum();
    let total_ebit_increase: Money = yearly_ebit_impact.iter().copied().sum();
    let total_cost_reduction: Money = input.cost_change.iter().copied().sum();
    let fcf: Money = yearly_fcf_impact.iter().copied().sum();

    let roi = if total_investment.is_zero() {
        Decimal::ZERO
    } else {
        fcf / total_investment * dec!(100)
    };

    // Simplified linear approximation; a true IRR would need iteration and
    // would change every saved record.
    let irr = if total_investment.is_zero() {
        Decimal::ZERO
    } else {
        fcf / total_investment / Decimal::from(SIMULATION_YEARS as u32) * dec!(100)
    };

    let mut cumulative_cash_flow = Decimal::ZERO;
    let mut payback_period = SIMULATION_YEARS as u32;
    for (i, yearly) in yearly_fcf_impact.iter().enumerate() {
        cumulative_cash_flow += yearly;
        if cumulative_cash_flow >= total_investment {
            payback_period = i as u32 + 1;
            break;
        }
    }

    let cost_reduction_percent = if input.baseline_cost.is_zero() {
        Decimal::ZERO
    } else {
        total_cost_reduction / input.baseline_cost * dec!(100)
    };

    StrategyKpis {
        roi,
        irr,
        payback_period,
        total_revenue_increase,
        total_ebit_increase,
        total_cost_reduction,
        cost_reduction_percent,
        fcf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn ramp_strategy() -> InvestmentStrategy {
        // 100 up front, revenue ramping 0/50/100/150 then 200 flat
        let mut s = InvestmentStrategy::empty("ramp", dec!(100));
        s.input.cash_impact[0] = dec!(100);
        s.input.revenue_change = vec![
            dec!(0),
            dec!(50),
            dec!(100),
            dec!(150),
            dec!(200),
            dec!(200),
            dec!(200),
            dec!(200),
            dec!(200),
            dec!(200),
        ];
        s
    }

    #[test]
    fn test_ramp_strategy_kpis() {
        let kpis = calculate_strategy_kpis(&ramp_strategy().input, DEFAULT_TAX_RATE);

        assert_eq!(kpis.total_revenue_increase, dec!(1300));
        assert_eq!(kpis.total_ebit_increase, dec!(1300));
        assert_eq!(kpis.total_cost_reduction, Decimal::ZERO);
        // FCF = 1300 * 0.7 - 100 = 810
        assert_eq!(kpis.fcf, dec!(810));
        assert_eq!(kpis.roi, dec!(810));
        assert_eq!(kpis.irr, dec!(81));
        assert_eq!(kpis.cost_reduction_percent, Decimal::ZERO);
        // Cumulative FCF impact: -100, -65, 5, 110 — first >= 100 at offset 3
        assert_eq!(kpis.payback_period, 4);
    }

    #[test]
    fn test_all_zero_inputs_give_zero_kpis() {
        let s = InvestmentStrategy::empty("noop", dec!(500));
        let kpis = calculate_strategy_kpis(&s.input, DEFAULT_TAX_RATE);

        assert_eq!(kpis.roi, Decimal::ZERO);
        assert_eq!(kpis.irr, Decimal::ZERO);
        assert_eq!(kpis.total_revenue_increase, Decimal::ZERO);
        assert_eq!(kpis.total_ebit_increase, Decimal::ZERO);
        assert_eq!(kpis.total_cost_reduction, Decimal::ZERO);
        assert_eq!(kpis.cost_reduction_percent, Decimal::ZERO);
        assert_eq!(kpis.fcf, Decimal::ZERO);
        // All-zero flows recover a zero investment immediately
        assert_eq!(kpis.payback_period, 1);
    }

    #[test]
    fn test_payback_never_recovered() {
        let mut s = InvestmentStrategy::empty("sunk", dec!(0));
        s.input.cash_impact[0] = dec!(1000);
        s.input.revenue_change = vec![dec!(10); SIMULATION_YEARS];
        let kpis = calculate_strategy_kpis(&s.input, DEFAULT_TAX_RATE);
        assert_eq!(kpis.payback_period, 10);
        assert!(kpis.fcf < Decimal::ZERO);
    }

    #[test]
    fn test_short_arrays_treated_as_zero() {
        let mut s = InvestmentStrategy::empty("short", dec!(0));
        s.input.revenue_change = vec![dec!(100)]; // years 1..9 implicitly zero
        s.input.cost_change.clear();
        let kpis = calculate_strategy_kpis(&s.input, DEFAULT_TAX_RATE);
        assert_eq!(kpis.total_revenue_increase, dec!(100));
        assert_eq!(kpis.total_ebit_increase, dec!(100));
        assert_eq!(kpis.fcf, dec!(70));
    }

    #[test]
    fn test_pl_impact_reduces_ebit_but_not_cash() {
        let mut s = InvestmentStrategy::empty("amortised", dec!(0));
        s.input.revenue_change[0] = dec!(100);
        s.input.pl_impact[0] = dec!(40);
        let kpis = calculate_strategy_kpis(&s.input, DEFAULT_TAX_RATE);
        assert_eq!(kpis.total_ebit_increase, dec!(60));
        // FCF = 60 * 0.7 = 42; amortisation is non-cash
        assert_eq!(kpis.fcf, dec!(42));
    }

    #[test]
    fn test_cost_reduction_percent() {
        let mut s = InvestmentStrategy::empty("efficiency", dec!(400));
        s.input.cost_change = vec![dec!(-20); SIMULATION_YEARS];
        let kpis = calculate_strategy_kpis(&s.input, DEFAULT_TAX_RATE);
        assert_eq!(kpis.total_cost_reduction, dec!(-200));
        assert_eq!(kpis.cost_reduction_percent, dec!(-50));
    }

    #[test]
    fn test_recalculate_updates_cached_block() {
        let mut s = ramp_strategy();
        s.recalculate(DEFAULT_TAX_RATE);
        assert_eq!(s.kpis.fcf, dec!(810));

        s.input.revenue_change[1] += dec!(10);
        let stale = s.kpis.clone();
        s.recalculate(DEFAULT_TAX_RATE);
        assert_ne!(s.kpis, stale);
        assert_eq!(s.kpis.fcf, dec!(817));
    }

    #[test]
    fn test_empty_strategy_shape() {
        let s = InvestmentStrategy::empty("blank", dec!(250));
        assert_eq!(s.input.cash_impact.len(), SIMULATION_YEARS);
        assert_eq!(s.input.cf_change.len(), SIMULATION_YEARS);
        assert_eq!(s.input.baseline_cost, dec!(250));
        assert_eq!(s.kpis, StrategyKpis::default());
        assert!(!s.id.is_empty());
    }
}
