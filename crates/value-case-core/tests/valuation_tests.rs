use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use value_case_core::comparison::sector_average;
use value_case_core::deal::{EvParameters, SimulationDeal};
use value_case_core::strategy::InvestmentStrategy;
use value_case_core::types::{Company, FinancialYear};
use value_case_core::valuation::{
    calculate_ev_analysis, dcf_enterprise_value, market_enterprise_value, value_deal,
};

fn financial_year(year: i32, scale: Decimal) -> FinancialYear {
    FinancialYear {
        year,
        revenue: dec!(1000) * scale,
        operating_income: dec!(120) * scale,
        net_income: dec!(70) * scale,
        total_assets: dec!(2000) * scale,
        total_liabilities: dec!(1100) * scale,
        net_assets: dec!(900) * scale,
        cash_and_equivalents: dec!(180) * scale,
        interest_bearing_debt: dec!(420) * scale,
        depreciation: dec!(60) * scale,
        capital_expenditure: dec!(70) * scale,
    }
}

fn company(id: &str, sector: &str, scale: Decimal) -> Company {
    Company {
        id: id.into(),
        name: format!("Company {id}"),
        code: "9999".into(),
        sector: sector.into(),
        market_cap: dec!(1800) * scale,
        stock_price: dec!(1500) * scale,
        shares_outstanding: dec!(100) * scale,
        beta: dec!(1.0),
        wacc: dec!(8),
        tax_rate: dec!(30),
        financials: vec![financial_year(2024, scale), financial_year(2023, scale)],
        fiscal_year_start_month: Some(4),
        narrative: None,
        mid_term_plan_period: None,
    }
}

// ===========================================================================
// EV approaches
// ===========================================================================

#[test]
fn test_market_ev_now_matches_latest_figures_exactly() {
    let c = company("c-1", "Technology", Decimal::ONE);
    // marketCap + debt - cash = 1800 + 420 - 180 = 2040, whatever the FCFF
    // projection says.
    let with_projection = market_enterprise_value(&c, &[dec!(12345); 10], dec!(3), 0);
    let without = market_enterprise_value(&c, &[], dec!(3), 0);
    assert_eq!(with_projection, dec!(2040));
    assert_eq!(without, dec!(2040));
}

#[test]
fn test_market_ev_future_projects_cap_and_pays_down_debt() {
    let c = company("c-1", "Technology", Decimal::ONE);
    let fcff = vec![dec!(90); 10];
    let ev5 = market_enterprise_value(&c, &fcff, dec!(3), 5);
    let expected = dec!(1800) * dec!(1.03).powi(5) + (dec!(240) - dec!(450));
    assert_eq!(ev5, expected);
}

#[test]
fn test_dcf_unavailable_when_growth_meets_wacc() {
    let fcff = vec![dec!(100); 10];
    for checkpoint in [0usize, 5, 10] {
        assert_eq!(
            dcf_enterprise_value(&fcff, dec!(8), dec!(10), checkpoint),
            None,
            "checkpoint {checkpoint} should be unavailable when g >= r"
        );
    }
}

#[test]
fn test_dcf_now_discounts_stream_and_terminal() {
    // Two-year stream keeps the arithmetic checkable by hand:
    // PV = 110/1.1 + 121/1.1^2 + (121*1.02/0.08)/1.1^2
    let fcff = vec![dec!(110), dec!(121)];
    let ev = dcf_enterprise_value(&fcff, dec!(10), dec!(2), 0).unwrap();
    let terminal = dec!(121) * dec!(1.02) / dec!(0.08);
    let expected = dec!(100) + dec!(100) + terminal / dec!(1.21);
    assert!((ev - expected).abs() < dec!(0.0001), "expected {expected}, got {ev}");
}

#[test]
fn test_ev_analysis_grid_shape() {
    let c = company("c-1", "Technology", Decimal::ONE);
    let fcff = vec![dec!(90); 10];
    let ebitda = vec![dec!(180); 10];
    let out = calculate_ev_analysis(&c, &fcff, &ebitda, &EvParameters::default());
    let analysis = &out.result;

    // multiple = 2040 / 180
    assert_eq!(analysis.ev_ebitda_multiple, dec!(2040) / dec!(180));
    // Flat EBITDA projection: every relative checkpoint equals EBITDA * m
    assert_eq!(analysis.relative.y0, dec!(2040));
    assert_eq!(analysis.relative.y5, dec!(2040));
    assert_eq!(analysis.relative.y10, dec!(2040));
    assert!(analysis.dcf.y0.is_some());
    assert!(analysis.market.y10 > Decimal::ZERO);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_value_deal_runs_simulation_with_deal_tax_rate() {
    let c = company("c-1", "Technology", Decimal::ONE);
    let mut strategy = InvestmentStrategy::empty("upside", dec!(0));
    strategy.input.revenue_change = vec![dec!(100); 10];

    let deal = SimulationDeal {
        id: "d-1".into(),
        name: "FY25 plan".into(),
        company_id: "c-1".into(),
        selected_strategy_ids: vec![strategy.id.clone()],
        strategies: vec![strategy],
        ev_parameters: Some(EvParameters {
            tax_rate: dec!(40.0),
            ..EvParameters::default()
        }),
        created_at: chrono::Utc::now(),
    };

    let out = value_deal(&c, &deal).unwrap();
    // baseFcf at 40% tax = 120*0.6 + 60 - 70 = 62; impact = 100*0.6 = 60
    // market y5 uses cumulative FCFF of 5 * 122
    let expected_market_y5 =
        dec!(1800) * dec!(1.03).powi(5) + (dec!(240) - dec!(5) * dec!(122));
    assert_eq!(out.result.market.y5, expected_market_y5);
    assert!(out.result.dcf.y0.is_some());
}

// ===========================================================================
// Sector aggregation
// ===========================================================================

#[test]
fn test_identical_peers_average_to_common_values() {
    let catalog = vec![
        company("a", "Retail", Decimal::ONE),
        company("b", "Retail", Decimal::ONE),
    ];
    let avg = sector_average("Retail", &catalog).unwrap();

    assert_eq!(avg.name, "Retail (average)");
    assert_eq!(avg.market_cap, dec!(1800));
    assert_eq!(avg.financials.len(), 2);
    assert_eq!(avg.financials[0].revenue, dec!(1000));
    assert_eq!(avg.financials[1].operating_income, dec!(120));
}

#[test]
fn test_mixed_peers_average_positionally() {
    let catalog = vec![
        company("a", "Retail", Decimal::ONE),
        company("b", "Retail", dec!(3)),
        company("c", "Finance", dec!(100)),
    ];
    let avg = sector_average("Retail", &catalog).unwrap();
    // (1000 + 3000) / 2
    assert_eq!(avg.financials[0].revenue, dec!(2000));
    assert_eq!(avg.market_cap, dec!(3600));
}
