//! Sector peer-group aggregation.
//!
//! Builds a synthetic comparison entity by averaging the members of a
//! sector. Known limitation, preserved for compatibility: financial
//! histories are aligned by array position, not by calendar year, and the
//! divisor is the full peer count even at positions where a peer has no
//! record. Peers with staggered fiscal calendars or short histories are
//! therefore averaged against mismatched periods.

use rust_decimal::Decimal;

use crate::types::{Company, FinancialYear, Money};

/// Average a scalar field across the peer set.
fn average<F: Fn(&Company) -> Money>(companies: &[Company], count: Decimal, field: F) -> Money {
    companies.iter().map(|c| field(c)).sum::<Decimal>() / count
}

/// Build the sector-average entity for `sector`, or `None` when the catalog
/// contains no member of that sector. The result has no persistent
/// identity; it is recomputed on demand.
pub fn sector_average(sector: &str, companies: &[Company]) -> Option<Company> {
    let peers: Vec<Company> = companies
        .iter()
        .filter(|c| c.sector == sector)
        .cloned()
        .collect();

    if peers.is_empty() {
        return None;
    }

    let count = Decimal::from(peers.len() as u64);

    // Positional alignment: the first peer's history defines the year labels
    // and the number of averaged positions.
    let avg_financials: Vec<FinancialYear> = peers[0]
        .financials
        .iter()
        .enumerate()
        .map(|(index, reference)| {
            let mut total = FinancialYear {
                year: reference.year,
                revenue: Decimal::ZERO,
                operating_income: Decimal::ZERO,
                net_income: Decimal::ZERO,
                total_assets: Decimal::ZERO,
                total_liabilities: Decimal::ZERO,
                net_assets: Decimal::ZERO,
                cash_and_equivalents: Decimal::ZERO,
                interest_bearing_debt: Decimal::ZERO,
                depreciation: Decimal::ZERO,
                capital_expenditure: Decimal::ZERO,
            };

            for peer in &peers {
                if let Some(f) = peer.financials.get(index) {
                    total.revenue += f.revenue;
                    total.operating_income += f.operating_income;
                    total.net_income += f.net_income;
                    total.total_assets += f.total_assets;
                    total.total_liabilities += f.total_liabilities;
                    total.net_assets += f.net_assets;
                    total.cash_and_equivalents += f.cash_and_equivalents;
                    total.interest_bearing_debt += f.interest_bearing_debt;
                    total.depreciation += f.depreciation;
                    total.capital_expenditure += f.capital_expenditure;
                }
            }

            FinancialYear {
                year: total.year,
                revenue: total.revenue / count,
                operating_income: total.operating_income / count,
                net_income: total.net_income / count,
                total_assets: total.total_assets / count,
                total_liabilities: total.total_liabilities / count,
                net_assets: total.net_assets / count,
                cash_and_equivalents: total.cash_and_equivalents / count,
                interest_bearing_debt: total.interest_bearing_debt / count,
                depreciation: total.depreciation / count,
                capital_expenditure: total.capital_expenditure / count,
            }
        })
        .collect();

    Some(Company {
        id: format!("avg-{sector}"),
        name: format!("{sector} (average)"),
        code: "-".into(),
        sector: sector.to_string(),
        market_cap: average(&peers, count, |c| c.market_cap),
        stock_price: average(&peers, count, |c| c.stock_price),
        shares_outstanding: average(&peers, count, |c| c.shares_outstanding),
        beta: average(&peers, count, |c| c.beta),
        wacc: average(&peers, count, |c| c.wacc),
        tax_rate: average(&peers, count, |c| c.tax_rate),
        financials: avg_financials,
        fiscal_year_start_month: None,
        narrative: None,
        mid_term_plan_period: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn year(label: i32, value: Money) -> FinancialYear {
        FinancialYear {
            year: label,
            revenue: value,
            operating_income: value,
            net_income: value,
            total_assets: value,
            total_liabilities: value,
            net_assets: value,
            cash_and_equivalents: value,
            interest_bearing_debt: value,
            depreciation: value,
            capital_expenditure: value,
        }
    }

    fn company(id: &str, sector: &str, value: Money, history: usize) -> Company {
        Company {
            id: id.into(),
            name: format!("Company {id}"),
            code: "0000".into(),
            sector: sector.into(),
            market_cap: value,
            stock_price: value,
            shares_outstanding: value,
            beta: value,
            wacc: value,
            tax_rate: value,
            financials: (0..history).map(|i| year(2024 - i as i32, value)).collect(),
            fiscal_year_start_month: None,
            narrative: None,
            mid_term_plan_period: None,
        }
    }

    #[test]
    fn test_no_peers_yields_none() {
        let catalog = vec![company("a", "Retail", dec!(100), 3)];
        assert!(sector_average("Healthcare", &catalog).is_none());
    }

    #[test]
    fn test_identical_peers_average_to_common_value() {
        let catalog = vec![
            company("a", "Technology", dec!(100), 3),
            company("b", "Technology", dec!(100), 3),
            company("c", "Retail", dec!(900), 3),
        ];
        let avg = sector_average("Technology", &catalog).unwrap();

        assert_eq!(avg.id, "avg-Technology");
        assert_eq!(avg.name, "Technology (average)");
        assert_eq!(avg.code, "-");
        assert_eq!(avg.market_cap, dec!(100));
        assert_eq!(avg.wacc, dec!(100));
        assert_eq!(avg.financials.len(), 3);
        for f in &avg.financials {
            assert_eq!(f.revenue, dec!(100));
            assert_eq!(f.capital_expenditure, dec!(100));
        }
    }

    #[test]
    fn test_scalars_average_arithmetically() {
        let catalog = vec![
            company("a", "Finance", dec!(100), 1),
            company("b", "Finance", dec!(300), 1),
        ];
        let avg = sector_average("Finance", &catalog).unwrap();
        assert_eq!(avg.market_cap, dec!(200));
        assert_eq!(avg.financials[0].revenue, dec!(200));
        // Year label comes from the first peer
        assert_eq!(avg.financials[0].year, 2024);
    }

    #[test]
    fn test_short_history_dilutes_late_positions() {
        // Positional averaging keeps the full-peer divisor: the second
        // peer's missing year 2 contributes nothing but still divides.
        let catalog = vec![
            company("a", "Automotive", dec!(100), 2),
            company("b", "Automotive", dec!(100), 1),
        ];
        let avg = sector_average("Automotive", &catalog).unwrap();
        assert_eq!(avg.financials.len(), 2);
        assert_eq!(avg.financials[0].revenue, dec!(100));
        assert_eq!(avg.financials[1].revenue, dec!(50));
    }
}
