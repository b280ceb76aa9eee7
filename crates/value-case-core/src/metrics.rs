//! Single-year metric primitives.
//!
//! Stateless formulas over reported figures. Degenerate denominators fall
//! back to zero rather than erroring, so these are safe to evaluate on any
//! snapshot, including summary-only entities.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

/// Enterprise value: market cap plus net debt.
pub fn enterprise_value(market_cap: Money, interest_bearing_debt: Money, cash: Money) -> Money {
    market_cap + interest_bearing_debt - cash
}

/// EBITDA, simplified as operating income plus depreciation.
pub fn ebitda(operating_income: Money, depreciation: Money) -> Money {
    operating_income + depreciation
}

/// Return on invested capital, in percent.
///
/// NOPAT / (interest-bearing debt + net assets) × 100, with the tax rate on
/// the 0–100 scale. Zero invested capital yields 0.
pub fn roic(
    operating_income: Money,
    tax_rate: Percent,
    interest_bearing_debt: Money,
    net_assets: Money,
) -> Decimal {
    let nopat = operating_income * (Decimal::ONE - tax_rate / dec!(100));
    let invested_capital = interest_bearing_debt + net_assets;
    if invested_capital.is_zero() {
        return Decimal::ZERO;
    }
    nopat / invested_capital * dec!(100)
}

/// Return on equity, in percent. Zero net assets yields 0.
pub fn roe(net_income: Money, net_assets: Money) -> Decimal {
    if net_assets.is_zero() {
        return Decimal::ZERO;
    }
    net_income / net_assets * dec!(100)
}

/// Compound annual growth rate, in percent.
///
/// Returns 0 when the start value is non-positive or the period is empty,
/// and also when the ratio has no real root (negative end value).
pub fn cagr(start_value: Money, end_value: Money, years: u32) -> Decimal {
    if start_value <= Decimal::ZERO || years == 0 {
        return Decimal::ZERO;
    }
    let exponent = Decimal::ONE / Decimal::from(years);
    match (end_value / start_value).checked_powd(exponent) {
        Some(root) => (root - Decimal::ONE) * dec!(100),
        None => Decimal::ZERO,
    }
}
