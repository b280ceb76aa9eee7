use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
///
/// Unit convention: hundred-million yen (億円) throughout, inherited from the
/// source data set. The engine never converts units.
pub type Money = Decimal;

/// Rates expressed as fractions (0.30 = 30%).
pub type Rate = Decimal;

/// Rates expressed on the 0–100 scale (30 = 30%). Company records and EV
/// parameters store percentages; the engine divides by 100 internally at
/// each call site.
pub type Percent = Decimal;

/// Valuation multiples (e.g. 8.5x EV/EBITDA)
pub type Multiple = Decimal;

/// Length of every strategy input array and of the projection horizon.
pub const SIMULATION_YEARS: usize = 10;

/// One fiscal year of reported figures for an entity.
///
/// Ordered most-recent-first within `Company::financials`: index 0 is the
/// latest reported year, index 1 the year before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialYear {
    pub year: i32,
    pub revenue: Money,
    /// Operating income (EBIT)
    pub operating_income: Money,
    pub net_income: Money,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub net_assets: Money,
    pub cash_and_equivalents: Money,
    pub interest_bearing_debt: Money,
    pub depreciation: Money,
    pub capital_expenditure: Money,
}

/// A company snapshot: market data plus reported financial history.
///
/// `financials` may be empty for summary-only entities; every consumer of
/// the history must handle that case without failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    /// Ticker / securities code
    pub code: String,
    pub sector: String,
    pub market_cap: Money,
    pub stock_price: Money,
    /// Million shares
    pub shares_outstanding: Decimal,
    pub beta: Decimal,
    /// WACC on the 0–100 scale
    pub wacc: Percent,
    /// Effective tax rate on the 0–100 scale
    pub tax_rate: Percent,
    /// Most-recent-first reported years
    pub financials: Vec<FinancialYear>,
    /// 1–12 (e.g. 4 for an April fiscal-year start)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_year_start_month: Option<u8>,
    /// Narrative text from the earnings release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    /// Mid-term plan period label (e.g. "2024-2026")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid_term_plan_period: Option<String>,
}

impl Company {
    /// The latest reported year, if any history exists.
    pub fn latest_financial(&self) -> Option<&FinancialYear> {
        self.financials.first()
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
