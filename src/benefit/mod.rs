pub mod calculator;
pub mod trace;

use serde::{Deserialize, Serialize};

pub use calculator::{
    calculate_benefits, calculate_benefits_with_trace, calculate_cash_flow_benefit,
    calculate_cash_flow_benefit_with_trace, calculate_cost_benefit,
    calculate_cost_benefit_with_trace, calculate_expected_value,
    calculate_expected_value_with_trace, calculate_revenue_benefit,
    calculate_revenue_benefit_with_trace, calculate_risk_benefit,
    calculate_risk_benefit_from_exposure, calculate_risk_benefit_from_exposure_with_trace,
    calculate_risk_benefit_with_trace, calculate_total_annual_value,
};
pub use trace::{FormulaTrace, Traced};

pub const REVENUE_REALIZATION: f64 = 0.95;
pub const CASH_FLOW_REALIZATION: f64 = 0.85;
pub const RISK_REALIZATION: f64 = 0.80;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Operational parameters for one use case. Rates and percentages are
/// fractional (0.9, not 90).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenefitInputs {
    #[serde(default)]
    pub hours_saved: f64,
    #[serde(default)]
    pub loaded_hourly_rate: f64,
    #[serde(default = "default_benefits_loading")]
    pub benefits_loading_factor: f64,
    #[serde(default)]
    pub adoption_rate: f64,
    #[serde(default = "default_data_maturity")]
    pub data_maturity_multiplier: f64,
    #[serde(default)]
    pub revenue_uplift_pct: f64,
    #[serde(default)]
    pub revenue_at_risk: f64,
    /// Overrides the per-category realization factors when set.
    #[serde(default)]
    pub realization_factor: Option<f64>,
    #[serde(default)]
    pub risk_reduction_pct: f64,
    #[serde(default)]
    pub risk_exposure: f64,
    #[serde(default)]
    pub annual_revenue: f64,
    #[serde(default)]
    pub days_improved: f64,
    #[serde(default)]
    pub cost_of_capital: f64,
}

impl Default for BenefitInputs {
    fn default() -> Self {
        Self {
            hours_saved: 0.0,
            loaded_hourly_rate: 0.0,
            benefits_loading_factor: default_benefits_loading(),
            adoption_rate: 0.0,
            data_maturity_multiplier: default_data_maturity(),
            revenue_uplift_pct: 0.0,
            revenue_at_risk: 0.0,
            realization_factor: None,
            risk_reduction_pct: 0.0,
            risk_exposure: 0.0,
            annual_revenue: 0.0,
            days_improved: 0.0,
            cost_of_capital: 0.0,
        }
    }
}

impl BenefitInputs {
    pub fn revenue_realization(&self) -> f64 {
        self.realization_factor.unwrap_or(REVENUE_REALIZATION)
    }

    pub fn risk_realization(&self) -> f64 {
        self.realization_factor.unwrap_or(RISK_REALIZATION)
    }

    pub fn cash_flow_realization(&self) -> f64 {
        self.realization_factor.unwrap_or(CASH_FLOW_REALIZATION)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BenefitResult {
    pub cost: f64,
    pub revenue: f64,
    pub risk: f64,
    pub cash_flow: f64,
    pub total_annual_value: f64,
    pub expected_value: f64,
}

impl BenefitResult {
    pub fn from_categories(
        cost: f64,
        revenue: f64,
        risk: f64,
        cash_flow: f64,
        probability_of_success: f64,
    ) -> Self {
        let total_annual_value = calculate_total_annual_value(cost, revenue, risk, cash_flow);
        Self {
            cost,
            revenue,
            risk,
            cash_flow,
            total_annual_value,
            expected_value: calculate_expected_value(total_annual_value, probability_of_success),
        }
    }

    /// Multiplies every category by `factor` and re-weights at
    /// `probability_of_success`.
    pub fn scaled(&self, factor: f64, probability_of_success: f64) -> Self {
        Self::from_categories(
            self.cost * factor,
            self.revenue * factor,
            self.risk * factor,
            self.cash_flow * factor,
            probability_of_success,
        )
    }
}

/// Per-category traces for one [`calculate_benefits`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitTraces {
    pub cost: FormulaTrace,
    pub revenue: FormulaTrace,
    pub risk: FormulaTrace,
    pub cash_flow: FormulaTrace,
    pub expected_value: FormulaTrace,
}

fn default_benefits_loading() -> f64 {
    1.0
}

fn default_data_maturity() -> f64 {
    1.0
}
