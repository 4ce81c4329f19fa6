//! Multi-year projection of a constant annual benefit against an upfront
//! investment: NPV, IRR and payback.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_YEARS: u32 = 3;
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;
pub const MIN_PROJECTION_YEARS: u32 = 1;
pub const MAX_PROJECTION_YEARS: u32 = 50;

const IRR_INITIAL_GUESS: f64 = 0.5;
const IRR_MAX_ITERATIONS: u32 = 100;
const IRR_TOLERANCE: f64 = 1e-4;
const IRR_RATE_FLOOR: f64 = -0.99;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProjectionInputs {
    pub annual_benefit: f64,
    #[serde(default = "default_years")]
    pub years: u32,
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
    #[serde(default)]
    pub initial_investment: f64,
}

impl ProjectionInputs {
    pub fn new(annual_benefit: f64) -> Self {
        Self {
            annual_benefit,
            years: DEFAULT_YEARS,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            initial_investment: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProjectedYear {
    pub year: u32,
    pub benefit: f64,
    pub discounted_benefit: f64,
    pub cumulative_discounted: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionResult {
    pub npv: f64,
    pub irr: f64,
    pub payback_months: u32,
    pub schedule: Vec<ProjectedYear>,
}

pub fn calculate_npv(
    annual_benefit: f64,
    years: u32,
    discount_rate: f64,
    initial_investment: f64,
) -> f64 {
    let discounted: f64 = (1..=bounded_years(years))
        .map(|t| discount(annual_benefit, discount_rate, t))
        .sum();
    -initial_investment + discounted
}

/// Newton-Raphson on NPV(rate). Returns 0 when there is no investment to
/// recover. Stops at the current rate if the derivative vanishes or the
/// iteration budget runs out.
pub fn calculate_irr(annual_benefit: f64, years: u32, initial_investment: f64) -> f64 {
    if initial_investment <= 0.0 {
        return 0.0;
    }

    let mut rate = IRR_INITIAL_GUESS;
    for iteration in 0..IRR_MAX_ITERATIONS {
        let npv = calculate_npv(annual_benefit, years, rate, initial_investment);
        if npv.abs() < IRR_TOLERANCE {
            return rate;
        }

        let derivative = npv_derivative(annual_benefit, years, rate);
        if derivative == 0.0 || !derivative.is_finite() {
            debug!(iteration, rate, "irr derivative vanished, returning current rate");
            return rate;
        }

        rate -= npv / derivative;
        if rate < IRR_RATE_FLOOR {
            rate = IRR_RATE_FLOOR;
        }
    }

    debug!(rate, "irr did not converge within iteration budget");
    rate
}

pub fn calculate_payback_months(annual_benefit: f64, initial_investment: f64) -> u32 {
    if annual_benefit <= 0.0 || initial_investment <= 0.0 {
        return 0;
    }
    let months = (initial_investment / annual_benefit * 12.0).ceil();
    if months >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        months as u32
    }
}

pub fn project(inputs: &ProjectionInputs) -> ProjectionResult {
    let mut cumulative = -inputs.initial_investment;
    let schedule = (1..=bounded_years(inputs.years))
        .map(|year| {
            let discounted_benefit = discount(inputs.annual_benefit, inputs.discount_rate, year);
            cumulative += discounted_benefit;
            ProjectedYear {
                year,
                benefit: inputs.annual_benefit,
                discounted_benefit,
                cumulative_discounted: cumulative,
            }
        })
        .collect();

    ProjectionResult {
        npv: calculate_npv(
            inputs.annual_benefit,
            inputs.years,
            inputs.discount_rate,
            inputs.initial_investment,
        ),
        irr: calculate_irr(inputs.annual_benefit, inputs.years, inputs.initial_investment),
        payback_months: calculate_payback_months(inputs.annual_benefit, inputs.initial_investment),
        schedule,
    }
}

/// Horizons longer than [`MAX_PROJECTION_YEARS`] are cut to it.
pub fn bounded_years(years: u32) -> u32 {
    years.min(MAX_PROJECTION_YEARS)
}

fn growth(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powi(i32::try_from(periods).unwrap_or(i32::MAX))
}

fn discount(amount: f64, rate: f64, year: u32) -> f64 {
    amount / growth(rate, year)
}

fn npv_derivative(annual_benefit: f64, years: u32, rate: f64) -> f64 {
    (1..=bounded_years(years))
        .map(|t| -(f64::from(t)) * annual_benefit / growth(rate, t + 1))
        .sum()
}

fn default_years() -> u32 {
    DEFAULT_YEARS
}

fn default_discount_rate() -> f64 {
    DEFAULT_DISCOUNT_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npv_of_zero_benefit_is_negative_investment() {
        for (years, rate) in [(1, 0.05), (3, 0.10), (10, 0.25)] {
            assert_eq!(calculate_npv(0.0, years, rate, 250_000.0), -250_000.0);
        }
    }

    #[test]
    fn npv_discounts_each_year() {
        let npv = calculate_npv(100_000.0, 3, 0.10, 200_000.0);
        let expected = -200_000.0 + 100_000.0 / 1.1 + 100_000.0 / 1.21 + 100_000.0 / 1.331;
        assert!((npv - expected).abs() < 1e-6);
    }

    #[test]
    fn irr_solves_for_zero_npv() {
        let irr = calculate_irr(100_000.0, 3, 200_000.0);
        assert!((irr - 0.2338).abs() < 1e-3, "irr = {irr}");
        assert!(calculate_npv(100_000.0, 3, irr, 200_000.0).abs() < 1e-3);
    }

    #[test]
    fn irr_is_zero_without_investment() {
        assert_eq!(calculate_irr(100_000.0, 3, 0.0), 0.0);
        assert_eq!(calculate_irr(100_000.0, 3, -5.0), 0.0);
    }

    #[test]
    fn irr_returns_when_derivative_vanishes() {
        let irr = calculate_irr(0.0, 3, 100_000.0);
        assert_eq!(irr, IRR_INITIAL_GUESS);
        assert!(irr.is_finite());
    }

    #[test]
    fn irr_stays_finite_for_unrecoverable_investment() {
        let irr = calculate_irr(1_000.0, 3, 1_000_000.0);
        assert!(irr.is_finite());
        assert!(irr >= IRR_RATE_FLOOR);
    }

    #[test]
    fn payback_rounds_up_to_whole_months() {
        assert_eq!(calculate_payback_months(1_000_000.0, 200_000.0), 3);
        assert_eq!(calculate_payback_months(120_000.0, 120_000.0), 12);
        assert_eq!(calculate_payback_months(500_000.0, 0.0), 0);
        assert_eq!(calculate_payback_months(0.0, 500_000.0), 0);
        assert_eq!(calculate_payback_months(-10.0, 500_000.0), 0);
    }

    #[test]
    fn project_builds_a_consistent_schedule() {
        let inputs = ProjectionInputs {
            initial_investment: 150_000.0,
            ..ProjectionInputs::new(100_000.0)
        };
        let result = project(&inputs);
        assert_eq!(result.schedule.len(), 3);
        let last = result.schedule.last().expect("schedule");
        assert!((last.cumulative_discounted - result.npv).abs() < 1e-6);
        assert_eq!(result.payback_months, 18);
        assert!(result.irr > 0.0);
    }

    #[test]
    fn oversized_horizon_is_capped() {
        let inputs = ProjectionInputs {
            years: 4_000_000_000,
            initial_investment: 200_000.0,
            ..ProjectionInputs::new(100_000.0)
        };
        let result = project(&inputs);
        assert_eq!(result.schedule.len(), MAX_PROJECTION_YEARS as usize);
        assert!(result.npv.is_finite());
        assert!(result.irr.is_finite());
        assert_eq!(
            result.npv,
            calculate_npv(100_000.0, MAX_PROJECTION_YEARS, 0.10, 200_000.0)
        );
        assert!(discount(100.0, 0.10, 3_000_000_000).is_finite());
        assert!(discount(100.0, 0.10, 3_000_000_000) <= 100.0);
    }

    #[test]
    fn defaults_apply_when_fields_are_missing() {
        let parsed: ProjectionInputs =
            serde_json::from_str(r#"{"annual_benefit": 50000.0}"#).expect("parse");
        assert_eq!(parsed.years, 3);
        assert_eq!(parsed.discount_rate, 0.10);
        assert_eq!(parsed.initial_investment, 0.0);
    }
}
