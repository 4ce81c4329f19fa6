use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::benefit::BenefitInputs;
use crate::projection::{MAX_PROJECTION_YEARS, MIN_PROJECTION_YEARS};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
}

impl InputBounds {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

static INPUT_BOUNDS: Lazy<BTreeMap<&'static str, InputBounds>> = Lazy::new(|| {
    BTreeMap::from([
        ("hours_saved", InputBounds::new(0.0, 500_000.0)),
        ("loaded_hourly_rate", InputBounds::new(0.0, 1_000.0)),
        ("benefits_loading_factor", InputBounds::new(1.0, 2.0)),
        ("adoption_rate", InputBounds::new(0.0, 1.0)),
        ("data_maturity_multiplier", InputBounds::new(0.25, 1.0)),
        ("revenue_uplift_pct", InputBounds::new(0.0, 0.5)),
        ("revenue_at_risk", InputBounds::new(0.0, 10_000_000_000.0)),
        ("realization_factor", InputBounds::new(0.0, 1.0)),
        ("risk_reduction_pct", InputBounds::new(0.0, 1.0)),
        ("risk_exposure", InputBounds::new(0.0, 10_000_000_000.0)),
        ("annual_revenue", InputBounds::new(0.0, 1_000_000_000_000.0)),
        ("days_improved", InputBounds::new(0.0, 365.0)),
        ("cost_of_capital", InputBounds::new(0.01, 0.25)),
        ("probability_of_success", InputBounds::new(0.0, 1.0)),
        (
            "projection_years",
            InputBounds::new(
                f64::from(MIN_PROJECTION_YEARS),
                f64::from(MAX_PROJECTION_YEARS),
            ),
        ),
    ])
});

/// Field names are matched in snake_case; camelCase and kebab-case spellings
/// are folded first (`hoursSaved`, `hours-saved`).
pub fn bounds_for(field: &str) -> Option<InputBounds> {
    INPUT_BOUNDS.get(normalize_field_name(field).as_str()).copied()
}

pub fn clamp_input(field: &str, value: f64) -> f64 {
    match bounds_for(field) {
        Some(bounds) => bounds.clamp(value),
        None => value,
    }
}

pub fn known_fields() -> impl Iterator<Item = (&'static str, InputBounds)> {
    INPUT_BOUNDS.iter().map(|(name, bounds)| (*name, *bounds))
}

pub fn clamp_benefit_inputs(inputs: &BenefitInputs) -> BenefitInputs {
    BenefitInputs {
        hours_saved: clamp_input("hours_saved", inputs.hours_saved),
        loaded_hourly_rate: clamp_input("loaded_hourly_rate", inputs.loaded_hourly_rate),
        benefits_loading_factor: clamp_input(
            "benefits_loading_factor",
            inputs.benefits_loading_factor,
        ),
        adoption_rate: clamp_input("adoption_rate", inputs.adoption_rate),
        data_maturity_multiplier: clamp_input(
            "data_maturity_multiplier",
            inputs.data_maturity_multiplier,
        ),
        revenue_uplift_pct: clamp_input("revenue_uplift_pct", inputs.revenue_uplift_pct),
        revenue_at_risk: clamp_input("revenue_at_risk", inputs.revenue_at_risk),
        realization_factor: inputs
            .realization_factor
            .map(|v| clamp_input("realization_factor", v)),
        risk_reduction_pct: clamp_input("risk_reduction_pct", inputs.risk_reduction_pct),
        risk_exposure: clamp_input("risk_exposure", inputs.risk_exposure),
        annual_revenue: clamp_input("annual_revenue", inputs.annual_revenue),
        days_improved: clamp_input("days_improved", inputs.days_improved),
        cost_of_capital: clamp_input("cost_of_capital", inputs.cost_of_capital),
    }
}

fn normalize_field_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.trim().chars() {
        if ch == '-' || ch == ' ' {
            out.push('_');
        } else if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{bounds_for, clamp_benefit_inputs, clamp_input, known_fields};
    use crate::benefit::BenefitInputs;

    #[test]
    fn unknown_field_passes_through() {
        assert_eq!(clamp_input("favorite_color", -12.5), -12.5);
        assert_eq!(clamp_input("", 9e12), 9e12);
    }

    #[test]
    fn clamps_to_exact_bounds() {
        assert_eq!(clamp_input("hours_saved", 900_000.0), 500_000.0);
        assert_eq!(clamp_input("hours_saved", -3.0), 0.0);
        assert_eq!(clamp_input("cost_of_capital", 0.0), 0.01);
        assert_eq!(clamp_input("cost_of_capital", 0.9), 0.25);
        assert_eq!(clamp_input("cost_of_capital", 0.08), 0.08);
    }

    #[test]
    fn accepts_camel_case_field_names() {
        assert_eq!(clamp_input("hoursSaved", 900_000.0), 500_000.0);
        assert_eq!(clamp_input("costOfCapital", 1.0), 0.25);
        assert_eq!(bounds_for("days-improved"), bounds_for("days_improved"));
    }

    #[test]
    fn table_covers_every_bounded_field() {
        assert_eq!(known_fields().count(), 15);
        for (_, bounds) in known_fields() {
            assert!(bounds.min <= bounds.max);
        }
    }

    #[test]
    fn projection_years_are_bounded() {
        assert_eq!(clamp_input("projection_years", 4_000_000_000.0), 50.0);
        assert_eq!(clamp_input("projectionYears", 0.0), 1.0);
        assert_eq!(clamp_input("projection_years", 5.0), 5.0);
    }

    #[test]
    fn clamps_whole_benefit_record() {
        let inputs = BenefitInputs {
            hours_saved: 1_000_000.0,
            adoption_rate: 1.4,
            days_improved: 500.0,
            realization_factor: Some(2.0),
            ..BenefitInputs::default()
        };
        let clamped = clamp_benefit_inputs(&inputs);
        assert_eq!(clamped.hours_saved, 500_000.0);
        assert_eq!(clamped.adoption_rate, 1.0);
        assert_eq!(clamped.days_improved, 365.0);
        assert_eq!(clamped.realization_factor, Some(1.0));
    }
}
