use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::benefit::BenefitResult;

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    #[default]
    Base,
    Conservative,
    Optimistic,
    /// User-edited raw values; no computed adjustment.
    Custom,
}

impl ScenarioKind {
    pub const PRESETS: [ScenarioKind; 3] = [
        ScenarioKind::Base,
        ScenarioKind::Conservative,
        ScenarioKind::Optimistic,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Conservative => "conservative",
            Self::Optimistic => "optimistic",
            Self::Custom => "custom",
        }
    }

    pub fn multiplier(&self) -> ScenarioMultiplier {
        SCENARIO_MULTIPLIERS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(ScenarioMultiplier::IDENTITY)
    }
}

impl Display for ScenarioKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown scenario: {0}")]
pub struct ScenarioParseError(pub String);

impl FromStr for ScenarioKind {
    type Err = ScenarioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" | "baseline" => Ok(Self::Base),
            "conservative" => Ok(Self::Conservative),
            "optimistic" => Ok(Self::Optimistic),
            "custom" => Ok(Self::Custom),
            _ => Err(ScenarioParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScenarioMultiplier {
    pub benefit_multiplier: f64,
    pub probability_multiplier: f64,
}

impl ScenarioMultiplier {
    pub const IDENTITY: ScenarioMultiplier = ScenarioMultiplier {
        benefit_multiplier: 1.0,
        probability_multiplier: 1.0,
    };
}

/// Named presets. Custom has no entry and resolves to identity.
pub const SCENARIO_MULTIPLIERS: [(ScenarioKind, ScenarioMultiplier); 3] = [
    (ScenarioKind::Base, ScenarioMultiplier::IDENTITY),
    (
        ScenarioKind::Conservative,
        ScenarioMultiplier {
            benefit_multiplier: 0.6,
            probability_multiplier: 0.85,
        },
    ),
    (
        ScenarioKind::Optimistic,
        ScenarioMultiplier {
            benefit_multiplier: 1.3,
            probability_multiplier: 1.0,
        },
    ),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScenarioAdjustment {
    pub scenario: ScenarioKind,
    pub multiplier: ScenarioMultiplier,
    pub probability_of_success: f64,
    pub benefits: BenefitResult,
}

/// Scales the four category totals and the probability separately, then
/// recomputes total and expected value. Readiness is never adjusted here.
pub fn apply_scenario(
    base: &BenefitResult,
    probability_of_success: f64,
    scenario: ScenarioKind,
) -> ScenarioAdjustment {
    let multiplier = scenario.multiplier();
    let probability =
        (probability_of_success * multiplier.probability_multiplier).clamp(0.0, 1.0);
    let benefits = base.scaled(multiplier.benefit_multiplier, probability);
    ScenarioAdjustment {
        scenario,
        multiplier,
        probability_of_success: probability,
        benefits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_result() -> BenefitResult {
        BenefitResult::from_categories(1_000_000.0, 200_000.0, 100_000.0, 50_000.0, 0.8)
    }

    #[test]
    fn parses_scenario_names() {
        assert_eq!(
            ScenarioKind::from_str("Conservative").expect("parse"),
            ScenarioKind::Conservative
        );
        assert_eq!(ScenarioKind::from_str(" base ").expect("parse"), ScenarioKind::Base);
        assert!(ScenarioKind::from_str("pessimistic").is_err());
    }

    #[test]
    fn preset_table_matches_named_values() {
        assert_eq!(ScenarioKind::Base.multiplier(), ScenarioMultiplier::IDENTITY);
        let conservative = ScenarioKind::Conservative.multiplier();
        assert_eq!(conservative.benefit_multiplier, 0.6);
        assert_eq!(conservative.probability_multiplier, 0.85);
        let optimistic = ScenarioKind::Optimistic.multiplier();
        assert_eq!(optimistic.benefit_multiplier, 1.3);
        assert_eq!(optimistic.probability_multiplier, 1.0);
        assert_eq!(ScenarioKind::Custom.multiplier(), ScenarioMultiplier::IDENTITY);

        for preset in ScenarioKind::PRESETS {
            assert!(SCENARIO_MULTIPLIERS.iter().any(|(kind, _)| *kind == preset));
            assert_eq!(
                ScenarioKind::from_str(preset.as_slug()).expect("slug parses"),
                preset
            );
        }
        assert!(!ScenarioKind::PRESETS.contains(&ScenarioKind::Custom));
    }

    #[test]
    fn base_and_custom_are_pass_through() {
        let base = base_result();
        for kind in [ScenarioKind::Base, ScenarioKind::Custom] {
            let adjusted = apply_scenario(&base, 0.8, kind);
            assert_eq!(adjusted.benefits, base);
            assert_eq!(adjusted.probability_of_success, 0.8);
        }
    }

    #[test]
    fn conservative_scales_benefit_and_probability_separately() {
        let adjusted = apply_scenario(&base_result(), 0.8, ScenarioKind::Conservative);
        assert!((adjusted.benefits.cost - 600_000.0).abs() < 1e-6);
        assert!((adjusted.benefits.total_annual_value - 810_000.0).abs() < 1e-6);
        assert!((adjusted.probability_of_success - 0.68).abs() < 1e-12);
        assert!((adjusted.benefits.expected_value - 810_000.0 * 0.68).abs() < 1e-6);
    }

    #[test]
    fn optimistic_leaves_probability_alone() {
        let adjusted = apply_scenario(&base_result(), 0.8, ScenarioKind::Optimistic);
        assert_eq!(adjusted.probability_of_success, 0.8);
        assert!((adjusted.benefits.total_annual_value - 1_755_000.0).abs() < 1e-6);
    }
}
