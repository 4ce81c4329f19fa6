pub mod ranking;
pub mod scorer;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use ranking::{rank_use_cases, select_value_scores, PriorityCandidate, RankedUseCase};
pub use scorer::{
    calculate_priority_score, calculate_ratio_value_scores, calculate_ttv_score,
    calculate_value_score, classify_priority, determine_phase, determine_priority_tier,
    determine_quadrant, score_priority,
};

/// Value/readiness midpoint of the 2×2 grid. The boundary belongs to the
/// higher half.
pub const GRID_MIDPOINT: f64 = 5.5;
pub const READINESS_BLEND_WEIGHT: f64 = 0.50;
pub const VALUE_BLEND_WEIGHT: f64 = 0.50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Champions,
    QuickWins,
    Strategic,
    Foundation,
}

impl PriorityTier {
    pub fn rank(self) -> u8 {
        match self {
            Self::Champions => 1,
            Self::QuickWins => 2,
            Self::Strategic => 3,
            Self::Foundation => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Champions => "Champions",
            Self::QuickWins => "Quick Wins",
            Self::Strategic => "Strategic",
            Self::Foundation => "Foundation",
        }
    }
}

impl Display for PriorityTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier {} — {}", self.rank(), self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    Champions,
    QuickWins,
    Strategic,
    Foundation,
}

impl Quadrant {
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Champions => "champions",
            Self::QuickWins => "quick_wins",
            Self::Strategic => "strategic",
            Self::Foundation => "foundation",
        }
    }
}

impl Display for Quadrant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriorityInputs {
    pub expected_value: f64,
    /// Expected values of every use case in the active scenario, including
    /// this one.
    pub all_expected_values: Vec<f64>,
    pub readiness_score: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriorityResult {
    pub value_score: f64,
    pub priority_score: f64,
    pub priority_tier: PriorityTier,
    pub quadrant: Quadrant,
    pub recommended_phase: Phase,
}
