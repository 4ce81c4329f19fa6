use serde::{Deserialize, Serialize};

use crate::priority::scorer::{
    calculate_ratio_value_scores, calculate_ttv_score, calculate_value_score, classify_priority,
};
use crate::priority::PriorityResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityCandidate {
    pub id: String,
    pub expected_value: f64,
    pub readiness_score: f64,
    #[serde(default)]
    pub friction_annual_cost: Option<f64>,
    #[serde(default)]
    pub time_to_value_months: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueScoreMethod {
    FrictionRatio,
    MaxNormalized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedUseCase {
    pub rank: usize,
    /// Position of the candidate in the input slice.
    pub index: usize,
    pub id: String,
    pub method: ValueScoreMethod,
    pub priority: PriorityResult,
    pub ttv_score: Option<f64>,
}

/// Picks one normalization for the whole set: the friction ratio when every
/// candidate carries a positive friction cost, max-normalization otherwise.
pub fn select_value_scores(candidates: &[PriorityCandidate]) -> (ValueScoreMethod, Vec<f64>) {
    let friction_costs: Option<Vec<f64>> = candidates
        .iter()
        .map(|c| c.friction_annual_cost.filter(|cost| *cost > 0.0))
        .collect();

    match friction_costs {
        Some(costs) if !costs.is_empty() => {
            let entries: Vec<(f64, f64)> = candidates
                .iter()
                .zip(costs)
                .map(|(c, cost)| (c.expected_value, cost))
                .collect();
            (
                ValueScoreMethod::FrictionRatio,
                calculate_ratio_value_scores(&entries),
            )
        }
        _ => {
            let all: Vec<f64> = candidates.iter().map(|c| c.expected_value).collect();
            let scores = all
                .iter()
                .map(|value| calculate_value_score(*value, &all))
                .collect();
            (ValueScoreMethod::MaxNormalized, scores)
        }
    }
}

/// Scores a complete use-case set and orders it by priority score, highest
/// first. Ties keep input order.
pub fn rank_use_cases(candidates: &[PriorityCandidate]) -> Vec<RankedUseCase> {
    let (method, value_scores) = select_value_scores(candidates);
    let mut ranked: Vec<RankedUseCase> = candidates
        .iter()
        .zip(value_scores)
        .enumerate()
        .map(|(index, (candidate, value_score))| RankedUseCase {
            rank: 0,
            index,
            id: candidate.id.clone(),
            method,
            priority: classify_priority(value_score, candidate.readiness_score),
            ttv_score: candidate.time_to_value_months.map(calculate_ttv_score),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.priority
            .priority_score
            .total_cmp(&a.priority.priority_score)
    });
    for (idx, item) in ranked.iter_mut().enumerate() {
        item.rank = idx + 1;
    }
    ranked
}
