pub mod tokens;

use serde::{Deserialize, Serialize};

pub use tokens::{
    calculate_annual_token_cost, calculate_monthly_tokens, PRICE_PER_INPUT_TOKEN,
    PRICE_PER_OUTPUT_TOKEN,
};

pub const MIN_DIMENSION_SCORE: u8 = 1;
pub const MAX_DIMENSION_SCORE: u8 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReadinessWeights {
    pub organizational_capacity: f64,
    pub data_availability: f64,
    pub technical_infrastructure: f64,
    pub governance: f64,
}

impl ReadinessWeights {
    pub fn sum(&self) -> f64 {
        self.organizational_capacity
            + self.data_availability
            + self.technical_infrastructure
            + self.governance
    }
}

pub const READINESS_WEIGHTS: ReadinessWeights = ReadinessWeights {
    organizational_capacity: 0.30,
    data_availability: 0.30,
    technical_infrastructure: 0.20,
    governance: 0.20,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadinessInputs {
    pub data_availability: u8,
    pub technical_infrastructure: u8,
    pub organizational_capacity: u8,
    pub governance: u8,
    #[serde(default)]
    pub runs_per_month: f64,
    #[serde(default)]
    pub input_tokens_per_run: f64,
    #[serde(default)]
    pub output_tokens_per_run: f64,
    #[serde(default = "default_time_to_value")]
    pub time_to_value_months: f64,
}

impl Default for ReadinessInputs {
    fn default() -> Self {
        Self {
            data_availability: 5,
            technical_infrastructure: 5,
            organizational_capacity: 5,
            governance: 5,
            runs_per_month: 0.0,
            input_tokens_per_run: 0.0,
            output_tokens_per_run: 0.0,
            time_to_value_months: default_time_to_value(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReadinessResult {
    pub readiness_score: f64,
    pub monthly_tokens: f64,
    pub annual_token_cost: f64,
}

/// Dimension scores are expected on the 1..=10 scale.
pub fn calculate_readiness_score(
    data_availability: f64,
    technical_infrastructure: f64,
    organizational_capacity: f64,
    governance: f64,
) -> f64 {
    let w = READINESS_WEIGHTS;
    organizational_capacity * w.organizational_capacity
        + data_availability * w.data_availability
        + technical_infrastructure * w.technical_infrastructure
        + governance * w.governance
}

pub fn clamp_dimension(score: u8) -> u8 {
    score.clamp(MIN_DIMENSION_SCORE, MAX_DIMENSION_SCORE)
}

pub fn assess_readiness(inputs: &ReadinessInputs) -> ReadinessResult {
    let readiness_score = calculate_readiness_score(
        f64::from(clamp_dimension(inputs.data_availability)),
        f64::from(clamp_dimension(inputs.technical_infrastructure)),
        f64::from(clamp_dimension(inputs.organizational_capacity)),
        f64::from(clamp_dimension(inputs.governance)),
    );
    let runs = inputs.runs_per_month.max(0.0);
    let input_tokens = inputs.input_tokens_per_run.max(0.0);
    let output_tokens = inputs.output_tokens_per_run.max(0.0);

    ReadinessResult {
        readiness_score,
        monthly_tokens: calculate_monthly_tokens(runs, input_tokens, output_tokens),
        annual_token_cost: calculate_annual_token_cost(runs, input_tokens, output_tokens),
    }
}

fn default_time_to_value() -> f64 {
    6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert_eq!(READINESS_WEIGHTS.sum(), 1.0);
    }

    #[test]
    fn score_spans_the_dimension_range() {
        assert_eq!(calculate_readiness_score(10.0, 10.0, 10.0, 10.0), 10.0);
        assert_eq!(calculate_readiness_score(1.0, 1.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn organization_and_data_outweigh_tech_and_governance() {
        let org_heavy = calculate_readiness_score(5.0, 5.0, 9.0, 5.0);
        let gov_heavy = calculate_readiness_score(5.0, 5.0, 5.0, 9.0);
        assert!(org_heavy > gov_heavy);
        assert!((org_heavy - 6.2).abs() < 1e-9);
        assert!((gov_heavy - 5.8).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_dimensions_are_clamped() {
        let inputs = ReadinessInputs {
            data_availability: 0,
            technical_infrastructure: 14,
            organizational_capacity: 10,
            governance: 1,
            ..ReadinessInputs::default()
        };
        let result = assess_readiness(&inputs);
        let expected = calculate_readiness_score(1.0, 10.0, 10.0, 1.0);
        assert_eq!(result.readiness_score, expected);
        assert!((1.0..=10.0).contains(&result.readiness_score));
    }

    #[test]
    fn assess_includes_token_estimate() {
        let inputs = ReadinessInputs {
            runs_per_month: 1_000.0,
            input_tokens_per_run: 2_000.0,
            output_tokens_per_run: 500.0,
            ..ReadinessInputs::default()
        };
        let result = assess_readiness(&inputs);
        assert_eq!(result.monthly_tokens, 2_500_000.0);
        assert!((result.annual_token_cost - 162.0).abs() < 1e-9);
    }
}
