pub mod sample;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::benefit::{calculate_benefits, BenefitInputs, BenefitResult};
use crate::config::Config;
use crate::format::{clamp_benefit_inputs, clamp_input};
use crate::guardrail::{
    cross_validate_use_cases, CompanyContext, GuardrailReport, UseCaseBenefitBreakdown,
};
use crate::priority::ranking::ValueScoreMethod;
use crate::priority::{rank_use_cases, PriorityCandidate, PriorityResult};
use crate::projection::{project, ProjectionInputs, ProjectionResult};
use crate::readiness::{assess_readiness, ReadinessInputs, ReadinessResult};
use crate::scenario::{apply_scenario, ScenarioKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCaseInput {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub benefit: BenefitInputs,
    #[serde(default = "default_probability")]
    pub probability_of_success: f64,
    #[serde(default)]
    pub readiness: ReadinessInputs,
    /// Annual labor cost of the friction points this use case targets.
    #[serde(default)]
    pub friction_annual_cost: Option<f64>,
    #[serde(default)]
    pub initial_investment: Option<f64>,
}

/// A complete snapshot of one scenario. Priority and guardrails normalize
/// against the full set, so partial sets give misleading scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentInput {
    #[serde(default)]
    pub company: CompanyContext,
    #[serde(default)]
    pub scenario: Option<ScenarioKind>,
    #[serde(default)]
    pub use_cases: Vec<UseCaseInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentOptions {
    pub default_scenario: ScenarioKind,
    pub apply_guardrail_scaling: bool,
    pub clamp_inputs: bool,
    pub projection_years: u32,
    pub discount_rate: f64,
    pub default_initial_investment: f64,
}

impl Default for AssessmentOptions {
    fn default() -> Self {
        Self {
            default_scenario: ScenarioKind::Base,
            apply_guardrail_scaling: false,
            clamp_inputs: true,
            projection_years: crate::projection::DEFAULT_YEARS,
            discount_rate: crate::projection::DEFAULT_DISCOUNT_RATE,
            default_initial_investment: 0.0,
        }
    }
}

impl From<&Config> for AssessmentOptions {
    fn from(config: &Config) -> Self {
        Self {
            default_scenario: config.default_scenario(),
            apply_guardrail_scaling: config.assessment.apply_guardrail_scaling,
            clamp_inputs: config.assessment.clamp_inputs,
            projection_years: config.projection.years,
            discount_rate: config.projection.discount_rate,
            default_initial_investment: config.projection.initial_investment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCaseAssessment {
    pub id: String,
    pub name: String,
    pub rank: usize,
    pub probability_of_success: f64,
    pub benefits: BenefitResult,
    pub readiness: ReadinessResult,
    pub priority: PriorityResult,
    pub ttv_score: f64,
    pub projection: ProjectionResult,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PortfolioTotals {
    pub use_case_count: usize,
    pub total_annual_value: f64,
    pub expected_value: f64,
    pub annual_token_cost: f64,
    pub npv: f64,
    pub hours_saved: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub generated_at: DateTime<Utc>,
    pub scenario: ScenarioKind,
    pub value_method: ValueScoreMethod,
    pub scaled_by_guardrail: bool,
    pub use_cases: Vec<UseCaseAssessment>,
    pub guardrails: GuardrailReport,
    pub totals: PortfolioTotals,
}

struct ScoredUseCase<'a> {
    input: &'a UseCaseInput,
    benefit_inputs: BenefitInputs,
    probability: f64,
    benefits: BenefitResult,
    readiness: ReadinessResult,
}

pub fn run_assessment(input: &AssessmentInput, options: &AssessmentOptions) -> AssessmentReport {
    let scenario = input.scenario.unwrap_or(options.default_scenario);
    info!(
        use_cases = input.use_cases.len(),
        %scenario,
        "running assessment"
    );

    let mut scored: Vec<ScoredUseCase<'_>> = input
        .use_cases
        .iter()
        .map(|uc| score_use_case(uc, scenario, options.clamp_inputs))
        .collect();

    let breakdowns: Vec<UseCaseBenefitBreakdown> = scored
        .iter()
        .map(|s| {
            UseCaseBenefitBreakdown::from_result(&s.benefits, Some(s.benefit_inputs.hours_saved))
        })
        .collect();
    let guardrails = cross_validate_use_cases(&breakdowns, &input.company);
    for warning in &guardrails.warnings {
        warn!("guardrail: {warning}");
    }

    let scaled_by_guardrail = options.apply_guardrail_scaling && guardrails.metrics.benefits_capped;
    if scaled_by_guardrail {
        let factor = guardrails.metrics.scale_factor;
        info!(scale_factor = factor, "scaling all use cases to guardrail cap");
        for item in &mut scored {
            item.benefits = item.benefits.scaled(factor, item.probability);
        }
    }

    let candidates: Vec<PriorityCandidate> = scored
        .iter()
        .map(|s| PriorityCandidate {
            id: s.input.id.clone(),
            expected_value: s.benefits.expected_value,
            readiness_score: s.readiness.readiness_score,
            friction_annual_cost: s.input.friction_annual_cost,
            time_to_value_months: Some(s.input.readiness.time_to_value_months),
        })
        .collect();
    let ranked = rank_use_cases(&candidates);
    let value_method = ranked
        .first()
        .map(|r| r.method)
        .unwrap_or(ValueScoreMethod::MaxNormalized);
    debug!(?value_method, "priority normalization selected");

    let use_cases: Vec<UseCaseAssessment> = ranked
        .into_iter()
        .map(|ranked| {
            let item = &scored[ranked.index];
            let projection = project(&ProjectionInputs {
                annual_benefit: item.benefits.expected_value,
                years: options.projection_years,
                discount_rate: options.discount_rate,
                initial_investment: item
                    .input
                    .initial_investment
                    .unwrap_or(options.default_initial_investment),
            });
            UseCaseAssessment {
                id: item.input.id.clone(),
                name: item.input.name.clone(),
                rank: ranked.rank,
                probability_of_success: item.probability,
                benefits: item.benefits,
                readiness: item.readiness,
                priority: ranked.priority,
                ttv_score: ranked.ttv_score.unwrap_or(0.0),
                projection,
            }
        })
        .collect();

    let totals = PortfolioTotals {
        use_case_count: use_cases.len(),
        total_annual_value: use_cases.iter().map(|u| u.benefits.total_annual_value).sum(),
        expected_value: use_cases.iter().map(|u| u.benefits.expected_value).sum(),
        annual_token_cost: use_cases.iter().map(|u| u.readiness.annual_token_cost).sum(),
        npv: use_cases.iter().map(|u| u.projection.npv).sum(),
        hours_saved: scored.iter().map(|s| s.benefit_inputs.hours_saved).sum(),
    };

    AssessmentReport {
        generated_at: Utc::now(),
        scenario,
        value_method,
        scaled_by_guardrail,
        use_cases,
        guardrails,
        totals,
    }
}

fn score_use_case(uc: &UseCaseInput, scenario: ScenarioKind, clamp: bool) -> ScoredUseCase<'_> {
    let (benefit_inputs, probability) = if clamp {
        (
            clamp_benefit_inputs(&uc.benefit),
            clamp_input("probability_of_success", uc.probability_of_success),
        )
    } else {
        (uc.benefit.clone(), uc.probability_of_success)
    };

    let base = calculate_benefits(&benefit_inputs, probability);
    let adjusted = apply_scenario(&base, probability, scenario);
    ScoredUseCase {
        input: uc,
        benefit_inputs,
        probability: adjusted.probability_of_success,
        benefits: adjusted.benefits,
        readiness: assess_readiness(&uc.readiness),
    }
}

fn default_probability() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::sample::sample_assessment;
    use crate::priority::PriorityTier;

    #[test]
    fn sample_assessment_ranks_every_use_case() {
        let input = sample_assessment();
        let report = run_assessment(&input, &AssessmentOptions::default());
        assert_eq!(report.use_cases.len(), input.use_cases.len());
        assert_eq!(report.totals.use_case_count, input.use_cases.len());
        let ranks: Vec<usize> = report.use_cases.iter().map(|u| u.rank).collect();
        assert_eq!(ranks, (1..=input.use_cases.len()).collect::<Vec<_>>());
        for pair in report.use_cases.windows(2) {
            assert!(pair[0].priority.priority_score >= pair[1].priority.priority_score);
        }
    }

    #[test]
    fn conservative_scenario_shrinks_expected_value() {
        let mut input = sample_assessment();
        let base = run_assessment(&input, &AssessmentOptions::default());
        input.scenario = Some(ScenarioKind::Conservative);
        let conservative = run_assessment(&input, &AssessmentOptions::default());
        assert_eq!(conservative.scenario, ScenarioKind::Conservative);
        assert!(conservative.totals.expected_value < base.totals.expected_value);
        assert!(
            (conservative.totals.total_annual_value - base.totals.total_annual_value * 0.6).abs()
                < 1e-3
        );
        assert_eq!(
            conservative.use_cases[0].readiness.readiness_score,
            base.use_cases
                .iter()
                .find(|u| u.id == conservative.use_cases[0].id)
                .map(|u| u.readiness.readiness_score)
                .unwrap_or_default()
        );
    }

    #[test]
    fn guardrail_scaling_is_opt_in() {
        let mut input = sample_assessment();
        input.company.annual_revenue = 4_000_000.0;

        let unscaled = run_assessment(&input, &AssessmentOptions::default());
        assert!(unscaled.guardrails.metrics.benefits_capped);
        assert!(!unscaled.scaled_by_guardrail);

        let options = AssessmentOptions {
            apply_guardrail_scaling: true,
            ..AssessmentOptions::default()
        };
        let scaled = run_assessment(&input, &options);
        assert!(scaled.scaled_by_guardrail);
        assert!((scaled.totals.total_annual_value - 2_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn clamping_bounds_out_of_range_inputs() {
        let input = AssessmentInput {
            company: CompanyContext::default(),
            scenario: None,
            use_cases: vec![UseCaseInput {
                id: "wild".to_string(),
                name: "Out of range".to_string(),
                benefit: BenefitInputs {
                    hours_saved: 2_000_000.0,
                    loaded_hourly_rate: 100.0,
                    adoption_rate: 1.0,
                    ..BenefitInputs::default()
                },
                probability_of_success: 3.0,
                readiness: ReadinessInputs::default(),
                friction_annual_cost: None,
                initial_investment: None,
            }],
        };
        let report = run_assessment(&input, &AssessmentOptions::default());
        let only = &report.use_cases[0];
        assert_eq!(only.benefits.cost, 500_000.0 * 100.0);
        assert_eq!(only.probability_of_success, 1.0);
        assert_eq!(report.totals.hours_saved, 500_000.0);
    }

    #[test]
    fn empty_snapshot_produces_empty_report() {
        let report = run_assessment(
            &AssessmentInput {
                company: CompanyContext::default(),
                scenario: None,
                use_cases: Vec::new(),
            },
            &AssessmentOptions::default(),
        );
        assert!(report.use_cases.is_empty());
        assert!(report.guardrails.is_clean());
        assert_eq!(report.totals, PortfolioTotals::default());
    }

    #[test]
    fn friction_costs_switch_to_ratio_scoring() {
        let mut input = sample_assessment();
        for uc in &mut input.use_cases {
            uc.friction_annual_cost = Some(1_000_000.0);
        }
        let report = run_assessment(&input, &AssessmentOptions::default());
        assert_eq!(report.value_method, ValueScoreMethod::FrictionRatio);
        let top = &report.use_cases[0];
        assert!(top.priority.value_score <= 10.0 && top.priority.value_score >= 1.0);
        assert_ne!(top.priority.priority_tier, PriorityTier::Foundation);
    }
}
