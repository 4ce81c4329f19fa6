use crate::assessment::{AssessmentInput, UseCaseInput};
use crate::benefit::BenefitInputs;
use crate::guardrail::CompanyContext;
use crate::readiness::ReadinessInputs;

/// A mid-size distributor with four drafted use cases. Used when no input
/// file is supplied.
pub fn sample_assessment() -> AssessmentInput {
    AssessmentInput {
        company: CompanyContext {
            annual_revenue: 250_000_000.0,
            total_employees: 1_200,
        },
        scenario: None,
        use_cases: vec![
            UseCaseInput {
                id: "invoice-triage".to_string(),
                name: "Invoice exception triage".to_string(),
                benefit: BenefitInputs {
                    hours_saved: 12_000.0,
                    loaded_hourly_rate: 65.0,
                    benefits_loading_factor: 1.3,
                    adoption_rate: 0.85,
                    data_maturity_multiplier: 0.8,
                    annual_revenue: 250_000_000.0,
                    days_improved: 4.0,
                    cost_of_capital: 0.08,
                    ..BenefitInputs::default()
                },
                probability_of_success: 0.8,
                readiness: ReadinessInputs {
                    data_availability: 7,
                    technical_infrastructure: 6,
                    organizational_capacity: 7,
                    governance: 6,
                    runs_per_month: 20_000.0,
                    input_tokens_per_run: 3_000.0,
                    output_tokens_per_run: 600.0,
                    time_to_value_months: 4.0,
                },
                friction_annual_cost: Some(900_000.0),
                initial_investment: Some(180_000.0),
            },
            UseCaseInput {
                id: "sales-forecast".to_string(),
                name: "Demand-sensing sales forecast".to_string(),
                benefit: BenefitInputs {
                    revenue_uplift_pct: 0.02,
                    revenue_at_risk: 60_000_000.0,
                    data_maturity_multiplier: 0.7,
                    ..BenefitInputs::default()
                },
                probability_of_success: 0.6,
                readiness: ReadinessInputs {
                    data_availability: 5,
                    technical_infrastructure: 5,
                    organizational_capacity: 6,
                    governance: 5,
                    runs_per_month: 2_000.0,
                    input_tokens_per_run: 8_000.0,
                    output_tokens_per_run: 1_500.0,
                    time_to_value_months: 9.0,
                },
                friction_annual_cost: None,
                initial_investment: Some(350_000.0),
            },
            UseCaseInput {
                id: "contract-review".to_string(),
                name: "Supplier contract review".to_string(),
                benefit: BenefitInputs {
                    hours_saved: 3_000.0,
                    loaded_hourly_rate: 140.0,
                    benefits_loading_factor: 1.35,
                    adoption_rate: 0.7,
                    data_maturity_multiplier: 0.75,
                    risk_reduction_pct: 0.3,
                    risk_exposure: 2_500_000.0,
                    ..BenefitInputs::default()
                },
                probability_of_success: 0.7,
                readiness: ReadinessInputs {
                    data_availability: 6,
                    technical_infrastructure: 4,
                    organizational_capacity: 5,
                    governance: 7,
                    runs_per_month: 400.0,
                    input_tokens_per_run: 20_000.0,
                    output_tokens_per_run: 2_000.0,
                    time_to_value_months: 12.0,
                },
                friction_annual_cost: Some(600_000.0),
                initial_investment: Some(250_000.0),
            },
            UseCaseInput {
                id: "support-drafting".to_string(),
                name: "Customer support reply drafting".to_string(),
                benefit: BenefitInputs {
                    hours_saved: 34_000.0,
                    loaded_hourly_rate: 45.0,
                    benefits_loading_factor: 1.25,
                    adoption_rate: 0.6,
                    data_maturity_multiplier: 0.9,
                    ..BenefitInputs::default()
                },
                probability_of_success: 0.85,
                readiness: ReadinessInputs {
                    data_availability: 8,
                    technical_infrastructure: 7,
                    organizational_capacity: 8,
                    governance: 6,
                    runs_per_month: 150_000.0,
                    input_tokens_per_run: 1_500.0,
                    output_tokens_per_run: 400.0,
                    time_to_value_months: 3.0,
                },
                friction_annual_cost: Some(1_900_000.0),
                initial_investment: Some(120_000.0),
            },
        ],
    }
}
