use anyhow::Result;

use crate::assessment::AssessmentReport;
use crate::projection::ProjectionResult;

pub fn assessment_to_csv(report: &AssessmentReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "rank",
        "id",
        "name",
        "scenario",
        "tier",
        "quadrant",
        "phase",
        "value_score",
        "readiness_score",
        "priority_score",
        "cost",
        "revenue",
        "risk",
        "cash_flow",
        "total_annual_value",
        "expected_value",
        "annual_token_cost",
        "npv",
        "irr",
        "payback_months",
    ])?;
    for uc in &report.use_cases {
        writer.write_record([
            uc.rank.to_string(),
            uc.id.clone(),
            uc.name.clone(),
            report.scenario.to_string(),
            uc.priority.priority_tier.rank().to_string(),
            uc.priority.quadrant.as_key().to_string(),
            uc.priority.recommended_phase.to_string(),
            format!("{:.4}", uc.priority.value_score),
            format!("{:.4}", uc.readiness.readiness_score),
            format!("{:.4}", uc.priority.priority_score),
            format!("{:.2}", uc.benefits.cost),
            format!("{:.2}", uc.benefits.revenue),
            format!("{:.2}", uc.benefits.risk),
            format!("{:.2}", uc.benefits.cash_flow),
            format!("{:.2}", uc.benefits.total_annual_value),
            format!("{:.2}", uc.benefits.expected_value),
            format!("{:.2}", uc.readiness.annual_token_cost),
            format!("{:.2}", uc.projection.npv),
            format!("{:.4}", uc.projection.irr),
            uc.projection.payback_months.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn projection_to_csv(result: &ProjectionResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["year", "benefit", "discounted_benefit", "cumulative_discounted"])?;
    for year in &result.schedule {
        writer.write_record([
            year.year.to_string(),
            format!("{:.2}", year.benefit),
            format!("{:.2}", year.discounted_benefit),
            format!("{:.2}", year.cumulative_discounted),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
