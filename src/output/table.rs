use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::assessment::AssessmentReport;
use crate::benefit::{BenefitResult, BenefitTraces, FormulaTrace};
use crate::format::format_currency;
use crate::guardrail::GuardrailReport;
use crate::priority::PriorityTier;
use crate::projection::ProjectionResult;
use crate::readiness::ReadinessResult;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn tier_cell(tier: PriorityTier) -> Cell {
    let color = match tier {
        PriorityTier::Champions => Color::Green,
        PriorityTier::QuickWins => Color::Cyan,
        PriorityTier::Strategic => Color::Yellow,
        PriorityTier::Foundation => Color::DarkGrey,
    };
    Cell::new(tier.name()).fg(color)
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn render_assessment_table(report: &AssessmentReport) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Use case",
        "Tier",
        "Phase",
        "Value",
        "Readiness",
        "Priority",
        "Annual value",
        "Expected value",
        "NPV",
        "IRR",
        "Payback (mo)",
    ]);

    for uc in &report.use_cases {
        let label = if uc.name.is_empty() { &uc.id } else { &uc.name };
        table.add_row(Row::from(vec![
            Cell::new(uc.rank),
            Cell::new(label),
            tier_cell(uc.priority.priority_tier),
            Cell::new(uc.priority.recommended_phase),
            Cell::new(format!("{:.1}", uc.priority.value_score)),
            Cell::new(format!("{:.1}", uc.readiness.readiness_score)),
            Cell::new(format!("{:.2}", uc.priority.priority_score)),
            Cell::new(format_currency(uc.benefits.total_annual_value)),
            Cell::new(format_currency(uc.benefits.expected_value)),
            Cell::new(format_currency(uc.projection.npv)),
            Cell::new(percent(uc.projection.irr)),
            Cell::new(uc.projection.payback_months),
        ]));
    }

    let totals = &report.totals;
    let mut out = table.to_string();
    out.push_str(&format!(
        "\nScenario: {}{}\nPortfolio: {} annual, {} expected, {} NPV, {} token spend/yr, {:.0} hours saved",
        report.scenario,
        if report.scaled_by_guardrail {
            format!(
                " (scaled by {:.2} to guardrail cap)",
                report.guardrails.metrics.scale_factor
            )
        } else {
            String::new()
        },
        format_currency(totals.total_annual_value),
        format_currency(totals.expected_value),
        format_currency(totals.npv),
        format_currency(totals.annual_token_cost),
        totals.hours_saved,
    ));
    if !report.guardrails.is_clean() {
        out.push('\n');
        out.push_str(&render_guardrail_table(&report.guardrails));
    }
    out
}

pub fn render_guardrail_table(report: &GuardrailReport) -> String {
    let mut table = new_table();
    table.set_header(vec!["#", "Guardrail warning"]);
    for (idx, warning) in report.warnings.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(warning).fg(Color::Yellow),
        ]);
    }
    let metrics = &report.metrics;
    format!(
        "{table}\nBenefits/revenue: {}  Revenue benefit/revenue: {}  FTE share: {}  Scale factor: {:.3}",
        percent(metrics.total_benefits_vs_revenue),
        percent(metrics.revenue_ratio),
        percent(metrics.fte_ratio),
        metrics.scale_factor,
    )
}

pub fn render_benefit_table(result: &BenefitResult, traces: Option<&BenefitTraces>) -> String {
    let mut table = new_table();
    let mut header = vec!["Category", "Annual value"];
    if traces.is_some() {
        header.push("Formula");
        header.push("Inputs");
    }
    table.set_header(header);

    let rows: [(&str, f64, Option<&FormulaTrace>); 5] = [
        ("Cost", result.cost, traces.map(|t| &t.cost)),
        ("Revenue", result.revenue, traces.map(|t| &t.revenue)),
        ("Risk", result.risk, traces.map(|t| &t.risk)),
        ("Cash flow", result.cash_flow, traces.map(|t| &t.cash_flow)),
        (
            "Expected value",
            result.expected_value,
            traces.map(|t| &t.expected_value),
        ),
    ];
    for (label, value, trace) in rows {
        let mut row = vec![label.to_string(), format_currency(value)];
        if let Some(trace) = trace {
            row.push(trace.formula.clone());
            row.push(
                trace
                    .inputs
                    .iter()
                    .map(|(name, v)| format!("{name}={v}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
        table.add_row(row);
    }
    format!(
        "{table}\nTotal annual value: {}",
        format_currency(result.total_annual_value)
    )
}

pub fn render_readiness_table(result: &ReadinessResult) -> String {
    let mut table = new_table();
    table.set_header(vec!["Readiness score", "Monthly tokens", "Annual token cost"]);
    table.add_row(vec![
        format!("{:.2}", result.readiness_score),
        format!("{:.0}", result.monthly_tokens),
        format!("${:.2}", result.annual_token_cost),
    ]);
    table.to_string()
}

pub fn render_projection_table(result: &ProjectionResult) -> String {
    let mut table = new_table();
    table.set_header(vec!["Year", "Benefit", "Discounted", "Cumulative"]);
    for year in &result.schedule {
        let cumulative = if year.cumulative_discounted < 0.0 {
            Cell::new(format_currency(year.cumulative_discounted)).fg(Color::Red)
        } else {
            Cell::new(format_currency(year.cumulative_discounted)).fg(Color::Green)
        };
        table.add_row(Row::from(vec![
            Cell::new(year.year),
            Cell::new(format_currency(year.benefit)),
            Cell::new(format_currency(year.discounted_benefit)),
            cumulative,
        ]));
    }
    format!(
        "{table}\nNPV: {}  IRR: {}  Payback: {} months",
        format_currency(result.npv),
        percent(result.irr),
        result.payback_months
    )
}

pub fn render_clamp_table(rows: &[(String, f64, f64)]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Input", "Clamped"]);
    for (field, value, clamped) in rows {
        let clamped_cell = if clamped != value {
            Cell::new(clamped).fg(Color::Yellow)
        } else {
            Cell::new(clamped)
        };
        table.add_row(Row::from(vec![
            Cell::new(field),
            Cell::new(value),
            clamped_cell,
        ]));
    }
    table.to_string()
}
