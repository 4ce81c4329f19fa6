//! Cross-checks of an aggregated use-case set against company-level context.
//!
//! Checks never block. They append warnings in a fixed order and report a
//! scale factor; acting on it is up to the caller.

use serde::{Deserialize, Serialize};

use crate::benefit::BenefitResult;
use crate::format::format_currency;

pub const MAX_BENEFIT_TO_REVENUE: f64 = 0.50;
pub const MAX_REVENUE_BENEFIT_TO_REVENUE: f64 = 0.30;
pub const MAX_FTE_SHARE: f64 = 0.20;
pub const STANDARD_ANNUAL_HOURS: f64 = 2080.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct UseCaseBenefitBreakdown {
    pub cost: f64,
    pub revenue: f64,
    pub risk: f64,
    pub cash_flow: f64,
    #[serde(default)]
    pub hours_saved: Option<f64>,
}

impl UseCaseBenefitBreakdown {
    pub fn from_result(result: &BenefitResult, hours_saved: Option<f64>) -> Self {
        Self {
            cost: result.cost,
            revenue: result.revenue,
            risk: result.risk,
            cash_flow: result.cash_flow,
            hours_saved,
        }
    }

    pub fn total(&self) -> f64 {
        self.cost + self.revenue + self.risk + self.cash_flow
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CompanyContext {
    #[serde(default)]
    pub annual_revenue: f64,
    #[serde(default)]
    pub total_employees: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GuardrailMetrics {
    pub total_benefits_vs_revenue: f64,
    pub revenue_ratio: f64,
    pub fte_ratio: f64,
    pub benefits_capped: bool,
    pub scale_factor: f64,
}

impl Default for GuardrailMetrics {
    fn default() -> Self {
        Self {
            total_benefits_vs_revenue: 0.0,
            revenue_ratio: 0.0,
            fte_ratio: 0.0,
            benefits_capped: false,
            scale_factor: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GuardrailReport {
    pub warnings: Vec<String>,
    pub metrics: GuardrailMetrics,
}

impl GuardrailReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub fn cross_validate_use_cases(
    breakdowns: &[UseCaseBenefitBreakdown],
    company: &CompanyContext,
) -> GuardrailReport {
    let total_benefits: f64 = breakdowns.iter().map(UseCaseBenefitBreakdown::total).sum();
    let total_revenue_benefit: f64 = breakdowns.iter().map(|b| b.revenue).sum();
    let total_hours: f64 = breakdowns.iter().filter_map(|b| b.hours_saved).sum();

    let mut report = GuardrailReport::default();
    let revenue = company.annual_revenue;

    if revenue > 0.0 {
        report.metrics.total_benefits_vs_revenue = total_benefits / revenue;
        report.metrics.revenue_ratio = total_revenue_benefit / revenue;

        let benefit_cap = revenue * MAX_BENEFIT_TO_REVENUE;
        if total_benefits > benefit_cap {
            let scale_factor = (benefit_cap / total_benefits).min(1.0);
            report.metrics.scale_factor = scale_factor;
            report.metrics.benefits_capped = scale_factor < 1.0;
            report.warnings.push(format!(
                "Total annual benefits of {} are {:.0}% of annual revenue ({}), above the {:.0}% plausibility limit. Scaling all use cases by {:.2} would bring them within range.",
                format_currency(total_benefits),
                report.metrics.total_benefits_vs_revenue * 100.0,
                format_currency(revenue),
                MAX_BENEFIT_TO_REVENUE * 100.0,
                scale_factor
            ));
        }

        if total_revenue_benefit > revenue * MAX_REVENUE_BENEFIT_TO_REVENUE {
            report.warnings.push(format!(
                "Revenue benefits of {} are {:.0}% of annual revenue, above {:.0}%. Use cases may be counting the same revenue more than once.",
                format_currency(total_revenue_benefit),
                report.metrics.revenue_ratio * 100.0,
                MAX_REVENUE_BENEFIT_TO_REVENUE * 100.0
            ));
        }
    }

    if company.total_employees > 0 {
        let employees = f64::from(company.total_employees);
        let implied_fte = total_hours / STANDARD_ANNUAL_HOURS;
        report.metrics.fte_ratio = implied_fte / employees;
        if implied_fte > employees * MAX_FTE_SHARE {
            report.warnings.push(format!(
                "Hours saved imply {:.1} FTE, {:.0}% of {} employees, above the {:.0}% limit.",
                implied_fte,
                report.metrics.fte_ratio * 100.0,
                company.total_employees,
                MAX_FTE_SHARE * 100.0
            ));
        }
    }

    report
}

/// Scales every monetary category by `scale_factor`; hours are left as
/// entered.
pub fn apply_scale_factor(
    breakdowns: &[UseCaseBenefitBreakdown],
    scale_factor: f64,
) -> Vec<UseCaseBenefitBreakdown> {
    breakdowns
        .iter()
        .map(|b| UseCaseBenefitBreakdown {
            cost: b.cost * scale_factor,
            revenue: b.revenue * scale_factor,
            risk: b.risk * scale_factor,
            cash_flow: b.cash_flow * scale_factor,
            hours_saved: b.hours_saved,
        })
        .collect()
}
