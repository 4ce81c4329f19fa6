use crate::benefit::trace::{NoTrace, TraceRecorder, TraceSink, Traced};
use crate::benefit::{BenefitInputs, BenefitResult, BenefitTraces, DAYS_PER_YEAR};

const COST_FORMULA: &str =
    "hours_saved × loaded_hourly_rate × benefits_loading_factor × adoption_rate × data_maturity";
const REVENUE_FORMULA: &str =
    "revenue_uplift_pct × revenue_at_risk × realization_factor × data_maturity";
const RISK_FORMULA: &str = "(prob_before × impact_before − prob_after × impact_after) × realization_factor × data_maturity";
const RISK_EXPOSURE_FORMULA: &str =
    "risk_reduction_pct × risk_exposure × realization_factor × data_maturity";
const CASH_FLOW_FORMULA: &str = "annual_revenue × (days_improved / 365) × cost_of_capital × realization_factor × data_maturity";
const EXPECTED_VALUE_FORMULA: &str = "total_annual_value × probability_of_success";

fn cost_benefit<S: TraceSink>(
    hours_saved: f64,
    loaded_rate: f64,
    benefits_loading: f64,
    adoption_rate: f64,
    data_maturity: f64,
    sink: &mut S,
) -> f64 {
    sink.input("hours_saved", hours_saved);
    sink.input("loaded_hourly_rate", loaded_rate);
    sink.input("benefits_loading_factor", benefits_loading);
    sink.input("adoption_rate", adoption_rate);
    sink.input("data_maturity", data_maturity);

    let loaded_labor = hours_saved * loaded_rate * benefits_loading;
    sink.intermediate("loaded_labor_value", loaded_labor);
    let adopted = loaded_labor * adoption_rate;
    sink.intermediate("adopted_value", adopted);
    adopted * data_maturity
}

fn revenue_benefit<S: TraceSink>(
    uplift_pct: f64,
    revenue_at_risk: f64,
    realization_factor: f64,
    data_maturity: f64,
    sink: &mut S,
) -> f64 {
    sink.input("revenue_uplift_pct", uplift_pct);
    sink.input("revenue_at_risk", revenue_at_risk);
    sink.input("realization_factor", realization_factor);
    sink.input("data_maturity", data_maturity);

    let gross_uplift = uplift_pct * revenue_at_risk;
    sink.intermediate("gross_uplift", gross_uplift);
    let realized = gross_uplift * realization_factor;
    sink.intermediate("realized_uplift", realized);
    realized * data_maturity
}

#[allow(clippy::too_many_arguments)]
fn risk_benefit<S: TraceSink>(
    prob_before: f64,
    impact_before: f64,
    prob_after: f64,
    impact_after: f64,
    realization_factor: f64,
    data_maturity: f64,
    sink: &mut S,
) -> f64 {
    sink.input("prob_before", prob_before);
    sink.input("impact_before", impact_before);
    sink.input("prob_after", prob_after);
    sink.input("impact_after", impact_after);
    sink.input("realization_factor", realization_factor);
    sink.input("data_maturity", data_maturity);

    let expected_loss_before = prob_before * impact_before;
    let expected_loss_after = prob_after * impact_after;
    sink.intermediate("expected_loss_before", expected_loss_before);
    sink.intermediate("expected_loss_after", expected_loss_after);
    let reduction = expected_loss_before - expected_loss_after;
    sink.intermediate("expected_loss_reduction", reduction);
    let realized = reduction * realization_factor;
    sink.intermediate("realized_reduction", realized);
    realized * data_maturity
}

fn risk_benefit_from_exposure<S: TraceSink>(
    reduction_pct: f64,
    exposure: f64,
    realization_factor: f64,
    data_maturity: f64,
    sink: &mut S,
) -> f64 {
    sink.input("risk_reduction_pct", reduction_pct);
    sink.input("risk_exposure", exposure);
    sink.input("realization_factor", realization_factor);
    sink.input("data_maturity", data_maturity);

    let avoided = reduction_pct * exposure;
    sink.intermediate("avoided_exposure", avoided);
    let realized = avoided * realization_factor;
    sink.intermediate("realized_avoidance", realized);
    realized * data_maturity
}

fn cash_flow_benefit<S: TraceSink>(
    annual_revenue: f64,
    days_improved: f64,
    cost_of_capital: f64,
    realization_factor: f64,
    data_maturity: f64,
    sink: &mut S,
) -> f64 {
    sink.input("annual_revenue", annual_revenue);
    sink.input("days_improved", days_improved);
    sink.input("cost_of_capital", cost_of_capital);
    sink.input("realization_factor", realization_factor);
    sink.input("data_maturity", data_maturity);

    let year_fraction = days_improved / DAYS_PER_YEAR;
    sink.intermediate("year_fraction", year_fraction);
    let working_capital_freed = annual_revenue * year_fraction;
    sink.intermediate("working_capital_freed", working_capital_freed);
    let carrying_cost_saved = working_capital_freed * cost_of_capital;
    sink.intermediate("carrying_cost_saved", carrying_cost_saved);
    let realized = carrying_cost_saved * realization_factor;
    sink.intermediate("realized_savings", realized);
    realized * data_maturity
}

fn expected_value<S: TraceSink>(total_annual_value: f64, probability: f64, sink: &mut S) -> f64 {
    sink.input("total_annual_value", total_annual_value);
    sink.input("probability_of_success", probability);
    let bounded = probability.clamp(0.0, 1.0);
    if bounded != probability {
        sink.intermediate("bounded_probability", bounded);
    }
    total_annual_value * bounded
}

pub fn calculate_cost_benefit(
    hours_saved: f64,
    loaded_rate: f64,
    benefits_loading: f64,
    adoption_rate: f64,
    data_maturity: f64,
) -> f64 {
    cost_benefit(
        hours_saved,
        loaded_rate,
        benefits_loading,
        adoption_rate,
        data_maturity,
        &mut NoTrace,
    )
}

pub fn calculate_cost_benefit_with_trace(
    hours_saved: f64,
    loaded_rate: f64,
    benefits_loading: f64,
    adoption_rate: f64,
    data_maturity: f64,
) -> Traced {
    let mut recorder = TraceRecorder::default();
    let value = cost_benefit(
        hours_saved,
        loaded_rate,
        benefits_loading,
        adoption_rate,
        data_maturity,
        &mut recorder,
    );
    recorder.finish(COST_FORMULA, value)
}

pub fn calculate_revenue_benefit(
    uplift_pct: f64,
    revenue_at_risk: f64,
    realization_factor: f64,
    data_maturity: f64,
) -> f64 {
    revenue_benefit(
        uplift_pct,
        revenue_at_risk,
        realization_factor,
        data_maturity,
        &mut NoTrace,
    )
}

pub fn calculate_revenue_benefit_with_trace(
    uplift_pct: f64,
    revenue_at_risk: f64,
    realization_factor: f64,
    data_maturity: f64,
) -> Traced {
    let mut recorder = TraceRecorder::default();
    let value = revenue_benefit(
        uplift_pct,
        revenue_at_risk,
        realization_factor,
        data_maturity,
        &mut recorder,
    );
    recorder.finish(REVENUE_FORMULA, value)
}

/// Expected-loss form. A negative result means the use case raises risk.
pub fn calculate_risk_benefit(
    prob_before: f64,
    impact_before: f64,
    prob_after: f64,
    impact_after: f64,
    realization_factor: f64,
    data_maturity: f64,
) -> f64 {
    risk_benefit(
        prob_before,
        impact_before,
        prob_after,
        impact_after,
        realization_factor,
        data_maturity,
        &mut NoTrace,
    )
}

pub fn calculate_risk_benefit_with_trace(
    prob_before: f64,
    impact_before: f64,
    prob_after: f64,
    impact_after: f64,
    realization_factor: f64,
    data_maturity: f64,
) -> Traced {
    let mut recorder = TraceRecorder::default();
    let value = risk_benefit(
        prob_before,
        impact_before,
        prob_after,
        impact_after,
        realization_factor,
        data_maturity,
        &mut recorder,
    );
    recorder.finish(RISK_FORMULA, value)
}

pub fn calculate_risk_benefit_from_exposure(
    reduction_pct: f64,
    exposure: f64,
    realization_factor: f64,
    data_maturity: f64,
) -> f64 {
    risk_benefit_from_exposure(
        reduction_pct,
        exposure,
        realization_factor,
        data_maturity,
        &mut NoTrace,
    )
}

pub fn calculate_risk_benefit_from_exposure_with_trace(
    reduction_pct: f64,
    exposure: f64,
    realization_factor: f64,
    data_maturity: f64,
) -> Traced {
    let mut recorder = TraceRecorder::default();
    let value = risk_benefit_from_exposure(
        reduction_pct,
        exposure,
        realization_factor,
        data_maturity,
        &mut recorder,
    );
    recorder.finish(RISK_EXPOSURE_FORMULA, value)
}

pub fn calculate_cash_flow_benefit(
    annual_revenue: f64,
    days_improved: f64,
    cost_of_capital: f64,
    realization_factor: f64,
    data_maturity: f64,
) -> f64 {
    cash_flow_benefit(
        annual_revenue,
        days_improved,
        cost_of_capital,
        realization_factor,
        data_maturity,
        &mut NoTrace,
    )
}

pub fn calculate_cash_flow_benefit_with_trace(
    annual_revenue: f64,
    days_improved: f64,
    cost_of_capital: f64,
    realization_factor: f64,
    data_maturity: f64,
) -> Traced {
    let mut recorder = TraceRecorder::default();
    let value = cash_flow_benefit(
        annual_revenue,
        days_improved,
        cost_of_capital,
        realization_factor,
        data_maturity,
        &mut recorder,
    );
    recorder.finish(CASH_FLOW_FORMULA, value)
}

pub fn calculate_total_annual_value(cost: f64, revenue: f64, risk: f64, cash_flow: f64) -> f64 {
    cost + revenue + risk + cash_flow
}

/// Probability outside [0, 1] is clamped before weighting.
pub fn calculate_expected_value(total_annual_value: f64, probability_of_success: f64) -> f64 {
    expected_value(total_annual_value, probability_of_success, &mut NoTrace)
}

pub fn calculate_expected_value_with_trace(
    total_annual_value: f64,
    probability_of_success: f64,
) -> Traced {
    let mut recorder = TraceRecorder::default();
    let value = expected_value(total_annual_value, probability_of_success, &mut recorder);
    recorder.finish(EXPECTED_VALUE_FORMULA, value)
}

pub fn calculate_benefits(inputs: &BenefitInputs, probability_of_success: f64) -> BenefitResult {
    BenefitResult::from_categories(
        calculate_cost_benefit(
            inputs.hours_saved,
            inputs.loaded_hourly_rate,
            inputs.benefits_loading_factor,
            inputs.adoption_rate,
            inputs.data_maturity_multiplier,
        ),
        calculate_revenue_benefit(
            inputs.revenue_uplift_pct,
            inputs.revenue_at_risk,
            inputs.revenue_realization(),
            inputs.data_maturity_multiplier,
        ),
        calculate_risk_benefit_from_exposure(
            inputs.risk_reduction_pct,
            inputs.risk_exposure,
            inputs.risk_realization(),
            inputs.data_maturity_multiplier,
        ),
        calculate_cash_flow_benefit(
            inputs.annual_revenue,
            inputs.days_improved,
            inputs.cost_of_capital,
            inputs.cash_flow_realization(),
            inputs.data_maturity_multiplier,
        ),
        probability_of_success,
    )
}

pub fn calculate_benefits_with_trace(
    inputs: &BenefitInputs,
    probability_of_success: f64,
) -> (BenefitResult, BenefitTraces) {
    let cost = calculate_cost_benefit_with_trace(
        inputs.hours_saved,
        inputs.loaded_hourly_rate,
        inputs.benefits_loading_factor,
        inputs.adoption_rate,
        inputs.data_maturity_multiplier,
    );
    let revenue = calculate_revenue_benefit_with_trace(
        inputs.revenue_uplift_pct,
        inputs.revenue_at_risk,
        inputs.revenue_realization(),
        inputs.data_maturity_multiplier,
    );
    let risk = calculate_risk_benefit_from_exposure_with_trace(
        inputs.risk_reduction_pct,
        inputs.risk_exposure,
        inputs.risk_realization(),
        inputs.data_maturity_multiplier,
    );
    let cash_flow = calculate_cash_flow_benefit_with_trace(
        inputs.annual_revenue,
        inputs.days_improved,
        inputs.cost_of_capital,
        inputs.cash_flow_realization(),
        inputs.data_maturity_multiplier,
    );
    let total = calculate_total_annual_value(cost.value, revenue.value, risk.value, cash_flow.value);
    let expected = calculate_expected_value_with_trace(total, probability_of_success);

    let result = BenefitResult {
        cost: cost.value,
        revenue: revenue.value,
        risk: risk.value,
        cash_flow: cash_flow.value,
        total_annual_value: total,
        expected_value: expected.value,
    };
    let traces = BenefitTraces {
        cost: cost.trace,
        revenue: revenue.trace,
        risk: risk.trace,
        cash_flow: cash_flow.trace,
        expected_value: expected.trace,
    };
    (result, traces)
}
