use std::collections::BTreeMap;
use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::assessment::{run_assessment, AssessmentInput, AssessmentOptions, AssessmentReport};
use crate::benefit::{
    calculate_benefits, calculate_benefits_with_trace, BenefitInputs, BenefitResult,
    BenefitTraces,
};
use crate::config::Config;
use crate::format::{bounds_for, clamp_input, format_currency, parse_currency_string};
use crate::guardrail::{
    apply_scale_factor, cross_validate_use_cases, CompanyContext, GuardrailReport,
    UseCaseBenefitBreakdown,
};
use crate::priority::{rank_use_cases, PriorityCandidate, RankedUseCase};
use crate::projection::{
    project, ProjectionInputs, ProjectionResult, MAX_PROJECTION_YEARS, MIN_PROJECTION_YEARS,
};
use crate::readiness::{assess_readiness, ReadinessInputs, ReadinessResult};
use crate::scenario::{apply_scenario, ScenarioKind};

#[derive(Clone)]
struct ApiState {
    config: Config,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;
type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
struct BenefitRequest {
    #[serde(default)]
    inputs: BenefitInputs,
    #[serde(default = "default_probability")]
    probability_of_success: f64,
    #[serde(default)]
    scenario: Option<ScenarioKind>,
    #[serde(default)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct BenefitResponse {
    scenario: ScenarioKind,
    probability_of_success: f64,
    benefits: BenefitResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    traces: Option<BenefitTraces>,
}

#[derive(Debug, Deserialize)]
struct PriorityRequest {
    use_cases: Vec<PriorityCandidate>,
}

#[derive(Debug, Deserialize)]
struct GuardrailRequest {
    use_cases: Vec<UseCaseBenefitBreakdown>,
    #[serde(default)]
    company: CompanyContext,
    #[serde(default)]
    apply_scaling: bool,
}

#[derive(Debug, Serialize)]
struct GuardrailResponse {
    report: GuardrailReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    scaled: Option<Vec<UseCaseBenefitBreakdown>>,
}

#[derive(Debug, Deserialize)]
struct FormatRequest {
    value: f64,
}

#[derive(Debug, Serialize)]
struct FormatResponse {
    value: f64,
    formatted: String,
}

#[derive(Debug, Deserialize)]
struct ParseRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct ParseResponse {
    text: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct ClampRequest {
    values: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
struct ClampedField {
    value: f64,
    clamped: f64,
    known: bool,
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(ApiState { config }).layer(cors);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/config", get(show_config))
        .route("/v1/assess", post(assess))
        .route("/v1/benefit", post(benefit))
        .route("/v1/readiness", post(readiness))
        .route("/v1/priority", post(priority))
        .route("/v1/projection", post(projection))
        .route("/v1/guardrails", post(guardrails))
        .route("/v1/currency/format", post(currency_format))
        .route("/v1/currency/parse", post(currency_parse))
        .route("/v1/clamp", post(clamp))
        .with_state(state)
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn assess(
    State(state): State<ApiState>,
    body: JsonBody<AssessmentInput>,
) -> ApiResult<AssessmentReport> {
    let Json(input) = body?;
    if input.use_cases.is_empty() {
        return Err(ApiError::bad_request("use_cases must not be empty"));
    }
    let options = AssessmentOptions::from(&state.config);
    Ok(ok(run_assessment(&input, &options)))
}

async fn benefit(body: JsonBody<BenefitRequest>) -> ApiResult<BenefitResponse> {
    let Json(request) = body?;
    Ok(ok(evaluate_benefit(&request)))
}

async fn readiness(body: JsonBody<ReadinessInputs>) -> ApiResult<ReadinessResult> {
    let Json(inputs) = body?;
    Ok(ok(assess_readiness(&inputs)))
}

async fn priority(body: JsonBody<PriorityRequest>) -> ApiResult<Vec<RankedUseCase>> {
    let Json(request) = body?;
    Ok(ok(rank_use_cases(&request.use_cases)))
}

async fn projection(body: JsonBody<ProjectionInputs>) -> ApiResult<ProjectionResult> {
    let Json(inputs) = body?;
    if !(MIN_PROJECTION_YEARS..=MAX_PROJECTION_YEARS).contains(&inputs.years) {
        return Err(ApiError::bad_request(format!(
            "years must be between {MIN_PROJECTION_YEARS} and {MAX_PROJECTION_YEARS}, got {}",
            inputs.years
        )));
    }
    Ok(ok(project(&inputs)))
}

async fn guardrails(body: JsonBody<GuardrailRequest>) -> ApiResult<GuardrailResponse> {
    let Json(request) = body?;
    let report = cross_validate_use_cases(&request.use_cases, &request.company);
    let scaled = (request.apply_scaling && report.metrics.benefits_capped)
        .then(|| apply_scale_factor(&request.use_cases, report.metrics.scale_factor));
    Ok(ok(GuardrailResponse { report, scaled }))
}

async fn currency_format(body: JsonBody<FormatRequest>) -> ApiResult<FormatResponse> {
    let Json(request) = body?;
    Ok(ok(FormatResponse {
        value: request.value,
        formatted: format_currency(request.value),
    }))
}

async fn currency_parse(body: JsonBody<ParseRequest>) -> ApiResult<ParseResponse> {
    let Json(request) = body?;
    let value = parse_currency_string(&request.text);
    Ok(ok(ParseResponse {
        text: request.text,
        value,
    }))
}

async fn clamp(body: JsonBody<ClampRequest>) -> ApiResult<BTreeMap<String, ClampedField>> {
    let Json(request) = body?;
    Ok(ok(clamp_fields(request.values)))
}

fn evaluate_benefit(request: &BenefitRequest) -> BenefitResponse {
    let scenario = request.scenario.unwrap_or_default();
    debug!(%scenario, trace = request.trace, "evaluating benefit request");
    let (base, traces) = if request.trace {
        let (result, traces) =
            calculate_benefits_with_trace(&request.inputs, request.probability_of_success);
        (result, Some(traces))
    } else {
        (
            calculate_benefits(&request.inputs, request.probability_of_success),
            None,
        )
    };
    let adjusted = apply_scenario(&base, request.probability_of_success, scenario);
    BenefitResponse {
        scenario,
        probability_of_success: adjusted.probability_of_success,
        benefits: adjusted.benefits,
        traces,
    }
}

fn clamp_fields(values: BTreeMap<String, f64>) -> BTreeMap<String, ClampedField> {
    values
        .into_iter()
        .map(|(field, value)| {
            let entry = ClampedField {
                value,
                clamped: clamp_input(&field, value),
                known: bounds_for(&field).is_some(),
            };
            (field, entry)
        })
        .collect()
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

fn default_probability() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn benefit_request(trace: bool, scenario: Option<ScenarioKind>) -> BenefitRequest {
        BenefitRequest {
            inputs: BenefitInputs {
                hours_saved: 34_000.0,
                loaded_hourly_rate: 150.0,
                benefits_loading_factor: 1.35,
                adoption_rate: 0.9,
                data_maturity_multiplier: 0.75,
                ..BenefitInputs::default()
            },
            probability_of_success: 0.8,
            scenario,
            trace,
        }
    }

    #[test]
    fn traced_benefit_matches_plain() {
        let plain = evaluate_benefit(&benefit_request(false, None));
        let traced = evaluate_benefit(&benefit_request(true, None));
        assert!(plain.traces.is_none());
        assert_eq!(plain.benefits, traced.benefits);
        let traces = traced.traces.expect("traces requested");
        assert_eq!(traces.cost.output, traced.benefits.cost);
    }

    #[test]
    fn benefit_request_applies_scenario() {
        let base = evaluate_benefit(&benefit_request(false, None));
        let conservative =
            evaluate_benefit(&benefit_request(false, Some(ScenarioKind::Conservative)));
        assert_eq!(base.scenario, ScenarioKind::Base);
        assert!((conservative.benefits.cost - base.benefits.cost * 0.6).abs() < 1e-6);
        assert!((conservative.probability_of_success - 0.68).abs() < 1e-12);
    }

    #[test]
    fn clamp_fields_reports_unknown_names() {
        let mut values = BTreeMap::new();
        values.insert("adoptionRate".to_string(), 1.4);
        values.insert("favourite_colour".to_string(), 7.0);
        let clamped = clamp_fields(values);
        assert_eq!(clamped["adoptionRate"].clamped, 1.0);
        assert!(clamped["adoptionRate"].known);
        assert_eq!(clamped["favourite_colour"].clamped, 7.0);
        assert!(!clamped["favourite_colour"].known);
    }

    #[test]
    fn benefit_request_defaults_probability() {
        let request: BenefitRequest =
            serde_json::from_str(r#"{"inputs": {"hours_saved": 10.0}}"#).expect("parse");
        assert_eq!(request.probability_of_success, 1.0);
        assert!(!request.trace);
        assert_eq!(request.inputs.benefits_loading_factor, 1.0);
    }

    #[tokio::test]
    async fn empty_assessment_is_rejected() {
        let state = ApiState {
            config: Config::default(),
        };
        let body = Ok(Json(AssessmentInput {
            company: CompanyContext::default(),
            scenario: None,
            use_cases: Vec::new(),
        }));
        let err = assess(State(state), body).await.err().expect("rejected");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn projection_rejects_out_of_range_years() {
        let inputs: ProjectionInputs =
            serde_json::from_str(r#"{"annual_benefit": 1.0, "years": 4000000000}"#)
                .expect("parse");
        let err = projection(Ok(Json(inputs))).await.err().expect("rejected");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let zero = ProjectionInputs {
            years: 0,
            ..ProjectionInputs::new(1.0)
        };
        assert!(projection(Ok(Json(zero))).await.is_err());

        let Json(response) = projection(Ok(Json(ProjectionInputs::new(1.0))))
            .await
            .expect("default horizon accepted");
        assert_eq!(response.data.schedule.len(), 3);
    }

    #[tokio::test]
    async fn guardrail_scaling_only_when_capped() {
        let request = GuardrailRequest {
            use_cases: vec![UseCaseBenefitBreakdown {
                cost: 800_000.0,
                ..UseCaseBenefitBreakdown::default()
            }],
            company: CompanyContext {
                annual_revenue: 1_000_000.0,
                total_employees: 0,
            },
            apply_scaling: true,
        };
        let Json(response) = guardrails(Ok(Json(request))).await.expect("ok");
        assert!(response.ok);
        let scaled = response.data.scaled.expect("scaled set");
        assert!((scaled[0].cost - 500_000.0).abs() < 1e-6);
    }
}
