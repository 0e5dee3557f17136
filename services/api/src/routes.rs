use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use carmatch::domain::CandidateSource;
use carmatch::error::AppError;
use carmatch::gateway::{CandidateGateway, GatewaySource, ProfileQuery};
use carmatch::profile::{compile, RequirementProfile};
use carmatch::scoring::{rank, ScoredCandidate, ScoringStrategy};
use carmatch::survey::SurveyAnswers;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Recommendations returned when the request does not ask for a specific
/// count.
pub(crate) const DEFAULT_TOP: usize = 5;

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    pub(crate) answers: SurveyAnswers,
    /// County or city used for the registry region filter; market search
    /// ignores it.
    #[serde(default)]
    pub(crate) region: Option<String>,
    #[serde(default)]
    pub(crate) top: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    pub(crate) as_of: NaiveDate,
    pub(crate) data_source: RecommendationDataSource,
    pub(crate) profile: RequirementProfile,
    pub(crate) recommendations: Vec<ScoredCandidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RecommendationDataSource {
    Classifieds,
    Synthetic,
}

pub(crate) fn advisor_router(gateway: Arc<CandidateGateway>) -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/advisor/profile",
            axum::routing::post(profile_endpoint),
        )
        .route(
            "/api/v1/advisor/recommendations",
            axum::routing::post(recommendations_endpoint),
        )
        .layer(Extension(gateway))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn profile_endpoint(
    Json(answers): Json<SurveyAnswers>,
) -> Result<Json<RequirementProfile>, AppError> {
    let profile = compile(&answers)?;
    Ok(Json(profile))
}

pub(crate) async fn recommendations_endpoint(
    Extension(gateway): Extension<Arc<CandidateGateway>>,
    Json(payload): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let RecommendationRequest {
        answers,
        region,
        top,
        as_of,
    } = payload;

    let profile = compile(&answers)?;
    let query = ProfileQuery::from_profile(&profile, region);
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let records = gateway
        .fetch(&query, GatewaySource::Classifieds, as_of)
        .await?;
    let data_source = if records
        .iter()
        .all(|record| record.source == CandidateSource::Synthetic)
    {
        RecommendationDataSource::Synthetic
    } else {
        RecommendationDataSource::Classifieds
    };

    let current_year = as_of.year();
    let scored: Vec<ScoredCandidate> = records
        .iter()
        .map(|candidate| {
            ScoringStrategy::for_source(candidate.source).score(candidate, &profile, current_year)
        })
        .collect();
    let recommendations = rank(scored, top.unwrap_or(DEFAULT_TOP));

    Ok(Json(RecommendationResponse {
        as_of,
        data_source,
        profile,
        recommendations,
    }))
}
