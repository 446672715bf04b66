use crate::modules::aggregator::{AggregatorService, SourceIds};
use crate::modules::provider::AnimeSource;
use crate::shared::errors::AppError;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub type SharedService = Arc<AggregatorService>;

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/search", get(search))
        .route("/episodes", get(episodes))
        .route("/stream", get(stream))
        .route("/seasons", get(seasons))
        .with_state(service)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ProviderFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::AggregationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
}

/// Per-source identifiers as short query-parameter tags.
#[derive(Debug, Deserialize)]
struct SourceParams {
    #[serde(rename = "AW")]
    animeworld: Option<String>,
    #[serde(rename = "AS")]
    animesaturn: Option<String>,
}

impl SourceParams {
    /// Empty parameter values (`?AW=&AS=x`) count as absent, not as an
    /// identifier.
    fn into_ids(self) -> SourceIds {
        let mut ids = SourceIds::new();
        if let Some(id) = self.animeworld.filter(|id| !id.is_empty()) {
            ids.insert(AnimeSource::AnimeWorld, id);
        }
        if let Some(id) = self.animesaturn.filter(|id| !id.is_empty()) {
            ids.insert(AnimeSource::AnimeSaturn, id);
        }
        ids
    }
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "animerge - unified anime catalog aggregator",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn search(
    State(service): State<SharedService>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let results = service.aggregate_search(&params.q).await?;
    Ok(Json(results))
}

async fn episodes(
    State(service): State<SharedService>,
    Query(params): Query<SourceParams>,
) -> Result<impl IntoResponse, AppError> {
    let records = service.aggregate_episodes(&params.into_ids()).await?;
    Ok(Json(records))
}

async fn stream(
    State(service): State<SharedService>,
    Query(params): Query<SourceParams>,
) -> Result<impl IntoResponse, AppError> {
    let report = service.aggregate_stream(&params.into_ids()).await?;
    Ok(Json(report))
}

async fn seasons(
    State(service): State<SharedService>,
    Query(params): Query<SourceParams>,
) -> Result<impl IntoResponse, AppError> {
    let report = service.aggregate_seasons(&params.into_ids()).await?;
    Ok(Json(report))
}
