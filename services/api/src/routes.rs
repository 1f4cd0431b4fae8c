use crate::infra::{parse_property_types, AppState};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use deal_underwriter::error::AppError;
use deal_underwriter::request::{AnalysisRequest, AnalysisResponse};
use deal_underwriter::underwriting::{CatalogListing, ListingFilter, PropertyCatalog};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Query string accepted by the listing search. `propertyType` takes a comma-separated
/// list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListingQuery {
    #[serde(default)]
    pub(crate) zip: Option<String>,
    #[serde(default)]
    pub(crate) price_min: Option<f64>,
    #[serde(default)]
    pub(crate) price_max: Option<f64>,
    #[serde(default)]
    pub(crate) beds_min: Option<u8>,
    #[serde(default)]
    pub(crate) baths_min: Option<u8>,
    #[serde(default)]
    pub(crate) property_type: Option<String>,
}

impl ListingQuery {
    fn into_filter(self) -> Result<ListingFilter, AppError> {
        let property_types = match self.property_type.as_deref() {
            Some(raw) => parse_property_types(raw).map_err(AppError::InvalidQuery)?,
            None => Vec::new(),
        };

        Ok(ListingFilter {
            zip_code: self.zip.filter(|zip| !zip.trim().is_empty()),
            price_min: self.price_min,
            price_max: self.price_max,
            beds_min: self.beds_min,
            baths_min: self.baths_min,
            property_types,
        })
    }
}

pub(crate) fn with_underwriting_routes<C>(catalog: Arc<C>) -> Router
where
    C: PropertyCatalog + 'static,
{
    Router::new()
        .route("/api/v1/properties", get(search_listings::<C>))
        .route("/api/v1/properties/:id", get(fetch_listing::<C>))
        .with_state(catalog)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/analyze", post(analyze_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "initializing")
    };

    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn analyze_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let response = payload
        .execute(&state.assumptions, Utc::now())
        .map_err(|err| {
            warn!(error = %err, "analysis request rejected");
            err
        })?;

    info!(
        zip_code = %response.meta.zip_code,
        properties = response.results.len(),
        "analysis request served"
    );

    Ok(Json(response))
}

pub(crate) async fn search_listings<C>(
    State(catalog): State<Arc<C>>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<CatalogListing>>, AppError>
where
    C: PropertyCatalog + 'static,
{
    let filter = query.into_filter()?;
    Ok(Json(catalog.search(&filter)?))
}

pub(crate) async fn fetch_listing<C>(
    State(catalog): State<Arc<C>>,
    Path(id): Path<String>,
) -> Result<Json<CatalogListing>, AppError>
where
    C: PropertyCatalog + 'static,
{
    catalog
        .fetch(&id)?
        .map(Json)
        .ok_or(AppError::PropertyNotFound(id))
}
