use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::types::{AppState, Region};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CachedRegionSummary {
    identifier: String,
    date: String,
    datestring: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetaResponse {
    region_count: usize,
    fix_count: usize,
    cached_regions: Vec<CachedRegionSummary>,
    refresh_interval_seconds: u64,
    generation_running: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/meta", get(meta))
        .route("/api/regions", get(regions))
        .route("/api/wx/{region}", get(wx))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn regions(State(state): State<AppState>) -> Json<Vec<Region>> {
    Json(state.catalog.regions().to_vec())
}

/// Latest snapshot for the region, or `null` while none has been generated.
pub async fn wx(State(state): State<AppState>, Path(region): Path<String>) -> Response {
    let snapshot = state.cache.lookup(&region);
    let mut response = Json(snapshot).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

pub async fn meta(State(state): State<AppState>) -> Json<MetaResponse> {
    let entries = state.cache.entries();
    let cached_regions: Vec<CachedRegionSummary> = state
        .catalog
        .regions()
        .iter()
        .filter_map(|region| {
            entries
                .get(&region.identifier)
                .map(|snapshot| CachedRegionSummary {
                    identifier: region.identifier.clone(),
                    date: snapshot.info.date.clone(),
                    datestring: snapshot.info.datestring.clone(),
                })
        })
        .collect();

    Json(MetaResponse {
        region_count: state.catalog.regions().len(),
        fix_count: state.catalog.fix_count(),
        cached_regions,
        refresh_interval_seconds: state.cfg.refresh_interval.as_secs(),
        generation_running: state.generator.is_running(),
    })
}
