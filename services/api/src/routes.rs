use crate::infra::AppState;
use ats_core::analytics::{dashboard_router, AnalyticsService};
use ats_core::search::{search_router, SearchService};
use ats_core::store::EntityStore;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Search and dashboard APIs plus the operational endpoints. Expects an
/// `Extension<AppState>` layer.
pub(crate) fn with_application_routes<S>(
    search: Arc<SearchService<S>>,
    analytics: Arc<AnalyticsService<S>>,
    max_limit: usize,
) -> axum::Router
where
    S: EntityStore + 'static,
{
    search_router(search, max_limit)
        .merge(dashboard_router(analytics, max_limit))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
