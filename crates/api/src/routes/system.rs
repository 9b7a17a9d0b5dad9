//! Health and Prometheus metrics endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use domain::{GoodsLookup, OrderRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use super::orders::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub buy_calls: u64,
}

/// GET /health: returns liveness and which storage backend is wired in.
pub async fn health<G, R>(State(state): State<Arc<AppState<G, R>>>) -> Json<HealthResponse>
where
    G: GoodsLookup + 'static,
    R: OrderRepository + 'static,
{
    Json(HealthResponse {
        status: "ok",
        storage: state.storage,
        buy_calls: state.buy_service.monitor().call_count(),
    })
}

/// GET /metrics: returns Prometheus-formatted metrics.
pub async fn metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
}
