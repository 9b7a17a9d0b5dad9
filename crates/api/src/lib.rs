//! HTTP API server for the order purchase workflow.
//!
//! Exposes the buy entry point and order inspection over REST, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use common::{GoodsId, Money};
use domain::{
    Goods, GoodsLookup, InMemoryGoodsCatalog, InMemoryOrderRepository, OrderLifecycle,
    OrderRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use purchase::{BuyWorkflow, CallPolicy, OrderBuyService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<G, R>(state: Arc<AppState<G, R>>, metrics_handle: PrometheusHandle) -> Router
where
    G: GoodsLookup + 'static,
    R: OrderRepository + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::system::health::<G, R>))
        .route("/orders/buy", post(routes::orders::buy::<G, R>))
        .route("/orders/{id}", get(routes::orders::get::<G, R>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires a lifecycle into the buy service and wraps it as shared state.
pub fn create_state<G, R>(
    lifecycle: OrderLifecycle<G, R>,
    policy: CallPolicy,
    storage: &'static str,
) -> Arc<AppState<G, R>>
where
    G: GoodsLookup,
    R: OrderRepository,
{
    let workflow = BuyWorkflow::new(lifecycle);
    Arc::new(AppState {
        buy_service: OrderBuyService::with_policy(workflow, policy),
        storage,
    })
}

/// Goods available out of the box, so the server can take orders without setup.
pub fn demo_goods() -> Vec<Goods> {
    vec![
        Goods::new(GoodsId::new(42), "Desk lamp", Money::from_cents(1999)),
        Goods::new(GoodsId::new(7), "Notebook", Money::from_cents(450)),
        Goods::new(GoodsId::new(100), "Office chair", Money::from_cents(14900)),
    ]
}

/// Creates in-memory application state seeded with [`demo_goods`].
pub fn create_default_state() -> Arc<AppState<InMemoryGoodsCatalog, InMemoryOrderRepository>> {
    let catalog = InMemoryGoodsCatalog::with_goods(demo_goods());
    let lifecycle = OrderLifecycle::new(catalog, InMemoryOrderRepository::new());
    create_state(lifecycle, CallPolicy::default(), "memory")
}
