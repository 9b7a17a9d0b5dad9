//! API server entry point.

use std::error::Error;

use api::config::Config;
use api::routes::orders::AppState;
use domain::{
    GoodsLookup, InMemoryGoodsCatalog, InMemoryOrderRepository, OrderLifecycle, OrderRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{PostgresGoodsCatalog, PostgresOrderRepository};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Applies the configured call deadline, if any.
fn with_timeout<G, R>(lifecycle: OrderLifecycle<G, R>, config: &Config) -> OrderLifecycle<G, R>
where
    G: GoodsLookup,
    R: OrderRepository,
{
    match config.call_timeout {
        Some(timeout) => lifecycle.with_call_timeout(timeout),
        None => lifecycle,
    }
}

async fn serve<G, R>(
    config: &Config,
    state: Arc<AppState<G, R>>,
    metrics_handle: PrometheusHandle,
) -> Result<(), Box<dyn Error>>
where
    G: GoodsLookup + 'static,
    R: OrderRepository + 'static,
{
    let app = api::create_app(state, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down gracefully");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    // 3. Pick the storage backend and serve
    match config.database_url.as_deref() {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;
            let repository = PostgresOrderRepository::new(pool.clone());
            repository.run_migrations().await?;

            let catalog = PostgresGoodsCatalog::new(pool);
            for goods in api::demo_goods() {
                catalog.upsert(&goods).await?;
            }
            tracing::info!("using PostgreSQL storage");

            let lifecycle = with_timeout(OrderLifecycle::new(catalog, repository), &config);
            let state = api::create_state(lifecycle, config.call_policy(), "postgres");
            serve(&config, state, metrics_handle).await
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory storage");
            let catalog = InMemoryGoodsCatalog::with_goods(api::demo_goods());
            let lifecycle = with_timeout(
                OrderLifecycle::new(catalog, InMemoryOrderRepository::new()),
                &config,
            );
            let state = api::create_state(lifecycle, config.call_policy(), "memory");
            serve(&config, state, metrics_handle).await
        }
    }
}
