//! HTTP delivery layer for the robot factory.
//!
//! Translates `POST /orders` payloads into order requests for the
//! fulfillment saga and maps its outcome onto status codes, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use saga::{
    CatalogError, InMemoryManufactureRepository, InMemoryStockRepository, OrderCoordinator,
    UuidOrderIdGenerator,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/orders",
            get(routes::orders::list).post(routes::orders::create),
        )
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

/// Wires the saga over the given catalog and ledger.
pub fn create_state(
    stock: InMemoryStockRepository,
    ledger: InMemoryManufactureRepository,
) -> Arc<AppState> {
    let coordinator = OrderCoordinator::new(stock, ledger.clone());
    Arc::new(AppState {
        orders: Arc::new(coordinator),
        ledger: Arc::new(ledger),
    })
}

/// Creates the default application state: the seeded catalog, an empty
/// ledger, and random order ids.
pub fn create_default_state() -> Result<Arc<AppState>, CatalogError> {
    let stock = InMemoryStockRepository::new(seed::initial_components())?;
    let ledger = InMemoryManufactureRepository::new(UuidOrderIdGenerator);
    Ok(create_state(stock, ledger))
}
