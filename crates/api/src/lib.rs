//! HTTP API server with observability for the purchase order service.
//!
//! Provides REST endpoints for placing purchase orders and reading back
//! orders, customers and shipping slips, with structured logging (tracing)
//! and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{InMemoryCustomerStore, InMemoryItemCatalog, InMemoryShippingSlipStore, StoreError};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/purchase-orders", post(routes::purchase_orders::create))
        .route("/purchase-orders/{id}", get(routes::purchase_orders::get))
        .route("/customers/{id}", get(routes::customers::get))
        .route("/shipping-slips/{id}", get(routes::shipping_slips::get))
        .route(
            "/shipping-slips/by-order/{order_id}",
            get(routes::shipping_slips::by_order),
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

/// Creates application state backed by in-memory stores.
///
/// The demo catalog and customer are loaded when `config.seed_demo_data` is set.
pub async fn create_default_state(config: &Config) -> Result<Arc<AppState>, StoreError> {
    let customers = InMemoryCustomerStore::new();
    let catalog = InMemoryItemCatalog::new();
    let slips = InMemoryShippingSlipStore::new();

    if config.seed_demo_data {
        store::seed::load_demo_data(&customers, &catalog).await?;
    }
    tracing::info!(
        customers = customers.customer_count().await,
        items = catalog.item_count().await,
        "stores initialized"
    );

    Ok(Arc::new(AppState::new(customers, catalog, slips)))
}
