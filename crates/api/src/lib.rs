//! HTTP servers with observability for the order management services.
//!
//! One axum router per service (catalog, inventory, orders), sharing the
//! error mapping, the correlation middleware and the tracing/CORS/metrics
//! layers. The binaries under `src/bin` wire a router to its stores, peer
//! clients and configuration.

pub mod config;
pub mod correlation;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use catalog::CatalogStore;
use inventory::InventoryStore;
use metrics_exporter_prometheus::PrometheusHandle;
use orders::OrdersStore;
use remote::{CatalogClient, InventoryClient};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::Config;
use routes::catalog::CatalogState;
use routes::inventory::InventoryState;
use routes::orders::OrdersState;

/// Creates the catalog service router.
pub fn catalog_app<S, I>(
    state: Arc<CatalogState<S, I>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    S: CatalogStore + 'static,
    I: InventoryClient + 'static,
{
    let app = Router::new()
        .route("/api/v1/catalog/items", get(routes::catalog::list::<S, I>))
        .route("/api/v1/catalog/items", post(routes::catalog::create::<S, I>))
        .route(
            "/api/v1/catalog/items",
            delete(routes::catalog::remove_category::<S, I>),
        )
        .route(
            "/api/v1/catalog/items/search",
            get(routes::catalog::search::<S, I>),
        )
        .route(
            "/api/v1/catalog/items/{id}",
            get(routes::catalog::get::<S, I>),
        )
        .route(
            "/api/v1/catalog/items/{id}",
            put(routes::catalog::update::<S, I>),
        )
        .route(
            "/api/v1/catalog/items/{id}",
            delete(routes::catalog::remove::<S, I>),
        )
        .with_state(state);

    with_service_layers(app, metrics_handle)
}

/// Creates the inventory service router.
pub fn inventory_app<S>(state: Arc<InventoryState<S>>, metrics_handle: PrometheusHandle) -> Router
where
    S: InventoryStore + 'static,
{
    let app = Router::new()
        .route("/api/v1/inventory/items", get(routes::inventory::list::<S>))
        .route(
            "/api/v1/inventory/items",
            post(routes::inventory::create::<S>),
        )
        .route(
            "/api/v1/inventory/items",
            put(routes::inventory::update::<S>),
        )
        .route(
            "/api/v1/inventory/items/{id}",
            get(routes::inventory::get::<S>),
        )
        .route(
            "/api/v1/inventory/items/{id}",
            delete(routes::inventory::remove::<S>),
        )
        .route(
            "/api/v1/inventory/items/{id}/decrement",
            post(routes::inventory::decrement::<S>),
        )
        .with_state(state);

    with_service_layers(app, metrics_handle)
}

/// Creates the orders service router.
pub fn orders_app<S, I, C>(
    state: Arc<OrdersState<S, I, C>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    S: OrdersStore + 'static,
    I: InventoryClient + Clone + 'static,
    C: CatalogClient + 'static,
{
    let app = Router::new()
        .route("/api/v1/orders", post(routes::orders::create::<S, I, C>))
        .route("/api/v1/orders", get(routes::orders::list::<S, I, C>))
        .route("/api/v1/orders/{id}", get(routes::orders::get::<S, I, C>))
        .route("/api/v1/orders/{id}", put(routes::orders::update::<S, I, C>))
        .route(
            "/api/v1/orders/{id}",
            delete(routes::orders::remove::<S, I, C>),
        )
        .with_state(state);

    with_service_layers(app, metrics_handle)
}

/// Attaches the endpoints and layers every service carries: health check,
/// Prometheus metrics, CORS, request tracing and correlation ids.
fn with_service_layers(app: Router, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    app.route("/health", get(routes::health::check))
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(correlation::propagate))
}

/// Initializes the tracing subscriber from the configuration. Call once at
/// binary startup.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Resolves once the process receives SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        result = signal::ctrl_c() => {
            result.expect("failed to install SIGINT handler");
            tracing::info!("received SIGINT, shutting down");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        }
    }
}
