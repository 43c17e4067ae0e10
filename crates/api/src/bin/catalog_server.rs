//! Catalog service entry point.

use std::sync::Arc;

use api::config::Config;
use api::routes::catalog::CatalogState;
use catalog::{CatalogService, InMemoryCatalogStore, PostgresCatalogStore};
use remote::HttpInventoryClient;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env(8080);
    api::init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Connect the inventory peer used for provisioning and stock enrichment
    let inventory = HttpInventoryClient::new(config.inventory_url.clone());

    // 4. Build the application around a Postgres or in-memory store
    let app = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .expect("failed to connect to Postgres");
            let store = PostgresCatalogStore::new(pool);
            store
                .run_migrations()
                .await
                .expect("failed to run migrations");
            tracing::info!("using Postgres catalog store");
            let state = Arc::new(CatalogState {
                service: CatalogService::new(store, inventory),
            });
            api::catalog_app(state, metrics_handle)
        }
        None => {
            tracing::info!("no DATABASE_URL set, using in-memory catalog store");
            let state = Arc::new(CatalogState {
                service: CatalogService::new(InMemoryCatalogStore::new(), inventory),
            });
            api::catalog_app(state, metrics_handle)
        }
    };

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting catalog server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(api::shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
