//! Inventory service entry point.

use std::sync::Arc;

use api::config::Config;
use api::routes::inventory::InventoryState;
use inventory::{InMemoryInventoryStore, InventoryService, PostgresInventoryStore};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env(8081);
    api::init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Build the application around a Postgres or in-memory store
    let app = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .expect("failed to connect to Postgres");
            let store = PostgresInventoryStore::new(pool);
            store
                .run_migrations()
                .await
                .expect("failed to run migrations");
            tracing::info!("using Postgres inventory store");
            let state = Arc::new(InventoryState {
                service: InventoryService::new(store),
            });
            api::inventory_app(state, metrics_handle)
        }
        None => {
            tracing::info!("no DATABASE_URL set, using in-memory inventory store");
            let state = Arc::new(InventoryState {
                service: InventoryService::new(InMemoryInventoryStore::new()),
            });
            api::inventory_app(state, metrics_handle)
        }
    };

    // 4. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting inventory server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(api::shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
