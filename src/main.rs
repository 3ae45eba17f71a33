//! Process bootstrap: configuration, tracing, the store, the hub, and
//! the axum server.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use connect_four::adapters::bot::HeuristicBot;
use connect_four::adapters::http::{api_router, AppState};
use connect_four::adapters::memory::InMemoryGameStore;
use connect_four::adapters::postgres::PostgresGameStore;
use connect_four::application::hub::GameHub;
use connect_four::config::AppConfig;
use connect_four::ports::GameStore;

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("failed to load configuration");
    config.validate().expect("invalid configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = connect_store(&config).await;

    // Random sources are seeded once here; the engine and hub stay
    // deterministic given a fixed source.
    let hub = GameHub::new(
        Arc::new(HeuristicBot::from_entropy()),
        store.clone(),
        StdRng::from_entropy(),
        config.hub.to_hub_config(),
    );
    hub.spawn_sweeper();

    let app = api_router(AppState { hub, store }, &config.server);
    let addr = config.server.socket_addr();
    info!(%addr, "server starting");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app).await.expect("server error");
}

/// Connects the persistence store, falling back to the in-memory store
/// when no database is configured or the connection fails. The game flow
/// never depends on persistence being available.
async fn connect_store(config: &AppConfig) -> Arc<dyn GameStore> {
    let Some(database) = &config.database else {
        info!("no database configured, using the in-memory store");
        return Arc::new(InMemoryGameStore::new());
    };

    match PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(&database.url)
        .await
    {
        Ok(pool) => {
            let store = PostgresGameStore::new(pool);
            if let Err(err) = store.init().await {
                warn!(error = %err, "could not initialize database schema");
            }
            info!("connected to postgres");
            Arc::new(store)
        }
        Err(err) => {
            warn!(error = %err, "could not connect to database, using the in-memory store");
            Arc::new(InMemoryGameStore::new())
        }
    }
}
