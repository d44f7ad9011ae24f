//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{DbAdapter, IdentityDirectory, MemoryIdentityDirectory},
    config::{Config, StoreBackend},
    error::ApiError,
    web::{self, rest::ApiDoc, state::{spawn_session_sweeper, AppState}},
};
use axum::{http::HeaderValue, Router};
use daily_literature_core::{generate_catalog, DocumentStore, MemoryDocumentStore};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to the Store ---
    let (store, directory): (Arc<dyn DocumentStore>, Arc<dyn IdentityDirectory>) =
        match &config.store {
            StoreBackend::Postgres { database_url } => {
                info!("Connecting to database...");
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(database_url)
                    .await?;
                let db_adapter = Arc::new(DbAdapter::new(db_pool));
                info!("Running database migrations...");
                db_adapter.run_migrations().await?;
                info!("Database migrations complete.");
                let store: Arc<dyn DocumentStore> = db_adapter.clone();
                let directory: Arc<dyn IdentityDirectory> = db_adapter;
                (store, directory)
            }
            StoreBackend::Memory => {
                warn!("Using the in-memory store; data is lost on restart.");
                let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
                let directory: Arc<dyn IdentityDirectory> = Arc::new(MemoryIdentityDirectory::new());
                (store, directory)
            }
        };

    // --- 3. Build the Shared AppState ---
    let catalog = generate_catalog();
    info!("Catalog holds {} quotes.", catalog.len());
    let app_state = Arc::new(AppState::new(store, directory, config.clone(), catalog));
    spawn_session_sweeper(app_state.clone());
    info!(
        "Idle sessions expire after {}s, swept every {}s.",
        config.session_idle_timeout.as_secs(),
        config.session_sweep_interval.as_secs()
    );

    // --- 4. Create the Web Router ---
    let cors_origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e))
    })?;
    let app = Router::new()
        .merge(web::router(app_state, cors_origin))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
