mod config;
mod db;
mod routes;
mod services;
mod state;


use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Fatal errors between configuration and serving.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("database init failed: {0}")]
    Database(#[source] sqlx::Error),
    #[error("workspace hydrate failed: {0}")]
    Hydrate(#[source] sqlx::Error),
    #[error("{0}")]
    Leptos(String),
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "startup failed");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let (state, pool) = open_workspace(&config).await?;

    // Spawn background persistence task.
    let _persistence = pool
        .map(|pool| services::persistence::spawn_persistence_task(state.clone(), pool, config.flush_interval_ms));

    let app = routes::app(state).map_err(StartupError::Leptos)?;
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| StartupError::Bind { port, source })?;

    tracing::info!(%port, "sprintspace listening");
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}

/// Connect the optional database, hydrate the workspace from it, then seed.
async fn open_workspace(config: &ServerConfig) -> Result<(AppState, Option<PgPool>), StartupError> {
    let pool = match config.database_url.as_deref() {
        Some(url) => Some(
            db::init_pool(url, config.db_max_connections)
                .await
                .map_err(StartupError::Database)?,
        ),
        None => {
            tracing::warn!("DATABASE_URL not set; workspace is in-memory only");
            None
        }
    };

    let state = AppState::new(pool.clone());

    if let Some(pool) = &pool {
        services::persistence::hydrate(&state, pool)
            .await
            .map_err(StartupError::Hydrate)?;
    }
    if config.seed_demo_data {
        services::seed::seed_demo_data(&state).await;
    }

    Ok((state, pool))
}
