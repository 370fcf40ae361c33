use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};

use crate::data::repositories::memory::post_repository::MemoryPostRepository;
use crate::data::repositories::memory::user_repository::MemoryUserRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::database::{create_pool, run_migrations};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::http::build_router;
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::trace::apply_trace;

pub(crate) async fn build_state(settings: &Settings) -> Result<AppState> {
    let jwt = Arc::new(JwtService::new(&settings.jwt_secret));

    let state = match &settings.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url, settings.database_max_connections).await?;
            run_migrations(&pool).await?;
            AppState::new(
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresPostRepository::new(pool)),
                jwt,
            )
        }
        None => {
            warn!("DATABASE_URL is not set, data is kept in memory only");
            AppState::new(
                Arc::new(MemoryUserRepository::new()),
                Arc::new(MemoryPostRepository::new()),
                jwt,
            )
        }
    };

    Ok(state)
}

pub(crate) fn build_app(settings: &Settings, state: AppState) -> Result<Router> {
    let app = build_router(state)
        .layer(RequestBodyLimitLayer::new(settings.http_request_body_limit_bytes));
    let app = apply_trace(app);
    apply_cors(app, settings)
}

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> Result<()> {
    let app = build_app(settings, state)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
