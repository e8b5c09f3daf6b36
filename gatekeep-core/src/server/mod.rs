//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::crypto::PasswordDeriver;
use crate::middleware::{normalize_error_response, ObservabilityLayer, SanitizedMakeSpan};
use crate::repository::{role::RoleRepositoryImpl, user::UserRepositoryImpl, DbPool};
use crate::service::{RoleService, UserService};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: DbPool,
    pub role_service: Arc<RoleService<RoleRepositoryImpl>>,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub prometheus_handle: Option<PrometheusHandle>,
}

impl HasServices for AppState {
    type RoleRepo = RoleRepositoryImpl;
    type UserRepo = UserRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn role_service(&self) -> &RoleService<Self::RoleRepo> {
        &self.role_service
    }

    fn user_service(&self) -> &UserService<Self::UserRepo> {
        &self.user_service
    }

    fn prometheus_handle(&self) -> Option<&PrometheusHandle> {
        self.prometheus_handle.as_ref()
    }

    async fn check_ready(&self) -> bool {
        self.db_pool.ping().await
    }
}

/// Connect to the database, wire services and serve HTTP until shutdown.
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let role_repo = Arc::new(RoleRepositoryImpl::new(pool.clone()));
    let user_repo = Arc::new(UserRepositoryImpl::new(pool.clone()));

    let passwords = PasswordDeriver::new(
        config.security.secret_key.clone(),
        config.security.password_source,
    );
    info!(source = ?passwords.source(), "Password derivation configured");

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool: DbPool::new(pool),
        role_service: Arc::new(RoleService::new(role_repo)),
        user_service: Arc::new(UserService::new(user_repo, passwords)),
        prometheus_handle,
    };

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Build the HTTP router with generic state type
///
/// Generic over the state so tests can serve the same routes from
/// in-memory repositories.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = Duration::from_secs(state.config().request_timeout_secs);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route("/metrics", get(api::metrics::metrics_handler::<S>))
        // Roles
        .route(
            "/roles",
            get(api::role::search::<S>).post(api::role::create::<S>),
        )
        .route(
            "/roles/{name}",
            get(api::role::get::<S>)
                .put(api::role::update::<S>)
                .delete(api::role::delete::<S>),
        )
        // Users
        .route(
            "/users/registration",
            post(api::user::registration::<S>),
        )
        .route("/users/{email}/verify", post(api::user::verify::<S>))
        // Middleware, innermost first
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(axum::middleware::from_fn(normalize_error_response))
        .layer(TraceLayer::new_for_http().make_span_with(SanitizedMakeSpan))
        .layer(ObservabilityLayer)
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
