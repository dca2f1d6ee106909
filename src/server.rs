//! HTTP server initialization.
//!
//! Provides [`serve`], which wires the database, token verifier, and feedback
//! provider into an axum [`Router`] and runs it until ctrl-c.

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{self, ApiError};
use crate::auth::JwtAuth;
use crate::config::DaylogConfig;
use crate::db;
use crate::error::DaylogResult;
use crate::feedback::{self, FeedbackProvider};

/// Shared handler state. Cloned per request; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub jwt: Arc<JwtAuth>,
    pub feedback: Option<Arc<dyn FeedbackProvider>>,
    pub default_days: u32,
}

impl AppState {
    pub fn new(
        conn: Connection,
        jwt: JwtAuth,
        feedback: Option<Arc<dyn FeedbackProvider>>,
        default_days: u32,
    ) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            jwt: Arc::new(jwt),
            feedback,
            default_days,
        }
    }

    /// Open the DB, build the token verifier, and create the feedback provider.
    pub fn from_config(config: &DaylogConfig) -> Result<Self> {
        let jwt = JwtAuth::new(&config.auth.jwt_secret, config.auth.token_ttl_hours)?;

        let db_path = config.resolved_db_path();
        let conn = db::open_database(&db_path)?;
        tracing::info!(db = %db_path.display(), "database ready");

        let feedback = feedback::create_provider(&config.feedback)?;
        match &feedback {
            Some(provider) => tracing::info!(provider = provider.name(), "feedback provider ready"),
            None => tracing::info!("feedback disabled"),
        }

        Ok(Self::new(conn, jwt, feedback, config.stats.default_days))
    }

    /// Run a store call on the blocking pool while holding the connection lock.
    pub async fn with_db<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> DaylogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut conn = db
                .lock()
                .map_err(|e| ApiError::internal(format!("db lock poisoned: {e}")))?;
            f(&mut conn).map_err(ApiError::from)
        })
        .await
        .map_err(|e| ApiError::internal(format!("db task failed: {e}")))?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/entries", get(api::entries::list_entries))
        .route(
            "/api/entries/{date}",
            get(api::entries::get_entry)
                .put(api::entries::put_entry)
                .delete(api::entries::delete_entry),
        )
        .route("/api/stats/summary", get(api::stats::summary))
        .route("/api/stats/trends/{metric}", get(api::stats::trends))
        .route("/api/stats/streak", get(api::stats::streak))
        .with_state(state)
}

/// Start the HTTP API and serve until ctrl-c.
pub async fn serve(config: DaylogConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    let state = AppState::from_config(&config)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "daylog API listening at http://{bind_addr}/api");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down HTTP server");
}
