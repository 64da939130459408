//! HTTP API module for Calculatrice
//!
//! Serves the calculator form, the result page and a health probe.

pub mod routes;

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::locale::Locale;
use crate::session::SessionStore;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server-side sessions
    pub sessions: Arc<SessionStore>,
    /// Name of the session cookie
    pub cookie_name: Arc<str>,
    /// Page language
    pub locale: Locale,
}

impl AppState {
    pub fn new(sessions: Arc<SessionStore>, config: &Config) -> Self {
        AppState {
            sessions,
            cookie_name: Arc::from(config.session.cookie_name.as_str()),
            locale: config.display.locale,
        }
    }
}

/// Start the HTTP server
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = create_router(state);

    // Check if port is already in use (another instance running)
    if tokio::net::TcpStream::connect(addr).await.is_ok() {
        tracing::error!(
            "Port {} is already in use — another calculatrice instance may be running. \
             Use `curl http://{}/health` to check.",
            addr.port(),
            addr
        );
        return Err(CoreError::Api(format!("Port {} already in use", addr.port())));
    }

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CoreError::Api(e.to_string()))?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/index.html", get(routes::index))
        .route(
            "/calculatrice",
            get(routes::calculate_get).post(routes::calculate_post),
        )
        // Health check
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
