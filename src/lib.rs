//! Calculatrice - server-rendered arithmetic calculator
//!
//! This crate provides:
//! - Operand parsing and the four arithmetic operations
//! - An in-memory, cookie-keyed session store recording the last access time
//! - HTML rendering of the calculator form and the result page
//! - The HTTP server tying them together
//!
//! # Usage
//!
//! As a library:
//! ```ignore
//! use calculatrice::{Config, Core};
//!
//! let config = Config::from_file("~/.calculatrice/config.toml").unwrap();
//! let core = Core::new(config).unwrap();
//! // core.start_api_server().await.unwrap();
//! ```
//!
//! As a standalone server (CLI):
//! ```text
//! calculatrice --config ~/.calculatrice/config.toml
//! ```

pub mod api;
pub mod calculator;
pub mod config;
pub mod error;
pub mod locale;
pub mod render;
pub mod session;

// Re-export main types for convenience
pub use config::Config;
pub use error::{CalcError, CoreError, Result};
pub use session::SessionStore;

use std::sync::Arc;
use std::time::Duration;

/// Core service owning the configuration and the session store
pub struct Core {
    /// Configuration
    pub config: Config,

    /// Server-side sessions
    sessions: Arc<SessionStore>,
}

impl Core {
    /// Create a new Core instance with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let sessions = Arc::new(SessionStore::from_config(&config.session));
        Ok(Core { config, sessions })
    }

    /// Start the HTTP server (blocks until shutdown)
    pub async fn start_api_server(&self) -> Result<()> {
        let addr = self.config.server_addr();
        tracing::info!("Starting HTTP server on {}", addr);
        let state = api::AppState::new(self.sessions.clone(), &self.config);
        api::serve(addr, state).await
    }

    /// Get a reference to the session store
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Start the periodic sweep of expired sessions
    ///
    /// Lookups already ignore expired sessions; the sweep only frees memory
    /// held by clients that never come back.
    pub fn start_session_sweeper(&self) {
        let interval_secs = self.config.session.sweep_interval_secs;
        if interval_secs == 0 {
            tracing::info!("Session sweeper is disabled");
            return;
        }

        let sessions = self.sessions.clone();
        tracing::info!("Starting session sweeper (every {} seconds)", interval_secs);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let removed = sessions.sweep_expired();
                if removed > 0 {
                    tracing::info!(
                        "Removed {} expired sessions ({} remaining)",
                        removed,
                        sessions.len()
                    );
                }
            }
        });
    }
}
