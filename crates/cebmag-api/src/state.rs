//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds the [`TicketService`] (clone-friendly
//! via `Arc` internals) and the application configuration.

use cebmag_service::TicketService;

/// Application configuration, built from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// `PORT` overrides the default listen port; unparseable values fall
    /// back to the default.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        Self { port }
    }
}

/// Shared application state accessible to all route handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The PQRS ticket service.
    pub tickets: TicketService,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create application state with default configuration and an empty
    /// ticket store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create application state with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            tickets: TicketService::new(),
            config,
        }
    }
}
