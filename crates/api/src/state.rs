use std::sync::Arc;

use tasktrack_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Credential and task storage.
    pub store: Arc<dyn Store>,
    /// Server configuration (token secret, timeouts, CORS).
    pub config: Arc<ServerConfig>,
}
