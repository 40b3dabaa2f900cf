//! HTTP API handlers.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::config::{ConfigStore, SERVICE_API_KEY};
use crate::metrics;

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read-only configuration store.
    pub config: Arc<ConfigStore>,
    /// Port used when building HTTPS redirect targets.
    pub https_port: u16,
}

impl AppState {
    /// Create new app state.
    pub fn new(config: ConfigStore, https_port: u16) -> Self {
        Self {
            config: Arc::new(config),
            https_port,
        }
    }
}

/// Reveal handler - returns the configured API key verbatim.
///
/// A missing key yields an empty body, still with 200: the store treats
/// absence as an empty value, not an error.
pub async fn reveal_secret(State(state): State<AppState>) -> impl IntoResponse {
    metrics::inc_requests_served();

    state
        .config
        .get(SERVICE_API_KEY)
        .unwrap_or_default()
        .to_owned()
}
