//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{reveal_secret, AppState};
use crate::redirect::https_redirect;

/// Create the API router with the middleware chain attached.
///
/// The HTTPS redirect runs ahead of route dispatch, so it applies to every
/// path, matched or not.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reveal-secret", get(reveal_secret))
        .layer(middleware::from_fn_with_state(state.clone(), https_redirect))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
