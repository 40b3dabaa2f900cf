//! HTTP API module for the reveal endpoint.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
