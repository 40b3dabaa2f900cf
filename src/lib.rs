//! Minimal HTTP service that reveals a configured API key.
//!
//! The service binds one listener, installs an HTTP to HTTPS redirect ahead
//! of route dispatch, and exposes a single route:
//!
//! ```text
//! GET /reveal-secret  ->  200 OK, body = value of `ServiceApiKey`
//! ```
//!
//! The configuration store is snapshotted from the environment at startup
//! and is read-only from then on. A missing key yields an empty body, not
//! an error.
//!
//! # Modules
//!
//! - [`config`]: Settings and the read-only configuration store
//! - [`error`]: Unified error types
//! - [`api`]: Route table and handlers
//! - [`redirect`]: HTTP to HTTPS redirect middleware
//! - [`metrics`]: Request counters and latency tracking
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod redirect;
pub mod utils;

pub use config::{ConfigStore, Settings};
pub use error::{Result, ServiceError};
