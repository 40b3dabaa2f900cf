//! Unified error types for the service.

use thiserror::Error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error (bind/serve).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_displays_reason() {
        let err = ServiceError::InvalidConfig("PORT must be non-zero".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: PORT must be non-zero"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use");
        let err = ServiceError::from(io);
        assert!(err.to_string().starts_with("io error"));
    }

    #[test]
    fn validation_failures_map_into_invalid_config() {
        let settings = crate::config::Settings {
            port: 0,
            https_port: 443,
            rust_log: "info".to_string(),
            verbose: false,
            service_api_key: None,
        };

        let err = settings
            .validate()
            .map_err(ServiceError::InvalidConfig)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid configuration: PORT must be non-zero"
        );
    }
}
