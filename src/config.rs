//! Application configuration loaded from environment variables.

use std::collections::HashMap;

use serde::Deserialize;

/// Name of the configuration key revealed by the service.
pub const SERVICE_API_KEY: &str = "ServiceApiKey";

/// Runtime settings loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Port advertised in HTTPS redirect targets.
    #[serde(default = "default_https_port")]
    pub https_port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    // === Revealed Key ===
    /// Mirror of the revealed key, for startup checks. The handler reads
    /// the [`ConfigStore`] snapshot, not this field.
    #[serde(default)]
    pub service_api_key: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_https_port() -> u16 {
    443
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Load settings from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the settings are valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.https_port == 0 {
            return Err("HTTPS_PORT must be non-zero".to_string());
        }

        Ok(())
    }
}

/// Immutable key/value configuration store, populated once at startup.
///
/// Lookups are read-only for the lifetime of the process. A missing key is
/// never an error; callers get `None` and decide what that means.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    values: HashMap<String, String>,
}

impl ConfigStore {
    /// Snapshot the process environment into a store.
    pub fn from_env() -> Self {
        Self {
            values: std::env::vars().collect(),
        }
    }

    /// Build a store from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a value by key.
    ///
    /// An exact-key miss retries the SCREAMING_SNAKE_CASE spelling, so the
    /// canonical env var `SERVICE_API_KEY` satisfies a lookup of
    /// `ServiceApiKey`.
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some(value) = self.values.get(key) {
            return Some(value.as_str());
        }

        self.values.get(&env_key(key)).map(String::as_str)
    }

    /// Number of entries in the store.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Convert a PascalCase/camelCase key to its env var spelling.
fn env_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars
                .get(i + 1)
                .is_some_and(|n| n.is_ascii_lowercase());

            // Word boundary: aB, 1B, or the last capital of an acronym (ABc).
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_uppercase());
    }

    out
}
