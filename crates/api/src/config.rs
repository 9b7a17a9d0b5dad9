//! Application configuration loaded from environment variables.

use std::time::Duration;

use purchase::CallPolicy;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: PostgreSQL connection string (default: unset, in-memory stores)
/// - `CALL_TIMEOUT_MS`: deadline for each goods/order store call (default: none)
/// - `SLOW_CALL_MS`: buy calls slower than this are logged (default: `1200`)
/// - `CALL_SAMPLE_RATE`: log every Nth buy call (default: `10000`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub call_timeout: Option<Duration>,
    pub slow_call: Duration,
    pub sample_rate: u64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            call_timeout: millis("CALL_TIMEOUT_MS"),
            slow_call: millis("SLOW_CALL_MS").unwrap_or(defaults.slow_call),
            sample_rate: lookup("CALL_SAMPLE_RATE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sample_rate),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the instrumentation policy for the buy entry point.
    pub fn call_policy(&self) -> CallPolicy {
        CallPolicy {
            slow_call: self.slow_call,
            sample_rate: self.sample_rate,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let policy = CallPolicy::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: None,
            call_timeout: None,
            slow_call: policy.slow_call,
            sample_rate: policy.sample_rate,
        }
    }
}
