//! Application configuration loaded from environment variables.

use composite::{CompositeConfig, DeleteMode};

/// Gateway configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` / `PORT` — bind address (default: `"0.0.0.0"` / `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `PRODUCT_SERVICE_URL`, `RECOMMENDATION_SERVICE_URL`,
///   `REVIEW_SERVICE_URL` — backend base URLs (defaults: localhost ports
///   7001–7003)
/// - `DEFAULT_PAGE_NUMBER` / `DEFAULT_PAGE_SIZE` — pagination defaults
///   (`0` / `10`)
/// - `DELETE_MODE` — `cascade` or `events` (default: `cascade`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub product_service_url: String,
    pub recommendation_service_url: String,
    pub review_service_url: String,
    pub default_page_number: u32,
    pub default_page_size: u32,
    pub delete_mode: DeleteMode,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_or("PORT", 3000),
            log_level: env_or("RUST_LOG", "info"),
            product_service_url: env_or("PRODUCT_SERVICE_URL", "http://localhost:7001"),
            recommendation_service_url: env_or(
                "RECOMMENDATION_SERVICE_URL",
                "http://localhost:7002",
            ),
            review_service_url: env_or("REVIEW_SERVICE_URL", "http://localhost:7003"),
            default_page_number: parse_or("DEFAULT_PAGE_NUMBER", 0),
            default_page_size: parse_or("DEFAULT_PAGE_SIZE", 10),
            delete_mode: parse_or("DELETE_MODE", DeleteMode::Cascade),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the orchestrator configuration slice.
    pub fn composite(&self) -> CompositeConfig {
        CompositeConfig {
            default_page_number: self.default_page_number,
            default_page_size: self.default_page_size,
            delete_mode: self.delete_mode,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            product_service_url: "http://localhost:7001".to_string(),
            recommendation_service_url: "http://localhost:7002".to_string(),
            review_service_url: "http://localhost:7003".to_string(),
            default_page_number: 0,
            default_page_size: 10,
            delete_mode: DeleteMode::Cascade,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
