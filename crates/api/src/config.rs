//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: the service's well-known port)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `"json"` for JSON log lines (default: `"text"`)
/// - `DATABASE_URL` — Postgres connection string; unset means the
///   in-memory store
/// - `CATALOG_URL` / `INVENTORY_URL` — peer base URLs, including the
///   `/api/v1/...` prefix
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
    pub database_url: Option<String>,
    pub catalog_url: String,
    pub inventory_url: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults. Each service passes its own well-known port.
    pub fn from_env(default_port: u16) -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            catalog_url: std::env::var("CATALOG_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/v1/catalog".to_string()),
            inventory_url: std::env::var("INVENTORY_URL")
                .unwrap_or_else(|_| "http://localhost:8081/api/v1/inventory".to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true when log lines should be emitted as JSON.
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            database_url: None,
            catalog_url: "http://localhost:8080/api/v1/catalog".to_string(),
            inventory_url: "http://localhost:8081/api/v1/inventory".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert!(config.database_url.is_none());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8082,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8082");
    }

    #[test]
    fn test_json_logs_is_case_insensitive() {
        let config = Config {
            log_format: "JSON".to_string(),
            ..Config::default()
        };
        assert!(config.json_logs());
    }
}
