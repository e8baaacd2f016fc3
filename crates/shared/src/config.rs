//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `BRANDTRACK__*` variables
    /// (e.g. `BRANDTRACK__DATABASE__URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("BRANDTRACK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("BRANDTRACK__DATABASE__URL", Some("postgres://localhost/brandtrack_test")),
                ("BRANDTRACK__SERVER__PORT", Some("9090")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");

                assert_eq!(config.database.url, "postgres://localhost/brandtrack_test");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.min_connections, 1);
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars_unset(["BRANDTRACK__DATABASE__URL"], || {
            assert!(AppConfig::load().is_err());
        });
    }

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }
}
