//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
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

/// JWT configuration.
///
/// Tokens are issued by the hosting platform with the shared secret; this
/// service only validates them (and mints short-lived tokens in tests).
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for validating token signatures.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: i64,
}

fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}

/// Object storage configuration.
///
/// Plain settings only; the server binary maps these onto the storage
/// provider types in the core crate.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage backend: `local` or `s3`.
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    /// Root directory for the `local` backend.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Bucket name for the `s3` backend.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Region for the `s3` backend.
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint for the `s3` backend (R2 or any S3-compatible store).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Access key ID for the `s3` backend.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key for the `s3` backend.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Base URL photos are publicly served from, overriding the
    /// backend-derived URL.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

fn default_storage_backend() -> String {
    "local".to_string()
}

fn default_storage_root() -> String {
    "./uploads".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            root: default_storage_root(),
            bucket: None,
            region: None,
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            public_base_url: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("NIWAKI").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_access_token_expiry(), 3600);
        assert_eq!(default_storage_backend(), "local");
    }

    #[test]
    fn test_storage_settings_default() {
        let settings = StorageSettings::default();
        assert_eq!(settings.backend, "local");
        assert_eq!(settings.root, "./uploads");
        assert!(settings.bucket.is_none());
        assert!(settings.public_base_url.is_none());
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("NIWAKI__DATABASE__URL", Some("postgres://localhost/niwaki")),
                ("NIWAKI__JWT__SECRET", Some("env-secret")),
                ("NIWAKI__SERVER__PORT", Some("9090")),
                ("NIWAKI__STORAGE__BACKEND", Some("s3")),
                ("NIWAKI__STORAGE__BUCKET", Some("niwaki-photos")),
            ],
            || {
                let config = AppConfig::load().expect("config should load from env");
                assert_eq!(config.database.url, "postgres://localhost/niwaki");
                assert_eq!(config.jwt.secret, "env-secret");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.storage.backend, "s3");
                assert_eq!(config.storage.bucket.as_deref(), Some("niwaki-photos"));
            },
        );
    }
}
