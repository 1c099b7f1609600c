use std::env;
use std::path::Path;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::File;
use serde::Deserialize;

/// Application configuration for sso-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
}

/// Deployment environment; selects the log output format and level.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

/// SQLite Account Directory configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// gRPC server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
    /// Upper bound on a single request, in milliseconds.
    pub timeout_ms: u64,
}

/// Issued token configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_seconds: i64,
}

/// Longest token lifetime accepted: one year.
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (SSO__DATABASE__URL, SSO__SERVER__GRPC_PORT, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns `ConfigError` if a required field is missing, a value has the
    /// wrong type, or the token TTL or request timeout is not positive.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "local".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                config::Environment::with_prefix("SSO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a single file, without environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token.ttl_seconds)
    }

    /// Deadline applied to each gRPC call.
    pub fn operation_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.server.timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.token.ttl_seconds <= 0 {
            return Err(ConfigError::Message(
                "token.ttl_seconds must be positive".to_string(),
            ));
        }
        if self.token.ttl_seconds > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Message(format!(
                "token.ttl_seconds must not exceed {}",
                MAX_TOKEN_TTL_SECONDS
            )));
        }
        if self.server.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "server.timeout_ms must be positive".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
