//! Process configuration.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults (serde `default` attributes below)
//! 2. `config.toml` in the working directory, or the file given with `--config`
//! 3. `.env` (loaded into the environment with `dotenvy`)
//! 4. Environment variables `RENTALS__<SECTION>__<KEY>`, e.g. `RENTALS__DATABASE__HOSTS`

use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use validator::{Validate, ValidationError};

const ENV_PREFIX: &str = "RENTALS";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub database: DatabaseConfig,

    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,

    /// Allowed CORS origins. Empty means no CORS headers are emitted.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_request_body_size")]
    pub max_request_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_request_body_size: default_max_request_body_size(),
        }
    }
}

#[derive(Clone, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// Comma-separated host list; one is picked at random per connection pool.
    #[validate(custom(function = "validate_hosts"))]
    pub hosts: String,

    #[serde(default = "default_db_port")]
    #[validate(range(min = 1))]
    pub port: u16,

    #[validate(length(min = 1))]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1))]
    pub max_connections: u32,

    #[serde(default = "default_connection_lifetime_seconds")]
    pub idle_timeout_seconds: u64,

    #[serde(default = "default_connection_lifetime_seconds")]
    pub max_lifetime_seconds: u64,

    /// Upper bound for every query and ping.
    #[serde(default = "default_query_timeout_seconds")]
    #[validate(range(min = 1))]
    pub query_timeout_seconds: u64,

    #[serde(default = "default_health_check_interval_seconds")]
    #[validate(range(min = 1))]
    pub health_check_interval_seconds: u64,

    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn host_list(&self) -> Vec<&str> {
        self.hosts
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .collect()
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_seconds)
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_seconds)
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("hosts", &self.hosts)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("idle_timeout_seconds", &self.idle_timeout_seconds)
            .field("max_lifetime_seconds", &self.max_lifetime_seconds)
            .field("query_timeout_seconds", &self.query_timeout_seconds)
            .field(
                "health_check_interval_seconds",
                &self.health_check_interval_seconds,
            )
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Default level for this crate's targets; `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,

    #[serde(default)]
    pub file_enabled: bool,

    #[serde(default = "default_log_directory")]
    pub file_directory: String,

    #[serde(default = "default_log_prefix")]
    pub file_prefix: String,

    #[serde(default = "default_log_rotation")]
    #[validate(custom(function = "validate_rotation"))]
    pub file_rotation: String,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    #[serde(default = "default_environment")]
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file_enabled: false,
            file_directory: default_log_directory(),
            file_prefix: default_log_prefix(),
            file_rotation: default_log_rotation(),
            service_name: default_service_name(),
            deployment_environment: default_environment(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml` (if present), `.env` and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Same as [`Config::load`], reading `path` instead of `config.toml`.
    /// A missing explicit path is an error; a missing `config.toml` is not.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name("config").required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    /// Local development runs log the effective configuration at startup.
    pub fn is_local(&self) -> bool {
        matches!(
            self.logging.deployment_environment.to_ascii_lowercase().as_str(),
            "local" | "loc"
        )
    }
}

fn validate_hosts(hosts: &str) -> Result<(), ValidationError> {
    if hosts.split(',').any(|h| !h.trim().is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::new("empty_host_list"))
    }
}

fn validate_rotation(rotation: &str) -> Result<(), ValidationError> {
    match rotation {
        "daily" | "hourly" | "minutely" | "never" => Ok(()),
        _ => Err(ValidationError::new("unknown_rotation")),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_request_body_size() -> usize {
    1024 * 1024
}

fn default_db_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_lifetime_seconds() -> u64 {
    30
}

fn default_query_timeout_seconds() -> u64 {
    3
}

fn default_health_check_interval_seconds() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "rentals-server".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

fn default_service_name() -> String {
    "rentals-server".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            hosts: "db-a, db-b".to_string(),
            port: 5432,
            username: "rentals".to_string(),
            password: "secret".to_string(),
            name: "rentals".to_string(),
            max_connections: 10,
            idle_timeout_seconds: 30,
            max_lifetime_seconds: 30,
            query_timeout_seconds: 3,
            health_check_interval_seconds: 5,
            run_migrations: false,
        },
        logging: LoggingConfig::default(),
    }
}
