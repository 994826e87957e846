//! Configuration management for the bookshop server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::env;

/// Environment variable holding the database user
pub const DB_USER_VAR: &str = "BOOKSHOP_DBUSER";
/// Environment variable holding the database password
pub const DB_PASS_VAR: &str = "BOOKSHOP_DBPASS";
/// Environment variable holding the database name
pub const DB_NAME_VAR: &str = "BOOKSHOP_DBNAME";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on reading a request and writing its response
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables.
    ///
    /// Fails when any of the database credentials is missing.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // BOOKSHOP__SERVER__PORT=9000 and friends
            .add_source(
                Environment::with_prefix("BOOKSHOP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.user", non_blank_var(DB_USER_VAR))?
            .set_override_option("database.password", non_blank_var(DB_PASS_VAR))?
            .set_override_option("database.name", non_blank_var(DB_NAME_VAR))?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.database.check_credentials()?;
        Ok(config)
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl DatabaseConfig {
    /// Reject configurations without a user, password or database name.
    pub fn check_credentials(&self) -> Result<(), ConfigError> {
        let required = [
            (DB_USER_VAR, &self.user),
            (DB_PASS_VAR, &self.password),
            (DB_NAME_VAR, &self.name),
        ];
        for (var, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Message(format!("missing env variable {}", var)));
            }
        }
        Ok(())
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 15,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: String::new(),
            password: String::new(),
            name: String::new(),
            max_connections: 10,
            min_connections: 1,
            run_migrations: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
