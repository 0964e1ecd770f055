//! Centralized configuration (environment variables + defaults).

use std::fmt;
use thiserror::Error;

pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Pool size is fixed; excess callers queue on acquire.
pub const CONNECTION_LIMIT: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required database settings: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Which [`SchoolStore`](crate::storage::SchoolStore) the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    Memory,
}

/// Connection settings for the `schools` database.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

impl DbConfig {
    /// Reads `DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` (required) and `DB_PORT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("DB_HOST");
        let user = get("DB_USER");
        let password = get("DB_PASSWORD");
        let database = get("DB_NAME");

        let missing: Vec<&'static str> = [
            ("DB_HOST", host.is_none()),
            ("DB_USER", user.is_none()),
            ("DB_PASSWORD", password.is_none()),
            ("DB_NAME", database.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(key, _)| key)
        .collect();

        let (Some(host), Some(user), Some(password), Some(database)) = (host, user, password, database)
        else {
            return Err(ConfigError::Missing(missing));
        };

        let port = match get("DB_PORT") {
            None => DEFAULT_DB_PORT,
            Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "DB_PORT",
                value: v,
            })?,
        };

        Ok(Self {
            host,
            user,
            password,
            database,
            port,
        })
    }
}

/// HTTP listen address (`BIND_ADDR`, default `0.0.0.0:3000`).
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// `STORE_BACKEND`: `mysql` (default) or `memory`.
pub fn store_backend() -> Result<StoreBackend, ConfigError> {
    match std::env::var("STORE_BACKEND") {
        Err(_) => Ok(StoreBackend::MySql),
        Ok(v) => match v.trim().to_lowercase().as_str() {
            "" | "mysql" => Ok(StoreBackend::MySql),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: v,
            }),
        },
    }
}
