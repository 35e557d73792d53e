//! Service configuration read from the environment.
//!
//! | Variable        | Default   |
//! |-----------------|-----------|
//! | `HOST`          | `0.0.0.0` |
//! | `PORT`          | `8000`    |
//! | `DATABASE_URL`  | unset     |
//! | `DATABASE_NAME` | unset     |
//! | `TODO_STORE`    | `mongodb` |

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),

    #[error("unknown TODO_STORE {0:?} (expected \"mongodb\" or \"memory\")")]
    UnknownStore(String),
}

/// Which store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub store: StoreBackend,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8000,
        };
        let store = match var("TODO_STORE").as_deref().map(str::trim) {
            None | Some("mongodb") => StoreBackend::MongoDb,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
            store,
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
