//! Runtime configuration for the tasklink binary.
//!
//! The only required setting is the database location, read from the
//! `TASKLINK_DB` environment variable. A `.env` file in the working
//! directory is loaded first, so the variable can live there instead of the
//! shell environment.
//!
//! ```rust,no_run
//! use tasklink::libs::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("database: {}", config.db_path.display());
//! # Ok::<(), tasklink::libs::config::ConfigError>(())
//! ```

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable holding the database path.
pub const DB_ENV_VAR: &str = "TASKLINK_DB";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("environment variable {0} is empty")]
    EmptyVar(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    /// Loads `.env` if present, then reads [`DB_ENV_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is not an error
        let _ = dotenv::dotenv();
        Self::from_var(env::var(DB_ENV_VAR).ok())
    }

    fn from_var(value: Option<String>) -> Result<Self, ConfigError> {
        let value = value.ok_or(ConfigError::MissingVar(DB_ENV_VAR))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::EmptyVar(DB_ENV_VAR));
        }
        Ok(Config {
            db_path: PathBuf::from(value),
        })
    }

    /// Uses an explicit path when given, the environment otherwise.
    pub fn resolve(db_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        match db_override {
            Some(db_path) => Ok(Config { db_path }),
            None => Self::from_env(),
        }
    }
}
