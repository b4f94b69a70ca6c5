//! Token persistence backend selection

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::{EnvSource, ZohoConfig};

/// Configured persistence method; anything but `db` means file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenPersistence {
    Db,
    File,
}

impl From<String> for TokenPersistence {
    fn from(value: String) -> Self {
        if value == "db" {
            TokenPersistence::Db
        } else {
            TokenPersistence::File
        }
    }
}

impl From<TokenPersistence> for String {
    fn from(value: TokenPersistence) -> Self {
        match value {
            TokenPersistence::Db => "db".to_string(),
            TokenPersistence::File => "file".to_string(),
        }
    }
}

pub const DEFAULT_DB_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_PORT: &str = "3306";
pub const DEFAULT_DB_DATABASE: &str = "forge";
pub const DEFAULT_DB_USERNAME: &str = "forge";
pub const DEFAULT_DB_PASSWORD: &str = "";

/// Database table holding OAuth tokens
#[derive(Clone, PartialEq, Eq)]
pub struct DbStore {
    pub host: String,
    pub port: u16,
    pub database_name: String,
    pub user_name: String,
    pub password: String,
    pub table_name: String,
}

impl fmt::Debug for DbStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbStore")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_name", &self.database_name)
            .field("user_name", &self.user_name)
            .field("password", &"[redacted]")
            .field("table_name", &self.table_name)
            .finish()
    }
}

/// Where the client keeps OAuth tokens between runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStore {
    File { path: PathBuf },
    Db(DbStore),
}

impl TokenStore {
    /// Resolve the store from configuration. Connection fields of the
    /// database store come from `DB_*` variables.
    pub fn resolve(config: &ZohoConfig, env: &impl EnvSource) -> Result<Self> {
        match config.token_persistence_method {
            TokenPersistence::Db => {
                let port = env.var_or("DB_PORT", DEFAULT_DB_PORT);
                let port = port
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("DB_PORT must be a port number, got '{}'", port))?;

                Ok(TokenStore::Db(DbStore {
                    host: env.var_or("DB_HOST", DEFAULT_DB_HOST),
                    port,
                    database_name: env.var_or("DB_DATABASE", DEFAULT_DB_DATABASE),
                    user_name: env.var_or("DB_USERNAME", DEFAULT_DB_USERNAME),
                    password: env.var_or("DB_PASSWORD", DEFAULT_DB_PASSWORD),
                    table_name: config.token_persistence_tablename.clone(),
                }))
            }
            TokenPersistence::File => Ok(TokenStore::File {
                path: config.token_persistence_path.clone(),
            }),
        }
    }
}
