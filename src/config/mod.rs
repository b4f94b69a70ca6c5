//! Application configuration
//!
//! Settings are read from a TOML file or from `ZOHO_*` environment
//! variables. Key names follow the published configuration keys
//! (`resourcePath`, `auth_flow_type`, `enableSSLVerification`, ...), so an
//! existing configuration can be pasted in unchanged.

pub mod environment;
pub mod token_store;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::AuthFlowType;
pub use environment::{DataCenter, Environment, EnvironmentKind};
pub use token_store::{DbStore, TokenPersistence, TokenStore};

/// Source of environment variables
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;

    fn var_or(&self, key: &str, default: &str) -> String {
        self.var(key).unwrap_or_else(|| default.to_string())
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZohoConfig {
    #[serde(rename = "resourcePath")]
    pub resource_path: PathBuf,
    pub current_user_email: String,
    pub application_log_file_path: Option<PathBuf>,
    pub token_persistence_method: TokenPersistence,
    pub token_persistence_path: PathBuf,
    pub token_persistence_tablename: String,
    pub auth_flow_type: AuthFlowType,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Access, refresh or grant token depending on `auth_flow_type`
    pub token: String,
    pub datacenter: String,
    /// Sandbox when true
    pub environment: bool,
    #[serde(rename = "autoRefreshFields")]
    pub auto_refresh_fields: bool,
    #[serde(rename = "pickListValidation")]
    pub pick_list_validation: bool,
    #[serde(rename = "enableSSLVerification")]
    pub enable_ssl_verification: bool,
    /// Seconds, 0 for no limit
    #[serde(rename = "connectionTimeout")]
    pub connection_timeout: u64,
    /// Seconds, 0 for no limit
    pub timeout: u64,
}

impl Default for ZohoConfig {
    fn default() -> Self {
        Self {
            resource_path: PathBuf::from("."),
            current_user_email: String::new(),
            application_log_file_path: None,
            token_persistence_method: TokenPersistence::File,
            token_persistence_path: PathBuf::from("zoho_oauth_tokens.txt"),
            token_persistence_tablename: "oauthtoken".to_string(),
            auth_flow_type: AuthFlowType::GrantToken,
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            token: String::new(),
            datacenter: DataCenter::Us.config_name().to_string(),
            environment: false,
            auto_refresh_fields: false,
            pick_list_validation: false,
            enable_ssl_verification: true,
            connection_timeout: 0,
            timeout: 0,
        }
    }
}

impl fmt::Debug for ZohoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZohoConfig")
            .field("resource_path", &self.resource_path)
            .field("current_user_email", &self.current_user_email)
            .field("application_log_file_path", &self.application_log_file_path)
            .field("token_persistence_method", &self.token_persistence_method)
            .field("token_persistence_path", &self.token_persistence_path)
            .field("token_persistence_tablename", &self.token_persistence_tablename)
            .field("auth_flow_type", &self.auth_flow_type)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("redirect_uri", &self.redirect_uri)
            .field("token", &"[redacted]")
            .field("datacenter", &self.datacenter)
            .field("environment", &self.environment)
            .field("auto_refresh_fields", &self.auto_refresh_fields)
            .field("pick_list_validation", &self.pick_list_validation)
            .field("enable_ssl_verification", &self.enable_ssl_verification)
            .field("connection_timeout", &self.connection_timeout)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ZohoConfig {
    /// Per-user config file location
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("zoho-crm");
        Ok(config_dir.join("config.toml"))
    }

    /// Load the per-user config file, or fall back to environment variables
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("Config file {:?} not found, reading environment variables", config_path);
            Self::from_env(&ProcessEnv)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build from `ZOHO_*` variables; anything unset keeps its default
    pub fn from_env(env: &impl EnvSource) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = env.var("ZOHO_RESOURCE_PATH") {
            config.resource_path = PathBuf::from(v);
        }
        if let Some(v) = env.var("ZOHO_CURRENT_USER_EMAIL") {
            config.current_user_email = v;
        }
        if let Some(v) = env.var("ZOHO_APPLICATION_LOG_FILE_PATH") {
            config.application_log_file_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env.var("ZOHO_TOKEN_PERSISTENCE_METHOD") {
            config.token_persistence_method = TokenPersistence::from(v);
        }
        if let Some(v) = env.var("ZOHO_TOKEN_PERSISTENCE_PATH") {
            config.token_persistence_path = PathBuf::from(v);
        }
        if let Some(v) = env.var("ZOHO_TOKEN_PERSISTENCE_TABLENAME") {
            config.token_persistence_tablename = v;
        }
        if let Some(v) = env.var("ZOHO_AUTH_FLOW_TYPE") {
            config.auth_flow_type = AuthFlowType::from(v);
        }
        if let Some(v) = env.var("ZOHO_CLIENT_ID") {
            config.client_id = v;
        }
        if let Some(v) = env.var("ZOHO_CLIENT_SECRET") {
            config.client_secret = v;
        }
        if let Some(v) = env.var("ZOHO_REDIRECT_URI") {
            config.redirect_uri = v;
        }
        if let Some(v) = env.var("ZOHO_TOKEN") {
            config.token = v;
        }
        if let Some(v) = env.var("ZOHO_DATACENTER") {
            config.datacenter = v;
        }
        if let Some(v) = env.var("ZOHO_SANDBOX") {
            config.environment = parse_bool("ZOHO_SANDBOX", &v)?;
        }
        if let Some(v) = env.var("ZOHO_AUTO_REFRESH_FIELDS") {
            config.auto_refresh_fields = parse_bool("ZOHO_AUTO_REFRESH_FIELDS", &v)?;
        }
        if let Some(v) = env.var("ZOHO_PICKLIST_VALIDATION") {
            config.pick_list_validation = parse_bool("ZOHO_PICKLIST_VALIDATION", &v)?;
        }
        if let Some(v) = env.var("ZOHO_ENABLE_SSL_VERIFICATION") {
            config.enable_ssl_verification = parse_bool("ZOHO_ENABLE_SSL_VERIFICATION", &v)?;
        }
        if let Some(v) = env.var("ZOHO_CONNECTION_TIMEOUT") {
            config.connection_timeout = parse_seconds("ZOHO_CONNECTION_TIMEOUT", &v)?;
        }
        if let Some(v) = env.var("ZOHO_TIMEOUT") {
            config.timeout = parse_seconds("ZOHO_TIMEOUT", &v)?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", key, other),
    }
}

fn parse_seconds(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a whole number of seconds, got '{}'", key, value))
}
