//! Client configuration assembly
//!
//! [`Zoho`] carries the process-level options (environment override and the
//! host integration flags) and turns a [`ZohoConfig`] into the
//! [`ClientConfig`] a client is initialized from.

use anyhow::{Context, Result};
use log::{LevelFilter, debug, info};
use std::path::PathBuf;
use std::time::Duration;

use crate::auth::AuthToken;
use crate::config::{DataCenter, EnvSource, Environment, ProcessEnv, TokenStore, ZohoConfig};

/// User the client acts on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSignature {
    pub email: String,
}

impl UserSignature {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }
}

/// Client-level tunables, passed through from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    pub auto_refresh_fields: bool,
    pub pick_list_validation: bool,
    pub ssl_verification: bool,
    pub connection_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

impl SdkConfig {
    pub fn from_config(config: &ZohoConfig) -> Self {
        Self {
            auto_refresh_fields: config.auto_refresh_fields,
            pick_list_validation: config.pick_list_validation,
            ssl_verification: config.enable_ssl_verification,
            connection_timeout: seconds(config.connection_timeout),
            timeout: seconds(config.timeout),
        }
    }
}

/// 0 means no limit
fn seconds(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub file_path: Option<PathBuf>,
}

/// Whether a host application should also wire up the supporting
/// token-table migrations and OAuth callback routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostIntegration {
    pub runs_migrations: bool,
    pub registers_routes: bool,
}

/// Everything a client needs to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub user: UserSignature,
    pub environment: Environment,
    pub token: AuthToken,
    pub store: TokenStore,
    pub sdk_config: SdkConfig,
    pub resource_path: PathBuf,
    pub logger: LogConfig,
    pub host: HostIntegration,
}

/// Single initialization entry point of a record API client
pub trait Initialize: Sized {
    fn initialize(config: ClientConfig) -> Result<Self>;
}

/// Process-level client options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zoho {
    runs_migrations: bool,
    registers_routes: bool,
    environment: Option<Environment>,
}

impl Default for Zoho {
    fn default() -> Self {
        Self {
            runs_migrations: true,
            registers_routes: true,
            environment: None,
        }
    }
}

impl Zoho {
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    pub fn new() -> Self {
        Self::default()
    }

    /// Do not register the token-table migrations
    pub fn ignore_migrations(mut self) -> Self {
        self.runs_migrations = false;
        self
    }

    /// Do not register the OAuth callback routes
    pub fn ignore_routes(mut self) -> Self {
        self.registers_routes = false;
        self
    }

    /// Use this environment regardless of the configured data center
    pub fn use_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn runs_migrations(&self) -> bool {
        self.runs_migrations
    }

    pub fn registers_routes(&self) -> bool {
        self.registers_routes
    }

    /// The override if set, otherwise `datacenter` crossed with the sandbox flag
    pub fn data_center_environment(&self, config: &ZohoConfig) -> Result<Environment> {
        if let Some(environment) = self.environment {
            return Ok(environment);
        }

        let data_center: DataCenter = config.datacenter.parse()?;
        Ok(Environment::resolve(data_center, config.environment))
    }

    /// Assemble the client configuration. `code` overrides the configured
    /// refresh/grant token.
    pub fn client_config(
        &self,
        config: &ZohoConfig,
        code: Option<&str>,
        env: &impl EnvSource,
    ) -> Result<ClientConfig> {
        let environment = self
            .data_center_environment(config)
            .context("Failed to resolve Zoho environment")?;
        let store = TokenStore::resolve(config, env).context("Failed to resolve token store")?;
        let token = AuthToken::from_config(config, code);

        debug!("Resolved environment {} with {:?} token flow", environment, token.flow());

        Ok(ClientConfig {
            user: UserSignature::new(config.current_user_email.clone()),
            environment,
            token,
            store,
            sdk_config: SdkConfig::from_config(config),
            resource_path: config.resource_path.clone(),
            logger: LogConfig {
                level: LevelFilter::Trace,
                file_path: config.application_log_file_path.clone(),
            },
            host: HostIntegration {
                runs_migrations: self.runs_migrations,
                registers_routes: self.registers_routes,
            },
        })
    }

    /// Assemble configuration from the process environment and hand it to
    /// the client's initializer
    pub fn initialize<C: Initialize>(&self, config: &ZohoConfig, code: Option<&str>) -> Result<C> {
        let client_config = self.client_config(config, code, &ProcessEnv)?;
        info!(
            "Initializing Zoho client {} for {} in {}",
            Self::VERSION,
            client_config.user.email,
            client_config.environment
        );
        C::initialize(client_config)
    }
}
