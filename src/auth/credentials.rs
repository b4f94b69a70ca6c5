use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ZohoConfig;

/// Configured OAuth flow; anything unrecognised means grant token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthFlowType {
    AccessToken,
    RefreshToken,
    GrantToken,
}

impl From<String> for AuthFlowType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "accessToken" => AuthFlowType::AccessToken,
            "refreshToken" => AuthFlowType::RefreshToken,
            _ => AuthFlowType::GrantToken,
        }
    }
}

impl From<AuthFlowType> for String {
    fn from(value: AuthFlowType) -> Self {
        match value {
            AuthFlowType::AccessToken => "accessToken".to_string(),
            AuthFlowType::RefreshToken => "refreshToken".to_string(),
            AuthFlowType::GrantToken => "grantToken".to_string(),
        }
    }
}

/// OAuth token descriptor handed to the client at initialization
#[derive(Clone, PartialEq, Eq)]
pub enum AuthToken {
    AccessToken {
        access_token: String,
    },
    RefreshToken {
        client_id: String,
        client_secret: String,
        refresh_token: String,
        redirect_url: String,
    },
    GrantToken {
        client_id: String,
        client_secret: String,
        grant_token: String,
        redirect_url: String,
    },
}

impl AuthToken {
    /// Build the descriptor for the configured flow. `code` replaces the
    /// configured token for the refresh and grant flows.
    pub fn from_config(config: &ZohoConfig, code: Option<&str>) -> Self {
        let token = || code.unwrap_or(config.token.as_str()).to_string();

        match config.auth_flow_type {
            AuthFlowType::AccessToken => {
                info!("Using pre-issued access token");
                AuthToken::AccessToken {
                    access_token: config.token.clone(),
                }
            }
            AuthFlowType::RefreshToken => {
                info!("Using refresh token flow for client {}", config.client_id);
                AuthToken::RefreshToken {
                    client_id: config.client_id.clone(),
                    client_secret: config.client_secret.clone(),
                    refresh_token: token(),
                    redirect_url: config.redirect_uri.clone(),
                }
            }
            AuthFlowType::GrantToken => {
                info!("Using grant token flow for client {}", config.client_id);
                AuthToken::GrantToken {
                    client_id: config.client_id.clone(),
                    client_secret: config.client_secret.clone(),
                    grant_token: token(),
                    redirect_url: config.redirect_uri.clone(),
                }
            }
        }
    }

    pub fn flow(&self) -> AuthFlowType {
        match self {
            AuthToken::AccessToken { .. } => AuthFlowType::AccessToken,
            AuthToken::RefreshToken { .. } => AuthFlowType::RefreshToken,
            AuthToken::GrantToken { .. } => AuthFlowType::GrantToken,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        match self {
            AuthToken::AccessToken { access_token } => Some(access_token),
            _ => None,
        }
    }

    pub fn client_id(&self) -> Option<&str> {
        match self {
            AuthToken::AccessToken { .. } => None,
            AuthToken::RefreshToken { client_id, .. } | AuthToken::GrantToken { client_id, .. } => {
                Some(client_id)
            }
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthToken::AccessToken { .. } => f
                .debug_struct("AccessToken")
                .field("access_token", &"[redacted]")
                .finish(),
            AuthToken::RefreshToken {
                client_id,
                redirect_url,
                ..
            } => f
                .debug_struct("RefreshToken")
                .field("client_id", client_id)
                .field("client_secret", &"[redacted]")
                .field("refresh_token", &"[redacted]")
                .field("redirect_url", redirect_url)
                .finish(),
            AuthToken::GrantToken {
                client_id,
                redirect_url,
                ..
            } => f
                .debug_struct("GrantToken")
                .field("client_id", client_id)
                .field("client_secret", &"[redacted]")
                .field("grant_token", &"[redacted]")
                .field("redirect_url", redirect_url)
                .finish(),
        }
    }
}
