//! Data centers and their API environments

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regional Zoho data center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataCenter {
    #[serde(rename = "USDataCenter")]
    Us,
    #[serde(rename = "EUDataCenter")]
    Eu,
    #[serde(rename = "INDataCenter")]
    In,
    #[serde(rename = "CNDataCenter")]
    Cn,
    #[serde(rename = "AUDataCenter")]
    Au,
}

impl DataCenter {
    pub const ALL: [DataCenter; 5] = [
        DataCenter::Us,
        DataCenter::Eu,
        DataCenter::In,
        DataCenter::Cn,
        DataCenter::Au,
    ];

    /// Name used in application configuration
    pub fn config_name(&self) -> &'static str {
        match self {
            DataCenter::Us => "USDataCenter",
            DataCenter::Eu => "EUDataCenter",
            DataCenter::In => "INDataCenter",
            DataCenter::Cn => "CNDataCenter",
            DataCenter::Au => "AUDataCenter",
        }
    }

    /// Top-level domain suffix shared by the API and accounts hosts
    fn domain_suffix(&self) -> &'static str {
        match self {
            DataCenter::Us => "com",
            DataCenter::Eu => "eu",
            DataCenter::In => "in",
            DataCenter::Cn => "com.cn",
            DataCenter::Au => "com.au",
        }
    }

    pub fn accounts_url(&self) -> String {
        format!("https://accounts.zoho.{}", self.domain_suffix())
    }

    pub fn production(self) -> Environment {
        Environment::new(self, EnvironmentKind::Production)
    }

    pub fn sandbox(self) -> Environment {
        Environment::new(self, EnvironmentKind::Sandbox)
    }
}

impl FromStr for DataCenter {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> anyhow::Result<Self> {
        DataCenter::ALL
            .into_iter()
            .find(|dc| dc.config_name() == name)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown data center '{}', expected one of USDataCenter, EUDataCenter, INDataCenter, CNDataCenter, AUDataCenter",
                    name
                )
            })
    }
}

impl fmt::Display for DataCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentKind {
    Production,
    Sandbox,
}

/// A data center paired with its production or sandbox API host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
    pub data_center: DataCenter,
    pub kind: EnvironmentKind,
}

impl Environment {
    pub fn new(data_center: DataCenter, kind: EnvironmentKind) -> Self {
        Self { data_center, kind }
    }

    /// Pick the sandbox or production variant from a sandbox flag
    pub fn resolve(data_center: DataCenter, sandbox: bool) -> Self {
        if sandbox {
            data_center.sandbox()
        } else {
            data_center.production()
        }
    }

    pub fn is_sandbox(&self) -> bool {
        self.kind == EnvironmentKind::Sandbox
    }

    pub fn api_domain(&self) -> String {
        let host = match self.kind {
            EnvironmentKind::Production => "www",
            EnvironmentKind::Sandbox => "sandbox",
        };
        format!("https://{}.zohoapis.{}", host, self.data_center.domain_suffix())
    }

    pub fn accounts_url(&self) -> String {
        self.data_center.accounts_url()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            EnvironmentKind::Production => "production",
            EnvironmentKind::Sandbox => "sandbox",
        };
        write!(f, "{} ({})", self.data_center, kind)
    }
}
