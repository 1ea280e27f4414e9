use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::api::ComposerConfig;
use crate::error::{ExplorerError, ExplorerResult};
use crate::layout::LayoutConfig;
use crate::source::DatasetSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> ExplorerResult<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            ExplorerError::InvalidConfig(format!("invalid host `{}`: {e}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Whole-application configuration.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub dataset: DatasetSource,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
}

impl AppConfig {
    pub fn validate(&self) -> ExplorerResult<()> {
        self.server.socket_addr()?;
        self.layout.validate()?;
        self.composer.validate()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ExplorerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ExplorerError::Serialization(format!("failed to serialize app config: {e}"))
        })
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ExplorerResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ExplorerError::InvalidConfig(format!("failed to parse app config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    5555
}
