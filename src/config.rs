//! Project configuration (brand.yaml).
//!
//! The configuration names the branding backend, the blockchain network used
//! for token lookups, and which token sources require an ownership check.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{BrandError, Result};
use crate::tokens::TokenSource;

/// The name of the configuration file.
pub const CONFIG_FILENAME: &str = "brand.yaml";

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "BRAND_API_URL";

/// Blockchain network whose public API is used for token lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Devnet,
    Testnet,
    Mainnet,
}

impl Network {
    /// Public API of the network.
    pub fn api_url(self) -> &'static str {
        match self {
            Network::Devnet => "https://devnet-api.multiversx.com",
            Network::Testnet => "https://testnet-api.multiversx.com",
            Network::Mainnet => "https://api.multiversx.com",
        }
    }
}

/// Which token sources verify the token owner against the branding owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnershipCheck {
    pub memexchange: bool,
    pub own: bool,
}

impl Default for OwnershipCheck {
    fn default() -> Self {
        Self {
            memexchange: true,
            own: false,
        }
    }
}

impl OwnershipCheck {
    pub fn applies_to(&self, source: TokenSource) -> bool {
        match source {
            TokenSource::Memexchange => self.memexchange,
            TokenSource::Own => self.own,
        }
    }
}

/// Configuration loaded from brand.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the branding backend.
    pub api_url: String,

    pub network: Network,

    /// Overrides the network's public API URL.
    pub network_api_url: Option<String>,

    /// Base URL of the MemeXchange index used by `search`.
    pub memexchange_api_url: Option<String>,

    /// Timeout for network API lookups, in milliseconds.
    pub api_timeout_ms: u64,

    pub ownership_check: OwnershipCheck,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            network: Network::default(),
            network_api_url: None,
            memexchange_api_url: None,
            api_timeout_ms: 10_000,
            ownership_check: OwnershipCheck::default(),
        }
    }
}

impl Config {
    /// Load configuration from a brand.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BrandError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `path` if given, else brand.yaml in `dir` if present, else defaults.
    /// Environment overrides are applied last.
    pub fn resolve(path: Option<&Path>, dir: &Path) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = dir.join(CONFIG_FILENAME);
                if default_path.exists() {
                    Self::load(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.with_api_url_override(std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| BrandError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Replace `api_url` when an override is given.
    pub fn with_api_url_override(mut self, api_url: Option<&str>) -> Result<Self> {
        if let Some(raw) = api_url.map(str::trim).filter(|s| !s.is_empty()) {
            parse_url(API_URL_ENV, raw)?;
            self.api_url = raw.to_string();
        }
        Ok(self)
    }

    /// The branding backend.
    pub fn api_url(&self) -> Result<Url> {
        parse_url("api_url", &self.api_url)
    }

    /// The network API to query, honouring `network_api_url`.
    pub fn network_api_url(&self) -> Result<Url> {
        match &self.network_api_url {
            Some(url) => parse_url("network_api_url", url),
            None => parse_url("network", self.network.api_url()),
        }
    }

    pub fn memexchange_api_url(&self) -> Result<Url> {
        match &self.memexchange_api_url {
            Some(url) => parse_url("memexchange_api_url", url),
            None => Err(BrandError::Config {
                message: "memexchange_api_url is not set".to_string(),
                help: Some(format!("Add memexchange_api_url to {}", CONFIG_FILENAME)),
            }),
        }
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }

    /// Starter file written by `brand init`.
    pub fn template() -> &'static str {
        r#"# Branding backend
api_url: http://localhost:3000

# devnet, testnet or mainnet
network: devnet

# Override the network's public API
# network_api_url: https://devnet-api.multiversx.com

# MemeXchange index used by `brand search`
# memexchange_api_url: https://memexchange.example.com

# Timeout for token lookups, in milliseconds
api_timeout_ms: 10000

# Verify the token owner before branding, per token source
ownership_check:
  memexchange: true
  own: false
"#
    }
}

fn parse_url(setting: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| BrandError::Config {
        message: format!("{} is not a valid URL ({}): {}", setting, raw, e),
        help: Some("Use an absolute URL such as http://localhost:3000".to_string()),
    })
}
