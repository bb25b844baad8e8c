//! Token lookups against the network API, MemeXchange and the branding backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::api::http::{endpoint, send_json};
use crate::api::ApiError;
use crate::config::Config;
use crate::error::{BrandError, Result};
use crate::types::SelectedToken;

use super::{social_links, AccountToken, TokenCandidate, TokenLookup};

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<BondingPair>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BondingPair {
    first_token: String,
    #[serde(default)]
    creator: Option<String>,
    coin: Coin,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Coin {
    name: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    social: Option<BTreeMap<String, String>>,
}

impl From<BondingPair> for TokenCandidate {
    fn from(pair: BondingPair) -> Self {
        let token = SelectedToken {
            identifier: pair.first_token,
            name: pair.coin.name,
            image_url: pair.coin.image_url,
            description: pair.coin.description,
            website: pair.coin.website,
            social: social_links(pair.coin.social),
        };

        match pair.creator {
            Some(creator) => TokenCandidate::new(token).with_creator(creator),
            None => TokenCandidate::new(token),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenOwner {
    identifier: String,
    #[serde(default)]
    owner: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BrandingOwner {
    owner: String,
}

/// Token lookups over HTTP with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTokenLookup {
    client: reqwest::Client,
    network_api: Url,
    branding_api: Url,
    memexchange_api: Option<Url>,
}

impl HttpTokenLookup {
    pub fn new(
        client: reqwest::Client,
        network_api: Url,
        branding_api: Url,
        memexchange_api: Option<Url>,
    ) -> Self {
        Self {
            client,
            network_api,
            branding_api,
            memexchange_api,
        }
    }

    /// Build a lookup from configuration, applying `api_timeout_ms`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.api_timeout())
            .build()
            .map_err(|e| BrandError::Config {
                message: format!("Failed to build HTTP client: {}", e),
                help: None,
            })?;

        let memexchange_api = match config.memexchange_api_url {
            Some(_) => Some(config.memexchange_api_url()?),
            None => None,
        };

        Ok(Self::new(
            client,
            config.network_api_url()?,
            config.api_url()?,
            memexchange_api,
        ))
    }
}

#[async_trait]
impl TokenLookup for HttpTokenLookup {
    async fn search_memexchange(
        &self,
        query: &str,
    ) -> std::result::Result<Vec<TokenCandidate>, ApiError> {
        let base = self
            .memexchange_api
            .as_ref()
            .ok_or_else(|| ApiError::InvalidUrl("memexchange_api_url is not set".to_string()))?;

        let mut url = endpoint(base, &["api", "bonding-pairs", "search"])?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("state", "Finished");
        tracing::debug!(%url, "Searching MemeXchange");

        let page: SearchPage = send_json(self.client.get(url)).await?;
        Ok(page.items.into_iter().map(TokenCandidate::from).collect())
    }

    async fn account_tokens(
        &self,
        address: &str,
    ) -> std::result::Result<Vec<AccountToken>, ApiError> {
        let mut url = endpoint(&self.network_api, &["accounts", address, "tokens"])?;
        url.query_pairs_mut().append_pair("type", "FungibleESDT");
        tracing::debug!(%url, "Listing account tokens");

        send_json(self.client.get(url)).await
    }

    async fn token_owner(
        &self,
        identifier: &str,
    ) -> std::result::Result<Option<String>, ApiError> {
        let mut url = endpoint(&self.network_api, &["tokens"])?;
        url.query_pairs_mut().append_pair("identifiers", identifier);
        tracing::debug!(%url, "Fetching token owner");

        let tokens: Vec<TokenOwner> = send_json(self.client.get(url)).await?;
        Ok(tokens
            .into_iter()
            .find(|token| token.identifier == identifier)
            .and_then(|token| token.owner))
    }

    async fn branding_owner(&self) -> std::result::Result<String, ApiError> {
        let url = endpoint(&self.branding_api, &["api", "branding", "owner"])?;
        tracing::debug!(%url, "Fetching branding owner");

        let response: BrandingOwner = send_json(self.client.get(url)).await?;
        Ok(response.owner)
    }
}
