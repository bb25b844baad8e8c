//! Finding the token to brand.
//!
//! Tokens come from one of two sources: tokens already listed on MemeXchange,
//! or fungible tokens the connected account owns. Picking a token may require
//! confirming that its on-chain owner is the branding owner.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::config::OwnershipCheck;
use crate::error::{BrandError, Result};
use crate::types::SelectedToken;

mod http;

pub use http::HttpTokenLookup;

/// Where a token was picked from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    /// Tokens whose bonding curve finished on MemeXchange
    #[default]
    Memexchange,
    /// Fungible tokens owned by the connected account
    Own,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Memexchange => write!(f, "memexchange"),
            TokenSource::Own => write!(f, "own"),
        }
    }
}

/// A search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCandidate {
    pub token: SelectedToken,
    /// Account that launched the token, when the source records it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

impl TokenCandidate {
    pub fn new(token: SelectedToken) -> Self {
        Self {
            token,
            creator: None,
        }
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn identifier(&self) -> &str {
        &self.token.identifier
    }
}

/// A fungible token held by an account, as reported by the network API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountToken {
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner: String,
}

impl AccountToken {
    fn matches(&self, needle: &str) -> bool {
        self.identifier.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}

impl From<AccountToken> for TokenCandidate {
    fn from(token: AccountToken) -> Self {
        TokenCandidate::new(SelectedToken::new(token.identifier, token.name))
    }
}

/// Remote lookups needed to pick a token.
#[async_trait]
pub trait TokenLookup: Send + Sync {
    /// Finished MemeXchange listings matching `query`.
    async fn search_memexchange(
        &self,
        query: &str,
    ) -> std::result::Result<Vec<TokenCandidate>, ApiError>;

    /// Fungible tokens held by `address`.
    async fn account_tokens(
        &self,
        address: &str,
    ) -> std::result::Result<Vec<AccountToken>, ApiError>;

    /// Current owner of a token, or `None` if the network does not know it.
    async fn token_owner(
        &self,
        identifier: &str,
    ) -> std::result::Result<Option<String>, ApiError>;

    /// The account every branded token must be owned by.
    async fn branding_owner(&self) -> std::result::Result<String, ApiError>;
}

/// Search one token source.
///
/// An empty MemeXchange query returns nothing without a request. Listing own
/// tokens needs a connected `address`; the query then narrows by identifier
/// or name, ignoring case.
pub async fn search_tokens<L: TokenLookup + ?Sized>(
    lookup: &L,
    source: TokenSource,
    query: &str,
    address: Option<&str>,
) -> Result<Vec<TokenCandidate>> {
    let query = query.trim();

    match source {
        TokenSource::Memexchange => {
            if query.is_empty() {
                return Ok(Vec::new());
            }
            lookup.search_memexchange(query).await.map_err(|e| {
                tracing::error!(error = %e, query, "Error fetching tokens");
                BrandError::network("Failed to fetch tokens", e)
            })
        }
        TokenSource::Own => {
            let address = address.ok_or_else(|| {
                BrandError::not_connected("Pass --address, or --key with a wallet key file")
            })?;
            let tokens = lookup.account_tokens(address).await.map_err(|e| {
                tracing::error!(error = %e, address, "Error fetching tokens");
                BrandError::network("Failed to fetch tokens", e)
            })?;

            let needle = query.to_lowercase();
            Ok(tokens
                .into_iter()
                .filter(|token| token.owner == address)
                .filter(|token| needle.is_empty() || token.matches(&needle))
                .map(TokenCandidate::from)
                .collect())
        }
    }
}

/// Accept a candidate as the token to brand.
///
/// When `check` applies to `source`, the token's owner must equal the
/// branding owner.
pub async fn select_token<L: TokenLookup + ?Sized>(
    lookup: &L,
    check: &OwnershipCheck,
    source: TokenSource,
    candidate: TokenCandidate,
) -> Result<SelectedToken> {
    if !check.applies_to(source) {
        return Ok(candidate.token);
    }

    let identifier = candidate.identifier().to_string();
    let owners = async {
        let owner = lookup.token_owner(&identifier).await?.ok_or_else(|| {
            ApiError::InvalidResponse(format!("token {} not found", identifier))
        })?;
        let expected = lookup.branding_owner().await?;
        Ok::<_, ApiError>((owner, expected))
    };

    let (owner, expected) = owners.await.map_err(|e| {
        tracing::error!(error = %e, token = %identifier, "Error verifying token ownership");
        BrandError::network("Failed to verify token. Please try again later.", e)
    })?;

    if owner != expected {
        tracing::warn!(token = %identifier, %owner, %expected, "Token owner mismatch");
        return Err(BrandError::OwnershipMismatch {
            token: identifier,
            owner,
            expected,
        });
    }

    Ok(candidate.token)
}

/// Social links of a listing, with empty entries dropped.
pub(crate) fn social_links(social: Option<BTreeMap<String, String>>) -> BTreeMap<String, String> {
    social
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .collect()
}
