//! Token metadata submitted with a branding request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One social link as entered in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
        }
    }
}

/// Listing status recorded in the assets repository. Always `active` for new requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenStatus {
    #[default]
    Active,
}

/// Where the assets repository should source prices for the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PriceSource {
    #[default]
    DataApi,
}

/// Token metadata as transmitted in the `tokenInfo` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub website: String,
    pub description: String,
    pub social: BTreeMap<String, String>,
    pub status: TokenStatus,
    pub price_source: PriceSource,
}

impl TokenInfo {
    /// Build token info from form values.
    ///
    /// Platform names are lower-cased; a later entry for the same platform wins.
    pub fn new(
        website: impl Into<String>,
        description: impl Into<String>,
        socials: &[SocialLink],
    ) -> Self {
        let social = socials
            .iter()
            .map(|link| (link.platform.to_lowercase(), link.url.clone()))
            .collect();

        Self {
            website: website.into(),
            description: description.into(),
            social,
            status: TokenStatus::Active,
            price_source: PriceSource::DataApi,
        }
    }
}

/// The token picked at the start of the flow, with whatever metadata is
/// already known about it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedToken {
    pub identifier: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub social: BTreeMap<String, String>,
}

impl SelectedToken {
    /// A token known only by identifier and display name.
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_token_info_wire_format() {
        let info = TokenInfo::new(
            "https://example.com",
            "A token for testing",
            &[SocialLink::new("Twitter", "https://x.com/tkx")],
        );

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({
                "website": "https://example.com",
                "description": "A token for testing",
                "social": { "twitter": "https://x.com/tkx" },
                "status": "active",
                "priceSource": { "type": "dataApi" }
            })
        );
    }

    #[test]
    fn test_social_keys_lowercased_last_wins() {
        let info = TokenInfo::new(
            "https://example.com",
            "A token for testing",
            &[
                SocialLink::new("Telegram", "https://t.me/old"),
                SocialLink::new("TELEGRAM", "https://t.me/new"),
            ],
        );
        assert_eq!(info.social.len(), 1);
        assert_eq!(info.social["telegram"], "https://t.me/new");
    }

    #[test]
    fn test_selected_token_defaults() {
        let token: SelectedToken =
            serde_json::from_value(json!({ "identifier": "TKX-abcd", "name": "Tokex" })).unwrap();
        assert_eq!(token, SelectedToken::new("TKX-abcd", "Tokex"));
    }
}
