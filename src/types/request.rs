//! The payload of a single branding submission.

use crate::error::{BrandError, Result};

use super::{LogoFile, LogoKind, TokenInfo};

/// Token metadata and both logos, bundled for one prepare/submit call.
///
/// Built once per submission and never modified afterwards.
#[derive(Debug, Clone)]
pub struct BrandingRequest {
    token_id: String,
    token_info: TokenInfo,
    logo_png: LogoFile,
    logo_svg: LogoFile,
    creator: Option<String>,
}

impl BrandingRequest {
    /// Bundle a request. Fails if a logo is in the wrong slot.
    pub fn new(
        token_id: impl Into<String>,
        token_info: TokenInfo,
        logo_png: LogoFile,
        logo_svg: LogoFile,
        creator: Option<String>,
    ) -> Result<Self> {
        if logo_png.kind() != LogoKind::Png || logo_svg.kind() != LogoKind::Svg {
            return Err(BrandError::Validation {
                reasons: vec!["Logos must be one PNG and one SVG".to_string()],
            });
        }

        Ok(Self {
            token_id: token_id.into(),
            token_info,
            logo_png,
            logo_svg,
            creator,
        })
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    pub fn token_info(&self) -> &TokenInfo {
        &self.token_info
    }

    /// The `tokenInfo` form field.
    pub fn token_info_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.token_info)
    }

    pub fn logo_png(&self) -> &LogoFile {
        &self.logo_png
    }

    pub fn logo_svg(&self) -> &LogoFile {
        &self.logo_svg
    }

    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }
}
