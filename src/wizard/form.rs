//! The metadata form filled in for the selected token.

use url::Url;

use crate::error::{BrandError, Result};
use crate::types::{
    BrandingRequest, LogoFile, LogoKind, LogoSlot, SelectedToken, SocialLink, TokenInfo,
};

pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Form values plus one slot per logo.
#[derive(Debug, Clone, Default)]
pub struct BrandingForm {
    pub website: String,
    pub description: String,
    pub socials: Vec<SocialLink>,
    png: Option<LogoSlot>,
    svg: Option<LogoSlot>,
}

impl BrandingForm {
    pub fn new(website: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            website: website.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Start from what is already known about the token.
    pub fn prefill(token: &SelectedToken) -> Self {
        Self {
            website: token.website.clone().unwrap_or_default(),
            description: token.description.clone().unwrap_or_default(),
            socials: token
                .social
                .iter()
                .map(|(platform, url)| SocialLink::new(platform.as_str(), url.as_str()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_social(mut self, platform: impl Into<String>, url: impl Into<String>) -> Self {
        self.socials.push(SocialLink::new(platform, url));
        self
    }

    /// Validate `file` and put it in the slot for its kind, replacing any
    /// previous selection.
    pub fn set_logo(&mut self, file: LogoFile) -> &LogoSlot {
        let slot = match file.kind() {
            LogoKind::Png => &mut self.png,
            LogoKind::Svg => &mut self.svg,
        };
        slot.insert(LogoSlot::select(file))
    }

    pub fn clear_logo(&mut self, kind: LogoKind) {
        match kind {
            LogoKind::Png => self.png = None,
            LogoKind::Svg => self.svg = None,
        }
    }

    pub fn png(&self) -> Option<&LogoSlot> {
        self.png.as_ref()
    }

    pub fn svg(&self) -> Option<&LogoSlot> {
        self.svg.as_ref()
    }

    /// Every reason the form cannot be submitted; empty when it can.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !is_absolute_url(&self.website) {
            problems.push("Website must be a valid URL".to_string());
        }

        let chars = self.description.chars().count();
        if chars < MIN_DESCRIPTION_CHARS {
            problems.push(format!(
                "Description must contain at least {} characters",
                MIN_DESCRIPTION_CHARS
            ));
        } else if chars > MAX_DESCRIPTION_CHARS {
            problems.push(format!(
                "Description must contain at most {} characters",
                MAX_DESCRIPTION_CHARS
            ));
        }

        for link in &self.socials {
            if !is_absolute_url(&link.url) {
                problems.push(format!("Social link for {} must be a valid URL", link.platform));
            }
        }

        match (&self.png, &self.svg) {
            (Some(png), Some(svg)) => {
                for slot in [png, svg] {
                    let label = slot.file().kind().label();
                    problems.extend(
                        slot.validation()
                            .iter()
                            .map(|d| format!("{} logo: {}", label, d.message)),
                    );
                }
            }
            _ => problems.push("Both PNG and SVG logos are required".to_string()),
        }

        problems
    }

    pub fn is_ready(&self) -> bool {
        self.problems().is_empty()
    }

    /// Bundle the form into a request, or explain why it cannot be sent.
    pub fn to_request(&self, token_id: &str, creator: Option<String>) -> Result<BrandingRequest> {
        let problems = self.problems();
        let (Some(png), Some(svg)) = (&self.png, &self.svg) else {
            return Err(BrandError::Validation { reasons: problems });
        };
        if !problems.is_empty() {
            return Err(BrandError::Validation { reasons: problems });
        }

        BrandingRequest::new(
            token_id,
            TokenInfo::new(self.website.trim(), self.description.as_str(), &self.socials),
            png.file().clone(),
            svg.file().clone(),
            creator,
        )
    }
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value.trim()).is_ok()
}
