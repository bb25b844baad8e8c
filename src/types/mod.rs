//! Core domain types for brand.
//!
//! This module contains the values that flow through a branding submission:
//! - `LogoFile` / `LogoSlot` - candidate logo bytes and their validation state
//! - `TokenInfo` - metadata sent alongside the logos
//! - `SelectedToken` - the token chosen at the start of the flow
//! - `BrandingRequest` - the immutable payload of one submission

mod logo;
mod request;
mod token;

pub use logo::{LogoFile, LogoKind, LogoSlot};
pub use request::BrandingRequest;
pub use token::{PriceSource, SelectedToken, SocialLink, TokenInfo, TokenStatus};
