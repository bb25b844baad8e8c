//! brand - Token logo validation and branding submission
//!
//! Checks token logos against the listing requirements and walks a token
//! through the branding flow: selection, metadata, submission to the
//! branding backend and the owner's signature.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod tokens;
pub mod types;
pub mod validation;
pub mod wallet;
pub mod wizard;

pub use api::{ApiError, BrandingApi, HttpBrandingApi};
pub use config::{Config, Network, OwnershipCheck};
pub use error::{BrandError, Result};
pub use session::{login, resume_route, Route, Session};
pub use tokens::{
    search_tokens, select_token, HttpTokenLookup, TokenCandidate, TokenLookup, TokenSource,
};
pub use types::{
    BrandingRequest, LogoFile, LogoKind, LogoSlot, SelectedToken, SocialLink, TokenInfo,
};
pub use validation::{validate_logo, Diagnostic, ValidationResult};
pub use wallet::{LocalWallet, Wallet};
pub use wizard::{BrandingForm, BrandingMode, CommitHash, PullRequestUrl, Wizard, WizardState};
