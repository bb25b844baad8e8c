use miette::Diagnostic;
use thiserror::Error;

use crate::api::ApiError;

/// Main error type for brand operations
#[derive(Error, Diagnostic, Debug)]
pub enum BrandError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(brand::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(brand::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(brand::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// One or more reasons the submission cannot be sent. Never reaches the network.
    #[error("Validation failed: {}", reasons.join("; "))]
    #[diagnostic(
        code(brand::validate),
        help("Fix the listed problems and submit again")
    )]
    Validation { reasons: Vec<String> },

    #[error("{summary}")]
    #[diagnostic(code(brand::network), help("Check your connection and try again"))]
    Network {
        summary: String,
        #[source]
        source: ApiError,
    },

    #[error("Invalid token ownership for {token}. Please report this to admin.")]
    #[diagnostic(code(brand::ownership))]
    OwnershipMismatch {
        token: String,
        owner: String,
        expected: String,
    },

    #[error("No wallet connected")]
    #[diagnostic(code(brand::wallet))]
    NotConnected {
        #[help]
        help: String,
    },

    #[error("Failed to sign message: {message}")]
    #[diagnostic(code(brand::signature))]
    Signature { message: String },

    #[error("Cannot {action} while {state}")]
    #[diagnostic(code(brand::wizard))]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

impl BrandError {
    /// Wrap an API failure with the message shown to the user.
    pub fn network(summary: impl Into<String>, source: ApiError) -> Self {
        BrandError::Network {
            summary: summary.into(),
            source,
        }
    }

    /// No wallet or address was given; `help` names the flags that provide one.
    pub fn not_connected(help: impl Into<String>) -> Self {
        BrandError::NotConnected { help: help.into() }
    }

    /// Whether repeating the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BrandError::Network { .. } | BrandError::Signature { .. })
    }
}

pub type Result<T> = std::result::Result<T, BrandError>;
