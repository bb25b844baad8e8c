//! Wizard states and the values that only exist in some of them.

use std::fmt;

use crate::types::SelectedToken;

/// Commit reference returned by the prepare step. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitHash(String);

impl CommitHash {
    /// `None` for an empty or blank reference.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.trim().is_empty()).then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pull request opened for a branding request. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRequestUrl(String);

impl PullRequestUrl {
    /// `None` for an empty or blank URL.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.trim().is_empty()).then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PullRequestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the branding flow currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WizardState {
    #[default]
    SelectingToken,
    EditingForm {
        token: SelectedToken,
    },
    AwaitingSignature {
        token: SelectedToken,
        commit_hash: CommitHash,
    },
    Completed {
        pull_request_url: PullRequestUrl,
    },
}

impl WizardState {
    /// Short description used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            WizardState::SelectingToken => "selecting a token",
            WizardState::EditingForm { .. } => "editing the form",
            WizardState::AwaitingSignature { .. } => "awaiting a signature",
            WizardState::Completed { .. } => "completed",
        }
    }

    /// The token being branded, until the flow completes.
    pub fn token(&self) -> Option<&SelectedToken> {
        match self {
            WizardState::EditingForm { token } | WizardState::AwaitingSignature { token, .. } => {
                Some(token)
            }
            WizardState::SelectingToken | WizardState::Completed { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, WizardState::Completed { .. })
    }
}
