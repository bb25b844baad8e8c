//! The branding wizard.
//!
//! A wizard walks one token through selection, the metadata form, the
//! backend submission and, for new listings, the owner's signature:
//!
//! ```text
//! SelectingToken -> EditingForm -> AwaitingSignature -> Completed
//!                         \_____________ (edit) _____________/
//! ```
//!
//! Every transition checks the current state first. A failed transition
//! leaves the state as it was and never retries.

use serde::{Deserialize, Serialize};

use crate::api::{ApiError, BrandingApi, CompletePayload};
use crate::error::{BrandError, Result};
use crate::types::SelectedToken;
use crate::wallet::Wallet;

mod form;
mod state;

pub use form::{BrandingForm, MAX_DESCRIPTION_CHARS, MIN_DESCRIPTION_CHARS};
pub use state::{CommitHash, PullRequestUrl, WizardState};

const SUBMIT_FAILED: &str = "Failed to submit token branding";
const COMPLETE_FAILED: &str = "Failed to complete token branding";

/// How the submission reaches the assets repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BrandingMode {
    /// Prepare a commit, sign it, then complete it
    #[default]
    Create,
    /// Submit in one call without a signature
    Edit,
}

/// Drives one token through the branding flow.
///
/// Backend calls borrow the wizard mutably until they resolve, so no second
/// submission can start while one is outstanding.
pub struct Wizard<A> {
    api: A,
    mode: BrandingMode,
    state: WizardState,
}

impl<A: BrandingApi> Wizard<A> {
    pub fn new(api: A, mode: BrandingMode) -> Self {
        Self {
            api,
            mode,
            state: WizardState::SelectingToken,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn mode(&self) -> BrandingMode {
        self.mode
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Whether `submit` would reach the backend with this form.
    pub fn can_submit(&self, form: &BrandingForm) -> bool {
        matches!(self.state, WizardState::EditingForm { .. }) && form.is_ready()
    }

    pub fn select_token(&mut self, token: SelectedToken) -> Result<()> {
        match self.state {
            WizardState::SelectingToken => {
                tracing::debug!(token = %token.identifier, "Token selected");
                self.state = WizardState::EditingForm { token };
                Ok(())
            }
            _ => Err(self.invalid("select a token")),
        }
    }

    /// Leave the form and pick another token.
    pub fn back(&mut self) -> Result<()> {
        match self.state {
            WizardState::EditingForm { .. } => {
                self.state = WizardState::SelectingToken;
                Ok(())
            }
            _ => Err(self.invalid("go back")),
        }
    }

    /// Send the form to the backend.
    ///
    /// In create mode the backend prepares a commit to be signed; in edit
    /// mode it opens the pull request directly. A form with problems fails
    /// with [`BrandError::Validation`] before any request is made.
    pub async fn submit(
        &mut self,
        form: &BrandingForm,
        creator: Option<&str>,
    ) -> Result<&WizardState> {
        let token = match &self.state {
            WizardState::EditingForm { token } => token.clone(),
            _ => return Err(self.invalid("submit")),
        };

        let request = form.to_request(&token.identifier, creator.map(str::to_string))?;

        let next = match self.mode {
            BrandingMode::Create => {
                let response = self
                    .api
                    .prepare(&request)
                    .await
                    .map_err(|e| failed(SUBMIT_FAILED, &token.identifier, e))?;
                let commit_hash = CommitHash::new(response.commit_hash).ok_or_else(|| {
                    failed(SUBMIT_FAILED, &token.identifier, empty("commitHash"))
                })?;

                tracing::info!(token = %token.identifier, commit = %commit_hash, "Branding prepared");
                WizardState::AwaitingSignature { token, commit_hash }
            }
            BrandingMode::Edit => {
                let response = self
                    .api
                    .submit(&request)
                    .await
                    .map_err(|e| failed(SUBMIT_FAILED, &token.identifier, e))?;
                let pull_request_url =
                    PullRequestUrl::new(response.pull_request_url).ok_or_else(|| {
                        failed(SUBMIT_FAILED, &token.identifier, empty("pullRequestUrl"))
                    })?;

                tracing::info!(token = %token.identifier, url = %pull_request_url, "Pull request created");
                WizardState::Completed { pull_request_url }
            }
        };

        self.state = next;
        Ok(&self.state)
    }

    /// Sign the prepared commit and complete the branding.
    pub async fn sign_and_complete<W: Wallet + ?Sized>(
        &mut self,
        wallet: &W,
    ) -> Result<PullRequestUrl> {
        let (token_id, commit_hash) = match &self.state {
            WizardState::AwaitingSignature { token, commit_hash } => {
                (token.identifier.clone(), commit_hash.clone())
            }
            _ => return Err(self.invalid("sign")),
        };

        let signature = wallet.sign_message(commit_hash.as_str()).await?;
        let payload = CompletePayload {
            signature: hex::encode(signature),
            commit_hash: commit_hash.to_string(),
        };

        let response = self
            .api
            .complete(&token_id, &payload)
            .await
            .map_err(|e| failed(COMPLETE_FAILED, &token_id, e))?;
        let pull_request_url = PullRequestUrl::new(response.pull_request_url)
            .ok_or_else(|| failed(COMPLETE_FAILED, &token_id, empty("pullRequestUrl")))?;

        tracing::info!(token = %token_id, url = %pull_request_url, "Pull request created");
        self.state = WizardState::Completed {
            pull_request_url: pull_request_url.clone(),
        };
        Ok(pull_request_url)
    }

    /// Start over after a completed flow.
    pub fn reset(&mut self) -> Result<()> {
        match self.state {
            WizardState::Completed { .. } => {
                self.state = WizardState::SelectingToken;
                Ok(())
            }
            _ => Err(self.invalid("reset")),
        }
    }

    fn invalid(&self, action: &'static str) -> BrandError {
        BrandError::InvalidTransition {
            action,
            state: self.state.describe(),
        }
    }
}

fn failed(summary: &str, token: &str, error: ApiError) -> BrandError {
    tracing::error!(token, error = %error, "{}", summary);
    BrandError::network(summary, error)
}

fn empty(field: &str) -> ApiError {
    ApiError::InvalidResponse(format!("empty {}", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CompleteResponse, PrepareResponse, SubmitResponse};
    use crate::types::{BrandingRequest, LogoFile, LogoKind};
    use async_trait::async_trait;
    use image::{ImageFormat, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        commit_hash: String,
        pull_request_url: String,
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn ok() -> Self {
            Self {
                commit_hash: "abc123".into(),
                pull_request_url: "https://github.com/org/assets/pull/1".into(),
                ..Self::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }

        fn record(&self, call: String) -> std::result::Result<(), ApiError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                return Err(ApiError::Status {
                    status: 500,
                    body: "boom".into(),
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BrandingApi for FakeApi {
        async fn prepare(
            &self,
            request: &BrandingRequest,
        ) -> std::result::Result<PrepareResponse, ApiError> {
            self.record(format!("prepare {}", request.token_id()))?;
            Ok(PrepareResponse {
                commit_hash: self.commit_hash.clone(),
            })
        }

        async fn complete(
            &self,
            token_id: &str,
            payload: &CompletePayload,
        ) -> std::result::Result<CompleteResponse, ApiError> {
            self.record(format!(
                "complete {} {} {}",
                token_id, payload.commit_hash, payload.signature
            ))?;
            Ok(CompleteResponse {
                pull_request_url: self.pull_request_url.clone(),
            })
        }

        async fn submit(
            &self,
            request: &BrandingRequest,
        ) -> std::result::Result<SubmitResponse, ApiError> {
            self.record(format!("submit {}", request.token_id()))?;
            Ok(SubmitResponse {
                message: "ok".into(),
                pull_request_url: self.pull_request_url.clone(),
                commit_hash: self.commit_hash.clone(),
                signature: String::new(),
            })
        }
    }

    struct FixedWallet;

    #[async_trait]
    impl Wallet for FixedWallet {
        fn address(&self) -> Option<String> {
            Some("erd1me".into())
        }

        async fn sign_message(&self, message: &str) -> Result<Vec<u8>> {
            Ok(message.bytes().rev().collect())
        }
    }

    struct RefusingWallet;

    #[async_trait]
    impl Wallet for RefusingWallet {
        fn address(&self) -> Option<String> {
            None
        }

        async fn sign_message(&self, _message: &str) -> Result<Vec<u8>> {
            Err(BrandError::Signature {
                message: "rejected by user".into(),
            })
        }
    }

    fn token() -> SelectedToken {
        SelectedToken::new("TKX-abcd", "Tokex")
    }

    fn form() -> BrandingForm {
        let mut png = Vec::new();
        RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 0]))
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let mut form = BrandingForm::new("https://tokex.io", "The Tokex token");
        form.set_logo(LogoFile::new("logo.png", LogoKind::Png, png));
        form.set_logo(LogoFile::new(
            "logo.svg",
            LogoKind::Svg,
            br#"<svg viewBox="0 0 24 24"/>"#.to_vec(),
        ));
        form
    }

    fn editing(api: FakeApi, mode: BrandingMode) -> Wizard<FakeApi> {
        let mut wizard = Wizard::new(api, mode);
        wizard.select_token(token()).unwrap();
        wizard
    }

    #[tokio::test]
    async fn test_create_flow() {
        let mut wizard = editing(FakeApi::ok(), BrandingMode::Create);
        assert!(wizard.can_submit(&form()));

        let state = wizard.submit(&form(), Some("erd1me")).await.unwrap();
        assert_eq!(
            state,
            &WizardState::AwaitingSignature {
                token: token(),
                commit_hash: CommitHash::new("abc123").unwrap(),
            }
        );

        let url = wizard.sign_and_complete(&FixedWallet).await.unwrap();
        assert_eq!(url.as_str(), "https://github.com/org/assets/pull/1");
        assert!(wizard.state().is_completed());

        // "abc123" reversed, hex-encoded
        assert_eq!(
            wizard.api().calls(),
            vec![
                "prepare TKX-abcd".to_string(),
                "complete TKX-abcd abc123 333231636261".to_string(),
            ]
        );

        wizard.reset().unwrap();
        assert_eq!(wizard.state(), &WizardState::SelectingToken);
    }

    #[tokio::test]
    async fn test_edit_flow_skips_signature() {
        let mut wizard = editing(FakeApi::ok(), BrandingMode::Edit);
        let state = wizard.submit(&form(), None).await.unwrap();
        assert!(state.is_completed());
        assert_eq!(wizard.api().calls(), vec!["submit TKX-abcd".to_string()]);

        let err = wizard.sign_and_complete(&FixedWallet).await.unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Cannot sign while completed");
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_backend() {
        let mut wizard = editing(FakeApi::ok(), BrandingMode::Create);
        let mut form = form();
        form.clear_logo(LogoKind::Png);
        assert!(!wizard.can_submit(&form));

        let err = wizard.submit(&form, None).await.unwrap_err();
        assert!(matches!(err, BrandError::Validation { .. }));
        assert!(wizard.api().calls().is_empty());
        assert_eq!(wizard.state(), &WizardState::EditingForm { token: token() });
    }

    #[tokio::test]
    async fn test_prepare_failure_keeps_state() {
        let mut wizard = editing(FakeApi::failing(), BrandingMode::Create);
        let err = wizard.submit(&form(), None).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to submit token branding");
        assert!(err.is_retryable());
        assert_eq!(wizard.state(), &WizardState::EditingForm { token: token() });
        assert_eq!(wizard.api().calls().len(), 1);
        assert!(wizard.can_submit(&form()));
    }

    #[tokio::test]
    async fn test_empty_commit_hash_is_rejected() {
        let api = FakeApi {
            commit_hash: String::new(),
            ..FakeApi::ok()
        };
        let mut wizard = editing(api, BrandingMode::Create);
        let err = wizard.submit(&form(), None).await.unwrap_err();

        assert!(matches!(err, BrandError::Network { .. }));
        assert!(matches!(wizard.state(), WizardState::EditingForm { .. }));
    }

    #[tokio::test]
    async fn test_complete_failure_stays_awaiting_signature() {
        let mut wizard = editing(FakeApi::ok(), BrandingMode::Create);
        wizard.submit(&form(), None).await.unwrap();
        let awaiting = wizard.state().clone();

        wizard.api.fail = true;
        let err = wizard.sign_and_complete(&FixedWallet).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to complete token branding");
        assert_eq!(wizard.state(), &awaiting);

        let err = wizard.sign_and_complete(&RefusingWallet).await.unwrap_err();
        assert!(matches!(err, BrandError::Signature { .. }));
        assert_eq!(wizard.state(), &awaiting);
    }

    #[test]
    fn test_transitions_from_wrong_state() {
        let mut wizard = Wizard::new(FakeApi::ok(), BrandingMode::Create);

        let err = wizard.back().unwrap_err();
        assert_eq!(err.to_string(), "Cannot go back while selecting a token");
        assert!(wizard.reset().is_err());

        wizard.select_token(token()).unwrap();
        let err = wizard.select_token(token()).unwrap_err();
        assert!(matches!(err, BrandError::InvalidTransition { .. }));
        assert_eq!(wizard.state(), &WizardState::EditingForm { token: token() });

        wizard.back().unwrap();
        assert_eq!(wizard.state(), &WizardState::SelectingToken);
    }

    #[tokio::test]
    async fn test_submit_requires_editing_state() {
        let mut wizard = Wizard::new(FakeApi::ok(), BrandingMode::Create);
        let err = wizard.submit(&form(), None).await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot submit while selecting a token");
        assert!(wizard.api().calls().is_empty());
    }
}
