//! Submit command implementation.
//!
//! Runs the branding wizard end to end: find and verify the token, fill in
//! the form, validate both logos, submit, and sign when the backend asks for
//! a signature. The pull request URL is printed to stdout.

use std::path::PathBuf;

use clap::Args;

use crate::api::HttpBrandingApi;
use crate::config::Config;
use crate::error::{BrandError, Result};
use crate::output::{display_path, Printer};
use crate::session::{login, Route, Session};
use crate::tokens::{search_tokens, select_token, HttpTokenLookup, TokenSource};
use crate::types::{LogoFile, LogoKind, SocialLink};
use crate::validation::print_diagnostics;
use crate::wallet::Wallet;
use crate::wizard::{BrandingForm, BrandingMode, PullRequestUrl, Wizard, WizardState};

/// Submit branding for a token
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Token identifier, e.g. TKX-abcd
    #[arg(long)]
    pub token: String,

    /// Project website (default: the website already listed for the token)
    #[arg(long)]
    pub website: Option<String>,

    /// Token description, 10 to 500 characters
    #[arg(long)]
    pub description: Option<String>,

    /// Social link as platform=url (repeatable)
    #[arg(long = "social", value_parser = parse_social)]
    pub socials: Vec<SocialLink>,

    /// 200x200 PNG logo with a transparent background
    #[arg(long)]
    pub png: PathBuf,

    /// Square SVG logo
    #[arg(long)]
    pub svg: PathBuf,

    /// How to submit (default: edit for memexchange tokens, create for own tokens)
    #[arg(long, value_enum)]
    pub mode: Option<BrandingMode>,

    /// Where the token is listed
    #[arg(long, value_enum, default_value_t)]
    pub source: TokenSource,

    /// Wallet key file used to sign and as the creator address
    #[arg(long)]
    pub key: Option<PathBuf>,
}

impl SubmitArgs {
    /// The explicit `--mode`, or the one the token source is branded with.
    fn mode(&self) -> BrandingMode {
        self.mode.unwrap_or(match self.source {
            TokenSource::Memexchange => BrandingMode::Edit,
            TokenSource::Own => BrandingMode::Create,
        })
    }

    /// Create mode signs the commit; own tokens are listed by address.
    fn needs_wallet(&self) -> bool {
        self.mode() == BrandingMode::Create || self.source == TokenSource::Own
    }
}

fn parse_social(value: &str) -> std::result::Result<SocialLink, String> {
    match value.split_once('=') {
        Some((platform, url)) if !platform.trim().is_empty() => {
            Ok(SocialLink::new(platform.trim(), url.trim()))
        }
        _ => Err(format!("expected platform=url, got '{}'", value)),
    }
}

pub async fn run(args: SubmitArgs, config: &Config, printer: &Printer) -> Result<()> {
    let mode = args.mode();
    let Session { wallet, route } = login(
        args.key.as_deref(),
        Some(Route::for_source(args.source)),
        args.needs_wallet(),
    )?;
    let source = route.source().ok_or(BrandError::InvalidTransition {
        action: "brand a token",
        state: "outside a branding page",
    })?;
    let address = wallet.as_ref().and_then(Wallet::address);

    let lookup = HttpTokenLookup::from_config(config)?;
    let found = search_tokens(&lookup, source, &args.token, address.as_deref()).await?;
    let candidate = found
        .into_iter()
        .find(|candidate| candidate.identifier() == args.token)
        .ok_or_else(|| BrandError::Validation {
            reasons: vec![format!("Token {} was not found in {} tokens", args.token, source)],
        })?;

    if config.ownership_check.applies_to(source) {
        printer.status("Verifying", &args.token);
    } else {
        printer.warning("Skipping", &format!("ownership check for {} tokens", source));
    }
    let token = select_token(&lookup, &config.ownership_check, source, candidate).await?;

    let mut form = BrandingForm::prefill(&token);
    if let Some(website) = &args.website {
        form.website = website.clone();
    }
    if let Some(description) = &args.description {
        form.description = description.clone();
    }
    form.socials.extend(args.socials.iter().cloned());

    for (path, kind) in [(&args.png, LogoKind::Png), (&args.svg, LogoKind::Svg)] {
        let slot = form.set_logo(LogoFile::load(path, Some(kind))?);
        print_diagnostics(printer, &display_path(path), slot.validation());
    }

    let mut wizard = Wizard::new(HttpBrandingApi::new(config.api_url()?), mode);
    wizard.select_token(token)?;

    printer.status("Submitting", &args.token);
    let state = wizard.submit(&form, address.as_deref()).await?.clone();
    let url = match state {
        WizardState::AwaitingSignature { commit_hash, .. } => {
            printer.status("Signing", commit_hash.as_str());
            let wallet = wallet
                .as_ref()
                .ok_or_else(|| BrandError::not_connected("Pass --key with a wallet key file"))?;
            wizard.sign_and_complete(wallet).await?
        }
        WizardState::Completed { pull_request_url } => pull_request_url,
        other => {
            return Err(BrandError::InvalidTransition {
                action: "finish",
                state: other.describe(),
            })
        }
    };

    report(&url, printer);
    Ok(())
}

fn report(url: &PullRequestUrl, printer: &Printer) {
    println!("{}", url);
    printer.success("Created", &format!("pull request {}", printer.bold(url.as_str())));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(mode: Option<BrandingMode>, source: TokenSource) -> SubmitArgs {
        SubmitArgs {
            token: "TKX-abcd".into(),
            website: None,
            description: None,
            socials: Vec::new(),
            png: PathBuf::from("logo.png"),
            svg: PathBuf::from("logo.svg"),
            mode,
            source,
            key: None,
        }
    }

    #[test]
    fn test_parse_social() {
        assert_eq!(
            parse_social("Twitter=https://x.com/tkx").unwrap(),
            SocialLink::new("Twitter", "https://x.com/tkx")
        );
        assert_eq!(
            parse_social("site=https://a.io/?q=1").unwrap().url,
            "https://a.io/?q=1"
        );
        assert!(parse_social("https://x.com/tkx").is_err());
        assert!(parse_social("=https://x.com").is_err());
    }

    #[test]
    fn test_mode_defaults_from_source() {
        assert_eq!(args(None, TokenSource::Memexchange).mode(), BrandingMode::Edit);
        assert_eq!(args(None, TokenSource::Own).mode(), BrandingMode::Create);
        assert_eq!(
            args(Some(BrandingMode::Create), TokenSource::Memexchange).mode(),
            BrandingMode::Create
        );
    }

    #[test]
    fn test_wallet_needed_to_sign_or_list_own() {
        assert!(!args(None, TokenSource::Memexchange).needs_wallet());
        assert!(args(None, TokenSource::Own).needs_wallet());
        assert!(args(Some(BrandingMode::Edit), TokenSource::Own).needs_wallet());
        assert!(args(Some(BrandingMode::Create), TokenSource::Memexchange).needs_wallet());
    }

    #[tokio::test]
    async fn test_run_without_key_refuses_own_tokens() {
        let err = run(args(None, TokenSource::Own), &Config::default(), &Printer::plain())
            .await
            .unwrap_err();
        assert!(matches!(err, BrandError::NotConnected { .. }));
    }
}
