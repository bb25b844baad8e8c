//! Where a flow resumes after the wallet connects.
//!
//! The command that asked for a login hands its route to [`login`], which
//! passes the route to continue on back with the wallet. Nothing is kept
//! between runs.

use std::fmt;
use std::path::Path;

use crate::error::{BrandError, Result};
use crate::tokens::TokenSource;
use crate::wallet::LocalWallet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Unlock,
    /// Brand a token listed on MemeXchange.
    BrandToken,
    /// Brand a token the connected account owns.
    BrandOwnToken,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Unlock => "/unlock",
            Route::BrandToken => "/brand-token",
            Route::BrandOwnToken => "/brand-own-token",
        }
    }

    /// The branding page for a token source.
    pub fn for_source(source: TokenSource) -> Self {
        match source {
            TokenSource::Memexchange => Route::BrandToken,
            TokenSource::Own => Route::BrandOwnToken,
        }
    }

    /// The token source a branding page lists, if it is one.
    pub fn source(self) -> Option<TokenSource> {
        match self {
            Route::BrandToken => Some(TokenSource::Memexchange),
            Route::BrandOwnToken => Some(TokenSource::Own),
            Route::Home | Route::Unlock => None,
        }
    }

    pub fn requires_login(self) -> bool {
        self.source().is_some()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The route to open once the login completes.
///
/// Falls back to `Home` when no route was requested, or when the request
/// was the login page itself.
pub fn resume_route(requested: Option<Route>) -> Route {
    match requested {
        Some(Route::Unlock) | None => Route::Home,
        Some(route) => route,
    }
}

/// A finished login: the wallet, if one was given, and where to continue.
#[derive(Debug)]
pub struct Session {
    pub wallet: Option<LocalWallet>,
    pub route: Route,
}

/// Load the wallet key at `key` and resume at `requested`.
///
/// Fails with [`BrandError::NotConnected`] when a wallet is required, the
/// requested route needs a login, and no key was given.
pub fn login(
    key: Option<&Path>,
    requested: Option<Route>,
    wallet_required: bool,
) -> Result<Session> {
    let wallet = key.map(LocalWallet::load).transpose()?;

    if wallet_required && wallet.is_none() && requested.is_some_and(Route::requires_login) {
        return Err(BrandError::not_connected("Pass --key with a wallet key file"));
    }

    let route = resume_route(requested);
    tracing::debug!(%route, connected = wallet.is_some(), "Resuming after login");
    Ok(Session { wallet, route })
}
