//! Search command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::{BrandError, Result};
use crate::output::{plural, Printer};
use crate::tokens::{search_tokens, HttpTokenLookup, TokenCandidate, TokenSource};
use crate::wallet::{LocalWallet, Wallet};

/// Search for tokens to brand
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in token identifiers and names
    #[arg(default_value = "")]
    pub query: String,

    /// List fungible tokens owned by the connected account
    #[arg(long)]
    pub own: bool,

    /// Account address to list tokens for
    #[arg(long, conflicts_with = "key")]
    pub address: Option<String>,

    /// Wallet key file whose address is used
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    fn source(&self) -> TokenSource {
        if self.own {
            TokenSource::Own
        } else {
            TokenSource::Memexchange
        }
    }

    fn address(&self) -> Result<Option<String>> {
        match (&self.address, &self.key) {
            (Some(address), _) => Ok(Some(address.clone())),
            (None, Some(key)) => Ok(LocalWallet::load(key)?.address()),
            (None, None) => Ok(None),
        }
    }
}

pub async fn run(args: SearchArgs, config: &Config, printer: &Printer) -> Result<()> {
    let source = args.source();
    let address = args.address()?;
    let lookup = HttpTokenLookup::from_config(config)?;

    printer.status("Searching", &format!("{} tokens", source));
    let found = search_tokens(&lookup, source, &args.query, address.as_deref()).await?;

    write_results(&mut io::stdout().lock(), &found, args.json).map_err(|e| BrandError::Io {
        path: PathBuf::from("<stdout>"),
        message: format!("Failed to write results: {}", e),
    })?;
    printer.info("Found", &plural(found.len(), "token", "tokens"));
    Ok(())
}

fn write_results(out: &mut impl Write, found: &[TokenCandidate], json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, found)?;
        return writeln!(out);
    }

    for candidate in found {
        writeln!(out, "{}\t{}", candidate.token.identifier, candidate.token.name)?;
    }
    Ok(())
}
