pub mod completions;
pub mod init;
pub mod search;
pub mod submit;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;

/// brand - Validate token logos and submit token branding
#[derive(Parser, Debug)]
#[command(name = "brand")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./brand.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check logo files against the listing requirements
    Validate(validate::ValidateArgs),

    /// Search for tokens to brand
    Search(search::SearchArgs),

    /// Submit branding for a token
    Submit(submit::SubmitArgs),

    /// Create a brand.yaml with default settings
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load configuration for commands that talk to a backend.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::resolve(path, Path::new("."))?;
    tracing::debug!(api_url = %config.api_url, network = ?config.network, "Loaded config");
    Ok(config)
}
