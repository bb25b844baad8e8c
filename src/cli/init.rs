//! Init command implementation.
//!
//! Writes a commented `brand.yaml` with the default settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::{BrandError, Result};
use crate::output::{display_path, Printer};

/// Create a brand.yaml with default settings
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write brand.yaml into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing brand.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(BrandError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::write(&config_path, Config::template()).map_err(|e| BrandError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.success("Created", &display_path(&config_path));
    Ok(())
}
