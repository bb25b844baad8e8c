use std::io;

use brand::cli::{load_config, Cli, Commands};
use brand::output::Printer;
use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();
    let config_path = cli.config;

    match cli.command {
        Commands::Validate(args) => brand::cli::validate::run(args, &printer)?,
        Commands::Search(args) => {
            let config = load_config(config_path.as_deref())?;
            brand::cli::search::run(args, &config, &printer).await?
        }
        Commands::Submit(args) => {
            let config = load_config(config_path.as_deref())?;
            brand::cli::submit::run(args, &config, &printer).await?
        }
        Commands::Init(args) => brand::cli::init::run(args, &printer)?,
        Commands::Completions(args) => brand::cli::completions::run(args)?,
    }

    Ok(())
}
