//! Validate command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::{BrandError, Result};
use crate::output::{display_path, plural, Printer};
use crate::types::{LogoFile, LogoKind};
use crate::validation::{print_diagnostics, validate_logo};

/// Check logo files against the listing requirements
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Logo files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat every file as this kind instead of guessing from the extension
    #[arg(long, value_enum)]
    pub kind: Option<LogoKind>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let mut invalid = Vec::new();

    for path in &args.files {
        let file = LogoFile::load(path, args.kind)?;
        let result = validate_logo(&file);
        let name = display_path(path);

        tracing::debug!(file = %name, kind = %file.kind(), errors = result.len(), "Validated logo");
        print_diagnostics(printer, &name, &result);

        if !result.is_ok() {
            invalid.push(format!("{} ({})", name, plural(result.len(), "problem", "problems")));
        }
    }

    if !invalid.is_empty() {
        return Err(BrandError::Validation { reasons: invalid });
    }

    printer.success(
        "Finished",
        &format!("{} valid", plural(args.files.len(), "logo", "logos")),
    );
    Ok(())
}
