//! Logo validation.
//!
//! Runs the size check and the type-specific checks against a candidate logo
//! and reports every failure found. Used by `brand validate` and by the
//! wizard whenever a logo is selected.

mod checks;
mod diagnostic;

pub use checks::{MAX_SIZE_KIB, REQUIRED_HEIGHT, REQUIRED_WIDTH};
pub use diagnostic::{Diagnostic, ValidationResult};

use crate::output::Printer;
use crate::types::{LogoFile, LogoKind};

/// Run all checks that apply to the file's declared kind.
///
/// Checks accumulate rather than stop at the first failure: the size error
/// (if any) comes first, then the PNG or SVG errors in the order they were
/// checked. Never fails; decoder faults become entries in the result.
pub fn validate_logo(file: &LogoFile) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_file_size(file.size()));
    match file.kind() {
        LogoKind::Png => result.merge(checks::check_png(file.bytes())),
        LogoKind::Svg => result.merge(checks::check_svg(file.bytes())),
    }

    result
}

/// Print one file's diagnostics to stderr.
pub fn print_diagnostics(printer: &Printer, name: &str, result: &ValidationResult) {
    if result.is_ok() {
        printer.success("Valid", name);
        return;
    }

    printer.error("Invalid", name);
    for d in result.iter() {
        eprintln!("  {}[{}]: {}", printer.severity("error", true), d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("    {}", printer.dim(&format!("help: {}", help)));
        }
    }
}
