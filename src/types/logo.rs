//! Logo files and per-logo form state.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{BrandError, Result};
use crate::validation::{validate_logo, ValidationResult};

/// Declared logo format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum LogoKind {
    Png,
    Svg,
}

impl LogoKind {
    /// Upper-case label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            LogoKind::Png => "PNG",
            LogoKind::Svg => "SVG",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            LogoKind::Png => "image/png",
            LogoKind::Svg => "image/svg+xml",
        }
    }

    /// Guess the kind from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(LogoKind::Png),
            "svg" => Some(LogoKind::Svg),
            _ => None,
        }
    }
}

impl fmt::Display for LogoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoKind::Png => write!(f, "png"),
            LogoKind::Svg => write!(f, "svg"),
        }
    }
}

/// A candidate logo: raw bytes plus the kind the user declared for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoFile {
    name: String,
    kind: LogoKind,
    bytes: Vec<u8>,
}

impl LogoFile {
    pub fn new(name: impl Into<String>, kind: LogoKind, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            kind,
            bytes: bytes.into(),
        }
    }

    /// Read a logo from disk.
    ///
    /// When `kind` is `None` the kind is taken from the file extension.
    pub fn load(path: &Path, kind: Option<LogoKind>) -> Result<Self> {
        let kind = match kind.or_else(|| LogoKind::from_path(path)) {
            Some(kind) => kind,
            None => {
                return Err(BrandError::Parse {
                    message: format!("Cannot tell whether '{}' is a PNG or SVG", path.display()),
                    help: Some("Use a .png or .svg extension, or pass --kind".to_string()),
                })
            }
        };

        let bytes = std::fs::read(path).map_err(|e| BrandError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read logo: {}", e),
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("logo.{}", kind));

        Ok(Self::new(name, kind, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LogoKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Size in KiB, unrounded.
    pub fn size_kib(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }

    /// Encode the file as a `data:` URL suitable for a preview.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.kind.mime(), STANDARD.encode(&self.bytes))
    }
}

/// Everything the form knows about one logo field.
///
/// Replaced as a whole on every file selection so the file, its preview and
/// its validation result can never disagree.
#[derive(Debug, Clone)]
pub struct LogoSlot {
    file: LogoFile,
    preview: Option<String>,
    validation: ValidationResult,
}

impl LogoSlot {
    /// Validate a freshly selected file and build its slot.
    ///
    /// The preview is only produced for files that passed validation.
    pub fn select(file: LogoFile) -> Self {
        let validation = validate_logo(&file);
        let preview = validation.is_ok().then(|| file.data_url());
        Self {
            file,
            preview,
            validation,
        }
    }

    pub fn file(&self) -> &LogoFile {
        &self.file
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_ok()
    }
}
