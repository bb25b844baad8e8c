//! Individual logo checks.
//!
//! Each check takes the raw input and returns a `ValidationResult`.
//! `validate_logo` runs them in order and concatenates the results.

use std::any::Any;
use std::io::Cursor;
use std::panic;

use image::{ImageError, ImageReader, ImageResult, Limits, RgbaImage};
use roxmltree::{Document, ParsingOptions};

use super::diagnostic::{Diagnostic, ValidationResult};

/// Largest accepted file, in KiB.
pub const MAX_SIZE_KIB: u32 = 100;

/// Required PNG raster size.
pub const REQUIRED_WIDTH: u32 = 200;
pub const REQUIRED_HEIGHT: u32 = 200;

/// Rasters wider or taller than this are refused by the decoder.
pub const MAX_DECODE_DIMENSION: u32 = 4096;

/// Upper bound on XML nodes parsed from an SVG.
pub const MAX_SVG_NODES: u32 = 50_000;

/// Why a decode produced no image.
enum DecodeFailure {
    /// The bytes are not an image / not XML.
    Invalid,
    /// The decoder gave up for another reason (limits, internal fault).
    Fault(String),
}

/// Check the file size against the ceiling.
pub fn check_file_size(size: usize) -> ValidationResult {
    let mut result = ValidationResult::new();

    let size_kib = size as f64 / 1024.0;
    if size_kib > f64::from(MAX_SIZE_KIB) {
        result.push(
            Diagnostic::new(
                "brand::validate::file-size",
                format!(
                    "File size must be under {}KB (current: {}KB)",
                    MAX_SIZE_KIB,
                    size_kib.round()
                ),
            )
            .with_help("Compress the image or simplify the SVG paths"),
        );
    }

    result
}

/// Decode the bytes as a raster and check dimensions and transparency.
///
/// Dimensions come from the header, so they are reported even when the full
/// decode is refused by the decoder limits.
pub fn check_png(bytes: &[u8]) -> ValidationResult {
    let mut result = ValidationResult::new();

    let decoded = read_dimensions(bytes).map(|size| (size, decode_raster(bytes)));
    let ((width, height), image) = match decoded {
        Ok((_, Err(DecodeFailure::Invalid))) | Err(DecodeFailure::Invalid) => {
            result.error("brand::validate::png-invalid", "Invalid PNG file");
            return result;
        }
        Err(DecodeFailure::Fault(message)) => {
            result.push(decode_fault("PNG", &message));
            return result;
        }
        Ok(decoded) => decoded,
    };

    if width != REQUIRED_WIDTH || height != REQUIRED_HEIGHT {
        result.push(
            Diagnostic::new(
                "brand::validate::png-dimensions",
                format!(
                    "PNG must be exactly {}x{} pixels (current: {}x{})",
                    REQUIRED_WIDTH, REQUIRED_HEIGHT, width, height
                ),
            )
            .with_help("Resize your PNG to 200x200px, e.g. with https://imageresizer.com/"),
        );
    }

    match image {
        Ok(image) if !has_transparency(&image) => result.push(
            Diagnostic::new(
                "brand::validate::png-opaque",
                "PNG must have transparent background",
            )
            .with_help(
                "Make your PNG background transparent, e.g. with https://www.remove.bg/upload",
            ),
        ),
        Ok(_) | Err(DecodeFailure::Invalid) => {}
        Err(DecodeFailure::Fault(message)) => result.push(decode_fault("PNG", &message)),
    }

    result
}

/// Parse the bytes as SVG and check the `viewBox` aspect ratio.
pub fn check_svg(bytes: &[u8]) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Ok(text) = std::str::from_utf8(bytes) else {
        result.push(invalid_svg());
        return result;
    };
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let doc = match parse_svg(text) {
        Ok(doc) => doc,
        Err(DecodeFailure::Invalid) => {
            result.push(invalid_svg());
            return result;
        }
        Err(DecodeFailure::Fault(message)) => {
            result.push(decode_fault("SVG", &message));
            return result;
        }
    };

    let svg = doc
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == "svg");

    if let Some((width, height)) = svg
        .and_then(|node| node.attribute("viewBox"))
        .and_then(view_box_size)
    {
        if width != height {
            result.push(
                Diagnostic::new(
                    "brand::validate::svg-aspect",
                    "SVG must have square format (equal width and height)",
                )
                .with_help("Set a square viewBox, e.g. viewBox=\"0 0 200 200\""),
            );
        }
    }

    result
}

/// True if any pixel is not fully opaque.
fn has_transparency(image: &RgbaImage) -> bool {
    image.pixels().any(|pixel| pixel.0[3] < u8::MAX)
}

/// Width and height from a `viewBox` value, if it has exactly four numbers.
fn view_box_size(value: &str) -> Option<(f64, f64)> {
    let numbers = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;

    match numbers.as_slice() {
        [_, _, width, height] => Some((*width, *height)),
        _ => None,
    }
}

/// Width and height from the image header, without decoding pixels.
fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeFailure> {
    classify_raster(panic::catch_unwind(|| {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_dimensions()
    }))
}

fn decode_raster(bytes: &[u8]) -> Result<RgbaImage, DecodeFailure> {
    let decoded = classify_raster(panic::catch_unwind(|| {
        let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let mut limits = Limits::default();
        limits.max_image_width = Some(MAX_DECODE_DIMENSION);
        limits.max_image_height = Some(MAX_DECODE_DIMENSION);
        reader.limits(limits);
        reader.decode()
    }))?;
    Ok(decoded.to_rgba8())
}

fn classify_raster<T>(outcome: std::thread::Result<ImageResult<T>>) -> Result<T, DecodeFailure> {
    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(
            ImageError::Decoding(_) | ImageError::Unsupported(_) | ImageError::IoError(_),
        )) => Err(DecodeFailure::Invalid),
        Ok(Err(err)) => Err(DecodeFailure::Fault(err.to_string())),
        Err(payload) => Err(DecodeFailure::Fault(panic_message(payload))),
    }
}

fn parse_svg(text: &str) -> Result<Document<'_>, DecodeFailure> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    options.nodes_limit = MAX_SVG_NODES;

    match panic::catch_unwind(|| Document::parse_with_options(text, options)) {
        Ok(Ok(doc)) => Ok(doc),
        Ok(Err(err @ roxmltree::Error::NodesLimitReached)) => {
            Err(DecodeFailure::Fault(err.to_string()))
        }
        Ok(Err(_)) => Err(DecodeFailure::Invalid),
        Err(payload) => Err(DecodeFailure::Fault(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "decoder panicked".to_string()
    }
}

fn invalid_svg() -> Diagnostic {
    Diagnostic::new("brand::validate::svg-invalid", "Invalid SVG format")
        .with_help("Export a well-formed SVG, or convert your PNG with https://png2svg.com/")
}

fn decode_fault(label: &str, message: &str) -> Diagnostic {
    Diagnostic::new(
        "brand::validate::decode-failed",
        format!("Failed to validate {} file: {}", label, message),
    )
}
