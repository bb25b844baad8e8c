//! Logo fixtures shared by the integration tests.

#![allow(dead_code)]

use std::io::Cursor;

use brand::{BrandingForm, LogoFile, LogoKind};
use image::{ImageFormat, Rgba, RgbaImage};

pub const SECRET_KEY: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

pub fn encode(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn solid_png(width: u32, height: u32, alpha: u8) -> Vec<u8> {
    encode(&RgbaImage::from_pixel(width, height, Rgba([40, 80, 120, alpha])))
}

/// A 200x200 PNG whose first `noise_rows` rows are pseudo-random pixels and
/// whose remaining rows are fully transparent.
///
/// Noise does not compress, so each noisy row adds roughly 800 bytes.
pub fn noisy_png(noise_rows: u32) -> Vec<u8> {
    let mut seed: u32 = 0x9e37_79b9;
    let image = RgbaImage::from_fn(200, 200, |_, y| {
        if y >= noise_rows {
            return Rgba([0, 0, 0, 0]);
        }
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let [r, g, b, a] = seed.to_be_bytes();
        Rgba([r, g, b, a])
    });
    encode(&image)
}

pub fn square_svg() -> Vec<u8> {
    br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect width="64" height="64" rx="8"/></svg>"#.to_vec()
}

pub fn png_file(bytes: Vec<u8>) -> LogoFile {
    LogoFile::new("logo.png", LogoKind::Png, bytes)
}

pub fn svg_file(bytes: Vec<u8>) -> LogoFile {
    LogoFile::new("logo.svg", LogoKind::Svg, bytes)
}

pub fn form_with(png: Vec<u8>, svg: Vec<u8>) -> BrandingForm {
    let mut form = BrandingForm::new("https://example.com", "Twenty chars exactly");
    form.set_logo(png_file(png));
    form.set_logo(svg_file(svg));
    form
}
