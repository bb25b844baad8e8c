//! Benchmarks for logo validation.

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageFormat, Rgba, RgbaImage};

use brand::{validate_logo, LogoFile, LogoKind};

fn encode(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// A 200x200 logo whose first half is noise, so it does not compress away.
fn noisy_png() -> Vec<u8> {
    let mut seed: u32 = 0x2545_f491;
    let image = RgbaImage::from_fn(200, 200, |_, y| {
        if y >= 100 {
            return Rgba([0, 0, 0, 0]);
        }
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let [r, g, b, a] = seed.to_le_bytes();
        Rgba([r, g, b, a])
    });
    encode(&image)
}

fn bench_png(c: &mut Criterion) {
    let mut group = c.benchmark_group("png");

    let transparent = LogoFile::new(
        "clear.png",
        LogoKind::Png,
        encode(&RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 0]))),
    );
    let opaque = LogoFile::new(
        "opaque.png",
        LogoKind::Png,
        encode(&RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 255]))),
    );
    let noisy = LogoFile::new("noisy.png", LogoKind::Png, noisy_png());

    group.bench_function("transparent", |b| {
        b.iter(|| validate_logo(black_box(&transparent)))
    });
    group.bench_function("opaque", |b| b.iter(|| validate_logo(black_box(&opaque))));
    group.bench_function("noisy", |b| b.iter(|| validate_logo(black_box(&noisy))));

    group.finish();
}

fn bench_svg(c: &mut Criterion) {
    let mut group = c.benchmark_group("svg");

    let simple = LogoFile::new(
        "simple.svg",
        LogoKind::Svg,
        br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><circle cx="12" cy="12" r="10"/></svg>"#.to_vec(),
    );

    let mut paths = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0,0,512,512">"#);
    for i in 0..2_000 {
        paths.push_str(&format!(r#"<path d="M{i} 0 L{i} 512" stroke="black"/>"#));
    }
    paths.push_str("</svg>");
    let detailed = LogoFile::new("detailed.svg", LogoKind::Svg, paths.into_bytes());

    group.bench_function("simple", |b| b.iter(|| validate_logo(black_box(&simple))));
    group.bench_function("detailed", |b| b.iter(|| validate_logo(black_box(&detailed))));

    group.finish();
}

criterion_group!(benches, bench_png, bench_svg);
criterion_main!(benches);
