//! Common test utilities for the logo-icon integration tests
//!
//! Synthetic logos: transparent canvases with opaque column blocks standing in for the
//! graphic mark and the trailing text.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use logo_icon::config::Rgb;

/// Ink color used for synthetic logo content.
pub const INK: Rgba<u8> = Rgba([12, 40, 90, 255]);

/// Transparent `width`×`height` logo with opaque blocks `(start, end, top, bottom)`,
/// all bounds half-open.
pub fn logo_with_blocks(width: u32, height: u32, blocks: &[(u32, u32, u32, u32)]) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    for &(start, end, top, bottom) in blocks {
        for x in start..end {
            for y in top..bottom {
                img.put_pixel(x, y, INK);
            }
        }
    }
    img
}

/// The 400×100 logo: mark in columns [20,180), text in [260,380), both full height.
pub fn mark_and_text_logo() -> RgbaImage {
    logo_with_blocks(400, 100, &[(20, 180, 0, 100), (260, 380, 0, 100)])
}

/// Write `img` as PNG under `dir` and return the path.
pub fn write_png(dir: &Path, name: &str, img: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("write fixture png");
    path
}

/// Bounding box `(left, top, right, bottom)` of pixels that differ from `fill`.
pub fn mark_box(icon: &RgbaImage, fill: Rgb) -> Option<(u32, u32, u32, u32)> {
    let bg = fill.to_rgba();
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in icon.enumerate_pixels() {
        if *p == bg {
            continue;
        }
        let b = bbox.get_or_insert((x, y, x + 1, y + 1));
        b.0 = b.0.min(x);
        b.1 = b.1.min(y);
        b.2 = b.2.max(x + 1);
        b.3 = b.3.max(y + 1);
    }
    bbox
}
