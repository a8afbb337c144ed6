//! Flat-threshold background removal.
//!
//! Any pixel whose red, green and blue channels all exceed `tolerance` is replaced by
//! transparent white. This is a plain RGB cut, useful to prepare a logo exported on a
//! white background for the pipeline. It does no color-space or edge analysis.

use image::{Rgba, RgbaImage};

pub const DEFAULT_TOLERANCE: u8 = 200;

const CLEARED: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Return a copy of `bitmap` with near-white pixels made transparent.
pub fn remove_light_background(bitmap: &RgbaImage, tolerance: u8) -> RgbaImage {
    let mut out = bitmap.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r > tolerance && g > tolerance && b > tolerance {
            *pixel = CLEARED;
        }
    }
    out
}
