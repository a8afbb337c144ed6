//! # Content-Region Scanner
//!
//! Column-by-column scan of a transparent-background bitmap. A column is *non-empty* when
//! any pixel in it has an alpha strictly above the visibility threshold; maximal runs of
//! non-empty columns become [`ContentRange`]s, reported left to right.
//!
//! The scan is O(width × height) in the worst case. Each column short-circuits at its first
//! visible pixel, so typical logos are scanned far faster than that.

use image::RgbaImage;
use serde::Serialize;

/// Half-open column interval `[start, end)` where every column holds visible content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContentRange {
    pub start: u32,
    pub end: u32,
}

impl ContentRange {
    /// Build a range, rejecting empty or inverted intervals.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Transparent columns between this range and a later one.
    pub fn gap_to(&self, next: &ContentRange) -> u32 {
        next.start.saturating_sub(self.end)
    }

    pub fn contains(&self, x: u32) -> bool {
        self.start <= x && x < self.end
    }
}

/// Whether column `x` holds a pixel with alpha above `alpha_threshold`.
fn column_is_visible(bitmap: &RgbaImage, x: u32, alpha_threshold: u8) -> bool {
    (0..bitmap.height()).any(|y| bitmap.get_pixel(x, y)[3] > alpha_threshold)
}

/// Per-column visibility flags, index = column.
pub fn visible_columns(bitmap: &RgbaImage, alpha_threshold: u8) -> Vec<bool> {
    (0..bitmap.width())
        .map(|x| column_is_visible(bitmap, x, alpha_threshold))
        .collect()
}

/// Scan `bitmap` and return its content ranges in left-to-right order.
///
/// A fully transparent bitmap yields an empty vector; deciding whether that is an error
/// is up to the caller.
pub fn scan(bitmap: &RgbaImage, alpha_threshold: u8) -> Vec<ContentRange> {
    let width = bitmap.width();
    let mut ranges = Vec::new();
    let mut open: Option<u32> = None;

    for x in 0..width {
        let visible = column_is_visible(bitmap, x, alpha_threshold);
        match (open, visible) {
            (None, true) => open = Some(x),
            (Some(start), false) => {
                ranges.push(ContentRange { start, end: x });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        ranges.push(ContentRange { start, end: width });
    }

    ranges
}
