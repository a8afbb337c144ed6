//! # Symbol Selector
//!
//! Picks the graphic mark out of the scanned content ranges.
//!
//! The mark is assumed to be leftmost. Starting from the first range, each following range
//! is merged while the transparent gap before it is strictly below the merge threshold; the
//! first gap at or above the threshold is taken as the boundary between mark and text.
//! The merged strip is then trimmed to its tight bounding box.
//!
//! ## Known Limitation
//!
//! This is a layout heuristic, not a guarantee. A logo whose mark and text are not
//! separated by a gap at least as wide as the threshold comes back whole: the entire
//! content region is treated as the symbol. Tune the merge gap for such inputs.

use image::{RgbaImage, imageops};
use serde::Serialize;
use tracing::debug;

use super::scan::ContentRange;
use crate::error::{IconError, IconResult};

/// Tight rectangle of visible pixels; `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Merge leading ranges separated by gaps below `merge_gap` into one span.
///
/// Returns `None` only when `ranges` is empty.
pub fn merge_span(ranges: &[ContentRange], merge_gap: u32) -> Option<ContentRange> {
    let (first, rest) = ranges.split_first()?;
    let mut end = first.end;

    for next in rest {
        let gap = next.start.saturating_sub(end);
        if gap >= merge_gap {
            debug!(gap, at = end, next_start = next.start, "symbol/text boundary");
            break;
        }
        end = next.end;
    }

    Some(ContentRange {
        start: first.start,
        end,
    })
}

/// Tight bounding box of pixels with alpha above `alpha_threshold` inside the
/// full-height column strip `span`. Coordinates are in `bitmap` space.
fn tight_box(bitmap: &RgbaImage, span: ContentRange, alpha_threshold: u8) -> Option<BoundingBox> {
    let end = span.end.min(bitmap.width());
    let mut found: Option<BoundingBox> = None;

    for x in span.start..end {
        for y in 0..bitmap.height() {
            if bitmap.get_pixel(x, y)[3] <= alpha_threshold {
                continue;
            }
            let b = found.get_or_insert(BoundingBox {
                left: x,
                top: y,
                right: x + 1,
                bottom: y + 1,
            });
            b.left = b.left.min(x);
            b.top = b.top.min(y);
            b.right = b.right.max(x + 1);
            b.bottom = b.bottom.max(y + 1);
        }
    }

    found
}

/// Locate the symbol: merge the leading ranges, then trim the strip to its content.
///
/// # Errors
///
/// - `EmptyImage` when `ranges` is empty.
/// - `DegenerateSymbol` when the merged strip holds no visible pixel (only possible when
///   `ranges` did not come from scanning this bitmap with the same threshold).
pub fn select_symbol(
    bitmap: &RgbaImage,
    ranges: &[ContentRange],
    merge_gap: u32,
    alpha_threshold: u8,
) -> IconResult<BoundingBox> {
    let span = merge_span(ranges, merge_gap).ok_or_else(|| {
        IconError::empty_image()
            .with_operation("select symbol")
            .with_recovery_suggestion(
                "The logo needs a transparent background; lower --alpha-threshold if it is very faint",
            )
    })?;

    let merged = ranges.iter().take_while(|r| r.start < span.end).count();
    debug!(
        span_start = span.start,
        span_end = span.end,
        merged,
        total = ranges.len(),
        "merged content ranges"
    );

    let bbox = tight_box(bitmap, span, alpha_threshold).ok_or_else(|| {
        IconError::degenerate_symbol(0, 0)
            .with_operation("select symbol")
            .with_context(format!("no visible pixel in columns {}..{}", span.start, span.end))
    })?;

    Ok(bbox)
}

/// Copy the `bbox` region out of `bitmap` as a new bitmap.
pub fn extract_symbol(bitmap: &RgbaImage, bbox: BoundingBox) -> IconResult<RgbaImage> {
    if bbox.is_empty() || bbox.right > bitmap.width() || bbox.bottom > bitmap.height() {
        return Err(IconError::degenerate_symbol(bbox.width(), bbox.height())
            .with_operation("extract symbol")
            .with_context(format!("{:?} within {}x{}", bbox, bitmap.width(), bitmap.height())));
    }
    Ok(imageops::crop_imm(bitmap, bbox.left, bbox.top, bbox.width(), bbox.height()).to_image())
}
