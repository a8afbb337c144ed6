//! # Icon Composer
//!
//! Redraws the extracted symbol as a flat-colored mark, centered on a solid square canvas.
//!
//! 1. Fit the symbol inside `canvas_size * max_fraction` on both axes with one scale factor
//!    ([`icon_scale::plan::plan_fit`]).
//! 2. Resample it with a convolution filter ([`icon_scale::cpu::resize_rgba`]).
//! 3. Use the resampled alpha as a stencil: every pixel with alpha `a > 0` blends the
//!    stencil color over the canvas with weight `a / 255`, so anti-aliased edges survive.
//!
//! The output is always fully opaque and exactly `canvas_size × canvas_size`.

use fast_image_resize::Resizer;
use icon_scale::cpu::{ResampleFilter, resize_rgba};
use icon_scale::plan::{FitPlan, PlanError, Size, plan_fit};
use image::{Rgba, RgbaImage};
use serde::Serialize;

use crate::config::Rgb;
use crate::error::{IconError, IconResult, Stage};

/// Destination canvas for the composed icon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitTarget {
    /// Side of the square canvas.
    pub canvas_size: u32,
    /// Canvas color.
    pub fill: Rgb,
    /// Largest share of the side the mark may cover, per axis.
    pub max_fraction: f64,
    /// Color the mark is drawn in.
    pub stencil: Rgb,
}

/// Compute the placement of a `width`×`height` symbol on `target`.
pub fn plan_placement(width: u32, height: u32, target: &FitTarget) -> IconResult<FitPlan> {
    plan_fit(Size { w: width, h: height }, target.canvas_size, target.max_fraction).map_err(
        |e| match e {
            PlanError::EmptyInput(size) => {
                IconError::degenerate_symbol_at(Stage::Compose, size.w, size.h)
                    .with_operation("compose icon")
            }
            PlanError::EmptyCanvas => {
                IconError::config("canvas size", "0", e.to_string())
            }
            PlanError::InvalidFraction(v) | PlanError::BelowOnePixel { fraction: v, .. } => {
                IconError::config("occupied fraction", v.to_string(), e.to_string())
            }
        },
    )
}

#[inline]
fn blend_channel(over: u8, under: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((over as u32 * a + under as u32 * (255 - a) + 127) / 255) as u8
}

/// Compose `symbol` onto a fresh canvas described by `target`.
///
/// # Errors
///
/// `DegenerateSymbol` for a zero-sized symbol, `Config` for an unusable target, `Resize`
/// when the resampler fails.
pub fn compose(symbol: &RgbaImage, target: &FitTarget, filter: ResampleFilter) -> IconResult<RgbaImage> {
    let (sw, sh) = symbol.dimensions();
    let plan = plan_placement(sw, sh, target)?;

    let mut resizer = Resizer::new();
    let resized = resize_rgba(&mut resizer, symbol.as_raw(), plan.input, plan.out, filter)?;

    let side = target.canvas_size;
    let fill = target.fill;
    let stencil = target.stencil;
    let mut canvas = RgbaImage::from_pixel(side, side, fill.to_rgba());

    let (ox, oy) = plan.offset;
    for (i, px) in resized.chunks_exact(4).enumerate() {
        let alpha = px[3];
        if alpha == 0 {
            continue;
        }
        let x = ox + (i as u32 % plan.out.w);
        let y = oy + (i as u32 / plan.out.w);
        canvas.put_pixel(
            x,
            y,
            Rgba([
                blend_channel(stencil.r, fill.r, alpha),
                blend_channel(stencil.g, fill.g, alpha),
                blend_channel(stencil.b, fill.b, alpha),
                255,
            ]),
        );
    }

    Ok(canvas)
}
