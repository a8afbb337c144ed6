// SPDX-License-Identifier: MIT
//! # Fit Plan Computation
//!
//! Computes where and how large a mark is drawn on a square canvas.
//!
//! The fit is two-pass: size by width first, and if the derived height overflows the
//! occupied fraction, size by height instead. Both passes use the same single scale
//! factor for X and Y, so the aspect ratio is never distorted. Dimensions are truncated,
//! never rounded up, so the limit `side * fraction` is a hard ceiling.

use std::fmt;

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Complete placement plan for one mark on one canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FitPlan {
    /// Original input dimensions
    pub input: Size,
    /// Square canvas dimensions
    pub canvas: Size,
    /// Resized mark dimensions
    pub out: Size,
    /// Top-left corner of the resized mark in canvas coordinates.
    pub offset: (u32, u32),
}

impl FitPlan {
    /// Margins around the placed mark as `(left, top, right, bottom)`.
    pub fn margins(&self) -> (u32, u32, u32, u32) {
        let (x, y) = self.offset;
        (
            x,
            y,
            self.canvas.w - x - self.out.w,
            self.canvas.h - y - self.out.h,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Input has a zero-length side; nothing can be fitted.
    EmptyInput(Size),
    /// Canvas side is zero.
    EmptyCanvas,
    /// Fraction outside `(0, 1]` or not finite.
    InvalidFraction(f64),
    /// `side * fraction` is below one pixel, so no mark fits inside the limit.
    BelowOnePixel { side: u32, fraction: f64 },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::EmptyInput(s) => write!(f, "Cannot fit an empty {}x{} input", s.w, s.h),
            PlanError::EmptyCanvas => write!(f, "Canvas side must be greater than 0"),
            PlanError::InvalidFraction(v) => {
                write!(f, "Occupied fraction {} is outside (0, 1]", v)
            }
            PlanError::BelowOnePixel { side, fraction } => write!(
                f,
                "Occupied fraction {} of a {}px canvas is less than one pixel",
                fraction, side
            ),
        }
    }
}

impl std::error::Error for PlanError {}

/// Fit `input` inside a `canvas_side`×`canvas_side` canvas, occupying at most
/// `fraction` of the side on either axis, centered.
///
/// # Arguments
/// * `input` - Source mark dimensions
/// * `canvas_side` - Side length of the square canvas
/// * `fraction` - Maximum occupied fraction per axis, in `(0, 1]`
///
/// # Performance
/// O(1), a handful of floating-point operations.
pub fn plan_fit(input: Size, canvas_side: u32, fraction: f64) -> Result<FitPlan, PlanError> {
    if input.is_empty() {
        return Err(PlanError::EmptyInput(input));
    }
    if canvas_side == 0 {
        return Err(PlanError::EmptyCanvas);
    }
    if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
        return Err(PlanError::InvalidFraction(fraction));
    }
    if (canvas_side as f64) * fraction < 1.0 {
        return Err(PlanError::BelowOnePixel {
            side: canvas_side,
            fraction,
        });
    }

    let (w, h) = fit_fraction(input, canvas_side, fraction);
    let canvas = Size {
        w: canvas_side,
        h: canvas_side,
    };
    Ok(FitPlan {
        input,
        canvas,
        out: Size { w, h },
        offset: ((canvas_side - w) / 2, (canvas_side - h) / 2),
    })
}

/// Width-first fit with a height fallback. Requires `canvas_side * fraction >= 1`, so the
/// lower clamp never pushes a side past the limit.
fn fit_fraction(input: Size, canvas_side: u32, fraction: f64) -> (u32, u32) {
    let (sw, sh) = (input.w as f64, input.h as f64);
    let limit = canvas_side as f64 * fraction;

    let mut w = limit.floor();
    let mut h = (w * sh / sw).floor();
    if h > limit {
        h = limit.floor();
        w = (h * sw / sh).floor();
    }

    let clamp = |v: f64| (v as u32).clamp(1, canvas_side);
    (clamp(w), clamp(h))
}
