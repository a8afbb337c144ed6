//! # Icon Configuration
//!
//! Configuration structures and validation for icon runs. This is the common interface
//! between the CLI, the batch runner and the pipeline.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Default | Description |
//! |-----------|------|---------|-------------|
//! | `canvas_size` | `u32` | 512 | Side of the square output canvas |
//! | `fill` | `Rgb` | `#0047AB` | Canvas background color |
//! | `stencil` | `Rgb` | white | Color the symbol is redrawn in |
//! | `occupied_fraction` | `f64` | 0.70 | Max share of the canvas per axis, `(0, 1]` |
//! | `alpha_threshold` | `u8` | 10 | Alpha above this counts as visible |
//! | `merge_gap` | `GapThreshold` | 2% of width | Gaps below this join symbol parts |
//! | `filter` | `ResampleFilter` | lanczos3 | Resampling filter |
//!
//! ## Thresholds Are Heuristics
//!
//! The symbol/text split assumes the mark is leftmost and separated from the text by a
//! wider gap than any gap inside the mark. No single merge gap works for every layout,
//! which is why both thresholds are exposed here instead of being hard-coded.
//!
//! ## Examples
//!
//! ```rust
//! use logo_icon::config::{GapThreshold, IconConfig, Rgb};
//!
//! let mut config = IconConfig::default();
//! config.merge_gap = "20px".parse().unwrap();
//! config.fill = "#112233".parse().unwrap();
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.merge_gap, GapThreshold::Pixels(20));
//! assert_eq!(config.fill, Rgb::new(0x11, 0x22, 0x33));
//! ```

use std::fmt;
use std::str::FromStr;

use icon_scale::cpu::ResampleFilter;
use serde::{Deserialize, Serialize};

use crate::error::{IconError, IconResult};
use crate::processing::compose::FitTarget;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Default canvas color, `#0047AB`.
    pub const BRAND_BLUE: Rgb = Rgb::new(0x00, 0x47, 0xAB);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA pixel of this color.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Accepts `#RRGGBB`, `RRGGBB`, `r,g,b`, `white` and `black`.
impl FromStr for Rgb {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = |reason: &str| IconError::config("color", raw, reason);

        match raw.to_ascii_lowercase().as_str() {
            "white" => return Ok(Rgb::WHITE),
            "black" => return Ok(Rgb::BLACK),
            _ => {}
        }

        if raw.contains(',') {
            let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(invalid("expected three comma-separated channels"));
            }
            let mut channels = [0u8; 3];
            for (slot, part) in channels.iter_mut().zip(&parts) {
                *slot = part
                    .parse::<u8>()
                    .map_err(|_| invalid("channels must be integers in 0..=255"))?;
            }
            return Ok(Rgb::new(channels[0], channels[1], channels[2]));
        }

        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("expected #RRGGBB, r,g,b, white or black"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid("bad hex digits"))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Minimum gap (in columns) that separates the symbol from trailing text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapThreshold {
    /// Fixed pixel count, for sources of known resolution.
    Pixels(u32),
    /// Fraction of the source width, so the threshold follows resolution.
    WidthFraction(f64),
}

impl Default for GapThreshold {
    fn default() -> Self {
        GapThreshold::WidthFraction(0.02)
    }
}

impl GapThreshold {
    /// Resolve to a pixel count for a bitmap `width` columns wide. Never below 1.
    pub fn resolve(&self, width: u32) -> u32 {
        match *self {
            GapThreshold::Pixels(px) => px.max(1),
            GapThreshold::WidthFraction(fraction) => {
                ((width as f64 * fraction).ceil() as u32).max(1)
            }
        }
    }
}

impl fmt::Display for GapThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapThreshold::Pixels(px) => write!(f, "{}px", px),
            GapThreshold::WidthFraction(fraction) => write!(f, "{}%", fraction * 100.0),
        }
    }
}

/// Accepts `20`, `20px` (pixels) and `2%` / `2.5%` (percent of width).
impl FromStr for GapThreshold {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Some(percent) = raw.strip_suffix('%') {
            let value: f64 = percent
                .trim()
                .parse()
                .map_err(|_| IconError::config("merge gap", raw, "percent must be a number"))?;
            return Ok(GapThreshold::WidthFraction(value / 100.0));
        }
        let pixels = raw.strip_suffix("px").unwrap_or(raw).trim();
        pixels
            .parse::<u32>()
            .map(GapThreshold::Pixels)
            .map_err(|_| IconError::config("merge gap", raw, "expected pixels (20, 20px) or percent (2%)"))
    }
}

/// Configuration for a single icon run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconConfig {
    /// Side length of the square output canvas, in pixels.
    pub canvas_size: u32,

    /// Canvas background color.
    pub fill: Rgb,

    /// Color the symbol is redrawn in, using its own alpha as a stencil.
    pub stencil: Rgb,

    /// Maximum share of the canvas side the resized mark may occupy on either axis.
    ///
    /// Must be in `(0, 1]`. Values between 0.70 and 0.80 look right for launcher icons.
    pub occupied_fraction: f64,

    /// A pixel is visible when its alpha is strictly greater than this value.
    pub alpha_threshold: u8,

    /// Gap below which adjacent content ranges are merged into the symbol.
    pub merge_gap: GapThreshold,

    /// Resampling filter for the resize step.
    pub filter: ResampleFilter,
}

impl Default for IconConfig {
    /// Defaults: 512px canvas, `#0047AB` fill, white stencil, 0.70 occupied fraction,
    /// alpha threshold 10, merge gap 2% of the source width, Lanczos3.
    fn default() -> Self {
        Self {
            canvas_size: 512,
            fill: Rgb::BRAND_BLUE,
            stencil: Rgb::WHITE,
            occupied_fraction: 0.70,
            alpha_threshold: 10,
            merge_gap: GapThreshold::default(),
            filter: ResampleFilter::default(),
        }
    }
}

impl IconConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> IconResult<()> {
        if self.canvas_size == 0 {
            return Err(IconError::config(
                "canvas size",
                self.canvas_size.to_string(),
                "must be greater than 0",
            ));
        }
        let fraction = self.occupied_fraction;
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(IconError::config(
                "occupied fraction",
                fraction.to_string(),
                "must be in (0, 1]",
            ));
        }
        if self.canvas_size as f64 * fraction < 1.0 {
            return Err(IconError::config(
                "occupied fraction",
                fraction.to_string(),
                format!("leaves less than one pixel of a {}px canvas", self.canvas_size),
            ));
        }
        match self.merge_gap {
            GapThreshold::Pixels(0) => {
                return Err(IconError::config(
                    "merge gap",
                    self.merge_gap.to_string(),
                    "must be at least 1px",
                ));
            }
            GapThreshold::WidthFraction(f) if !f.is_finite() || f <= 0.0 || f >= 1.0 => {
                return Err(IconError::config(
                    "merge gap",
                    self.merge_gap.to_string(),
                    "percent must be between 0% and 100% exclusive",
                ));
            }
            _ => {}
        }
        if self.alpha_threshold == u8::MAX {
            return Err(IconError::config(
                "alpha threshold",
                "255",
                "no pixel can be brighter than 255; use at most 254",
            ));
        }
        Ok(())
    }

    /// Destination canvas description for the composer.
    pub fn fit_target(&self) -> FitTarget {
        FitTarget {
            canvas_size: self.canvas_size,
            fill: self.fill,
            max_fraction: self.occupied_fraction,
            stencil: self.stencil,
        }
    }
}
