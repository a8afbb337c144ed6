//! # Icon Pipeline
//!
//! Runs the three stages in order over one decoded bitmap:
//!
//! ```text
//! raw bitmap ──scan──▶ content ranges ──select──▶ symbol bitmap ──compose──▶ icon
//! ```
//!
//! The pipeline holds only its configuration. Every call to [`IconPipeline::run`] is an
//! independent, deterministic function of its input bitmap.

use image::RgbaImage;
use tracing::{debug, info};

use super::compose::compose;
use super::scan::{ContentRange, scan};
use super::select::{BoundingBox, extract_symbol, select_symbol};
use crate::config::IconConfig;
use crate::error::IconResult;

/// Everything one run produced, for callers that want more than the icon.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Content ranges found by the scanner.
    pub ranges: Vec<ContentRange>,
    /// Merge gap in pixels after resolving it against the source width.
    pub merge_gap: u32,
    /// Symbol location in source coordinates.
    pub symbol_box: BoundingBox,
    /// The cropped symbol, still in its original colors.
    pub symbol: RgbaImage,
    /// The composed, fully opaque icon.
    pub icon: RgbaImage,
}

/// Configured scan → select → compose pipeline.
#[derive(Debug, Clone)]
pub struct IconPipeline {
    config: IconConfig,
}

impl IconPipeline {
    /// Create a pipeline after validating `config`.
    pub fn new(config: IconConfig) -> IconResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// Run all stages over `bitmap`.
    pub fn run(&self, bitmap: &RgbaImage) -> IconResult<PipelineRun> {
        let cfg = &self.config;

        let ranges = scan(bitmap, cfg.alpha_threshold);
        debug!(count = ranges.len(), ?ranges, "content ranges");

        let merge_gap = cfg.merge_gap.resolve(bitmap.width());
        let symbol_box = select_symbol(bitmap, &ranges, merge_gap, cfg.alpha_threshold)
            .map_err(|e| e.with_metadata("alpha_threshold", cfg.alpha_threshold.to_string()))?;
        debug!(?symbol_box, merge_gap, "symbol selected");

        let symbol = extract_symbol(bitmap, symbol_box)?;
        let icon = compose(&symbol, &cfg.fit_target(), cfg.filter)?;

        info!(
            source = %format!("{}x{}", bitmap.width(), bitmap.height()),
            symbol = %format!("{}x{}", symbol.width(), symbol.height()),
            canvas = cfg.canvas_size,
            "icon composed"
        );

        Ok(PipelineRun {
            ranges,
            merge_gap,
            symbol_box,
            symbol,
            icon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GapThreshold, Rgb};
    use crate::error::IconError;
    use image::Rgba;

    fn logo(width: u32, height: u32, blocks: &[(u32, u32)]) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for &(start, end) in blocks {
            for x in start..end {
                for y in 0..height {
                    img.put_pixel(x, y, Rgba([20, 20, 20, 255]));
                }
            }
        }
        img
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = IconConfig {
            occupied_fraction: 0.0,
            ..IconConfig::default()
        };
        assert!(matches!(IconPipeline::new(config), Err(IconError::Config { .. })));
    }

    #[test]
    fn transparent_input_reports_empty_image() {
        let pipeline = IconPipeline::new(IconConfig::default()).unwrap();
        let err = pipeline.run(&RgbaImage::new(300, 80)).unwrap_err();
        assert!(matches!(err, IconError::EmptyImage { .. }));
        assert_eq!(
            err.context().metadata.get("alpha_threshold").map(String::as_str),
            Some("10")
        );
    }

    #[test]
    fn text_block_is_excluded() {
        let config = IconConfig {
            merge_gap: GapThreshold::Pixels(20),
            ..IconConfig::default()
        };
        let pipeline = IconPipeline::new(config).unwrap();
        let run = pipeline.run(&logo(400, 100, &[(20, 180), (260, 380)])).unwrap();

        assert_eq!(run.ranges.len(), 2);
        assert_eq!(run.merge_gap, 20);
        assert_eq!(run.symbol_box, BoundingBox { left: 20, top: 0, right: 180, bottom: 100 });
        assert_eq!(run.symbol.dimensions(), (160, 100));
        assert_eq!(run.icon.dimensions(), (512, 512));
    }

    #[test]
    fn percentage_gap_scales_with_width() {
        // 2% of 400 = 8px: a 10px gap splits, a 5px gap merges.
        let pipeline = IconPipeline::new(IconConfig::default()).unwrap();
        let split = pipeline.run(&logo(400, 50, &[(0, 50), (60, 100)])).unwrap();
        assert_eq!(split.symbol_box.right, 50);
        let merged = pipeline.run(&logo(400, 50, &[(0, 50), (55, 100)])).unwrap();
        assert_eq!(merged.symbol_box.right, 100);
    }

    #[test]
    fn custom_colors_reach_the_canvas() {
        let config = IconConfig {
            canvas_size: 128,
            fill: Rgb::new(10, 200, 30),
            stencil: Rgb::BLACK,
            ..IconConfig::default()
        };
        let pipeline = IconPipeline::new(config).unwrap();
        let run = pipeline.run(&logo(64, 64, &[(0, 64)])).unwrap();
        assert_eq!(*run.icon.get_pixel(0, 0), Rgba([10, 200, 30, 255]));
        let center = run.icon.get_pixel(64, 64);
        assert!(center.0[..3].iter().all(|&c| c <= 5), "{:?}", center);
    }
}
