//! # Logo Icon Library
//!
//! Turns a horizontal logo (graphic mark followed by text, on a transparent background)
//! into a square application icon: the mark alone, recolored, centered on a solid canvas.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `processing`: the scan → select → compose pipeline over in-memory RGBA bitmaps
//! - `config`: run parameters, colors and merge-gap thresholds, with validation
//! - `error`: the error taxonomy, attributed to pipeline stages
//! - `batch`: parallel runs over many logos with per-image failure isolation
//! - `assets`: background removal, data-URI export/restore and input discovery
//!
//! Decoding and encoding happen only at the edges, in [`generate_icon`] and the asset
//! utilities; the pipeline itself never touches the filesystem.
//!
//! ## Example
//!
//! ```rust,no_run
//! use logo_icon::{config::IconConfig, generate_icon};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IconConfig::default();
//! let run = generate_icon("public/logo.png", "public/pwa-icon.png", &config, None)?;
//! println!("symbol {}x{}", run.symbol.width(), run.symbol.height());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use image::ImageFormat;
use tracing::info;

pub mod assets;
pub mod batch;
pub mod config;
pub mod error;
pub mod processing;

/// Re-export error types for convenience
pub use error::{IconError, IconResult, Stage};

pub use config::IconConfig;
pub use processing::{IconPipeline, PipelineRun};

/// Decode `input` into an RGBA bitmap.
///
/// Images without an alpha channel (JPEG) decode as fully opaque, so the whole image
/// becomes one content range.
pub fn load_bitmap(input: impl AsRef<Path>) -> IconResult<image::RgbaImage> {
    let input = input.as_ref();
    let decoded = image::open(input).map_err(|e| IconError::decode(input, e))?;
    Ok(decoded.to_rgba8())
}

/// Encode `bitmap` to `output` as PNG.
pub fn save_png(bitmap: &image::RgbaImage, output: impl AsRef<Path>) -> IconResult<()> {
    let output = output.as_ref();
    bitmap
        .save_with_format(output, ImageFormat::Png)
        .map_err(|e| IconError::encode(output, e))
}

/// Decode `input`, run the pipeline, and write the icon to `output` as PNG.
///
/// When `symbol_output` is given, the cropped symbol is written there too, as an
/// alpha-preserving PNG.
///
/// # Errors
///
/// `Decode` and `Encode` for codec failures, `EmptyImage` when nothing is visible, plus
/// any configuration or compose error. Pipeline errors carry `input` as their path.
pub fn generate_icon(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &IconConfig,
    symbol_output: Option<&Path>,
) -> IconResult<PipelineRun> {
    let input = input.as_ref();
    let output = output.as_ref();

    let pipeline = IconPipeline::new(config.clone())?;
    let bitmap = load_bitmap(input)?;
    info!(input = %input.display(), width = bitmap.width(), height = bitmap.height(), "decoded");

    let run = pipeline.run(&bitmap).map_err(|e| e.with_path(input))?;

    if let Some(symbol_path) = symbol_output {
        save_png(&run.symbol, symbol_path)?;
        info!(path = %symbol_path.display(), "symbol written");
    }
    save_png(&run.icon, output)?;
    info!(output = %output.display(), "icon written");

    Ok(run)
}
