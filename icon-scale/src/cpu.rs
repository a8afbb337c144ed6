// SPDX-License-Identifier: MIT
// CPU resampler built on fast_image_resize (SIMD-accelerated).
// RGBA8 in → RGBA8 out, alpha-aware convolution so stencil edges stay anti-aliased.

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8x4;
use fir::{FilterType, ResizeAlg, ResizeOptions, Resizer};

use crate::plan::Size;

#[derive(Debug)]
pub enum ScaleError {
    EmptySize(Size),
    BufferTooSmall { expected: usize, actual: usize },
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
}

impl From<fir::ResizeError> for ScaleError { fn from(e: fir::ResizeError) -> Self { Self::Fir(e) } }
impl From<fir::ImageBufferError> for ScaleError { fn from(e: fir::ImageBufferError) -> Self { Self::ImageBuf(e) } }

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::EmptySize(s) => write!(f, "Cannot resample to or from {}x{}", s.w, s.h),
            ScaleError::BufferTooSmall { expected, actual } => {
                write!(f, "Source buffer too small: expected {} bytes, got {}", expected, actual)
            }
            ScaleError::Fir(e) => write!(f, "Fast image resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
            _ => None,
        }
    }
}

/// Convolution filters suitable for a high-contrast alpha edge.
///
/// Nearest-neighbour and bilinear are deliberately absent: the resized alpha becomes the
/// visible edge of the recolored mark.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Lanczos windowed sinc, 3 lobes. Sharpest edges.
    #[default]
    Lanczos3,
    /// Catmull-Rom cubic. Slightly softer, less ringing.
    CatmullRom,
    /// Mitchell-Netravali cubic. Softest of the three.
    Mitchell,
}

impl ResampleFilter {
    fn algorithm(self) -> ResizeAlg {
        let filter = match self {
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Mitchell => FilterType::Mitchell,
        };
        ResizeAlg::Convolution(filter)
    }
}

/// Resample a tightly packed RGBA8 buffer of `src` dimensions to `out` dimensions.
///
/// Returns a freshly allocated `out.w * out.h * 4` byte buffer; `src_rgba` is not touched.
pub fn resize_rgba(
    resizer: &mut Resizer,
    src_rgba: &[u8],
    src: Size,
    out: Size,
    filter: ResampleFilter,
) -> Result<Vec<u8>, ScaleError> {
    if src.is_empty() {
        return Err(ScaleError::EmptySize(src));
    }
    if out.is_empty() {
        return Err(ScaleError::EmptySize(out));
    }
    let expected = (src.w as usize) * (src.h as usize) * 4;
    if src_rgba.len() < expected {
        return Err(ScaleError::BufferTooSmall { expected, actual: src_rgba.len() });
    }

    let src_view = TypedImageRef::<U8x4>::from_buffer(src.w, src.h, &src_rgba[..expected])?;

    let mut dst = vec![0u8; (out.w as usize) * (out.h as usize) * 4];
    let mut dst_image = TypedImage::<U8x4>::from_buffer(out.w, out.h, &mut dst)?;

    let opts = ResizeOptions::new()
        .resize_alg(filter.algorithm())
        .use_alpha(true);
    resizer.resize_typed::<U8x4>(&src_view, &mut dst_image, &opts)?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(size: Size, px: [u8; 4]) -> Vec<u8> {
        px.iter()
            .copied()
            .cycle()
            .take((size.w * size.h * 4) as usize)
            .collect()
    }

    #[test]
    fn output_has_requested_dimensions() {
        let src = Size { w: 40, h: 20 };
        let out = Size { w: 100, h: 50 };
        let mut resizer = Resizer::new();
        let buf = resize_rgba(&mut resizer, &solid(src, [0, 0, 0, 255]), src, out, ResampleFilter::Lanczos3).unwrap();
        assert_eq!(buf.len(), 100 * 50 * 4);
    }

    #[test]
    fn opaque_input_stays_opaque() {
        let src = Size { w: 16, h: 8 };
        let out = Size { w: 61, h: 30 };
        let mut resizer = Resizer::new();
        for filter in [ResampleFilter::Lanczos3, ResampleFilter::CatmullRom, ResampleFilter::Mitchell] {
            let buf = resize_rgba(&mut resizer, &solid(src, [10, 20, 30, 255]), src, out, filter).unwrap();
            assert!(buf.chunks_exact(4).all(|p| p[3] >= 250), "{:?}", filter);
        }
    }

    #[test]
    fn transparent_input_stays_transparent() {
        let src = Size { w: 12, h: 12 };
        let out = Size { w: 48, h: 48 };
        let mut resizer = Resizer::new();
        let buf = resize_rgba(&mut resizer, &solid(src, [0, 0, 0, 0]), src, out, ResampleFilter::Lanczos3).unwrap();
        assert!(buf.chunks_exact(4).all(|p| p[3] <= 2));
    }

    #[test]
    fn rejects_empty_sizes_and_short_buffers() {
        let mut resizer = Resizer::new();
        assert!(matches!(
            resize_rgba(&mut resizer, &[], Size { w: 0, h: 4 }, Size { w: 4, h: 4 }, ResampleFilter::Lanczos3),
            Err(ScaleError::EmptySize(_))
        ));
        assert!(matches!(
            resize_rgba(&mut resizer, &[0; 16], Size { w: 2, h: 2 }, Size { w: 0, h: 4 }, ResampleFilter::Lanczos3),
            Err(ScaleError::EmptySize(_))
        ));
        assert!(matches!(
            resize_rgba(&mut resizer, &[0; 8], Size { w: 2, h: 2 }, Size { w: 4, h: 4 }, ResampleFilter::Lanczos3),
            Err(ScaleError::BufferTooSmall { expected: 16, actual: 8 })
        ));
    }
}
