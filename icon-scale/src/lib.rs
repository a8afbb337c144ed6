// SPDX-License-Identifier: MIT
//! # icon-scale: Fit Planning and Resampling for Icon Composition
//!
//! This crate holds the geometry and pixel-resampling half of the icon composer.
//! It knows nothing about logos, symbols or colors: it answers two questions.
//!
//! 1. **Where does the mark go?** [`plan::plan_fit`] fits an input size inside a square
//!    canvas so that neither axis exceeds an occupied fraction of the canvas side, using a
//!    single scale factor, and centers the result.
//! 2. **How is it resampled?** [`cpu::resize_rgba`] resizes tightly packed RGBA8 pixels with
//!    a convolution filter from `fast_image_resize`, premultiplying alpha so that the
//!    transparent-to-opaque boundary stays clean.
//!
//! ## Usage Example
//!
//! ```rust
//! use icon_scale::{cpu::{resize_rgba, ResampleFilter}, plan::{plan_fit, Size}};
//!
//! let input = Size { w: 300, h: 100 };
//! let plan = plan_fit(input, 512, 0.70).unwrap();
//! assert_eq!(plan.out, Size { w: 358, h: 119 });
//!
//! let src = vec![255u8; (input.w * input.h * 4) as usize];
//! let mut resizer = fast_image_resize::Resizer::new();
//! let out = resize_rgba(&mut resizer, &src, input, plan.out, ResampleFilter::Lanczos3).unwrap();
//! assert_eq!(out.len(), (plan.out.w * plan.out.h * 4) as usize);
//! ```

pub mod cpu;
pub mod plan;
