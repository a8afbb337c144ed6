//! # Configuration Module
//!
//! This module provides the configuration structures shared by the CLI, the batch runner
//! and the icon pipeline.

pub mod config;

pub use config::{GapThreshold, IconConfig, Rgb};
