//! # Processing Module
//!
//! The symbol-extraction and icon-composition pipeline: content scan, symbol selection
//! and icon composition, plus the driver that chains them.

pub mod compose;
pub mod pipeline;
pub mod scan;
pub mod select;

// Re-export commonly used types for convenience
pub use compose::{FitTarget, compose};
pub use pipeline::{IconPipeline, PipelineRun};
pub use scan::{ContentRange, scan};
pub use select::{BoundingBox, extract_symbol, merge_span, select_symbol};
