//! # Asset Utilities
//!
//! Small single-purpose tools that sit around the icon pipeline: turning a white logo
//! background transparent, exporting an image as a data URI, restoring an image embedded
//! in a source file, and locating an input file by name.

pub mod background;
pub mod data_uri;
pub mod discover;

pub use background::remove_light_background;
pub use data_uri::{encode_data_uri, extract_embedded_image};
pub use discover::find_by_name;
