//! # Error Handling
//!
//! Every failure of an icon run is an [`IconError`]. Each variant maps to the pipeline
//! stage that produced it ([`Stage`]) so that the CLI and the batch report can say which
//! step failed, and each carries an [`ErrorContext`] with the operation, the file involved
//! and an optional recovery suggestion.
//!
//! None of these errors is retried. They come from deterministic properties of the input
//! (an undecodable file, a fully transparent logo) rather than transient conditions.
//!
//! ## Usage
//!
//! ```rust
//! use logo_icon::error::{IconError, Stage};
//!
//! let error = IconError::empty_image()
//!     .with_path("public/logo.png")
//!     .with_recovery_suggestion("Lower --alpha-threshold or check the logo has a transparent background");
//!
//! assert_eq!(error.stage(), Stage::Scan);
//! assert_eq!(error.context().path.as_deref(), Some("public/logo.png"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Pipeline step an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Decode,
    Scan,
    Select,
    Compose,
    Encode,
    Config,
    Io,
    Asset,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Decode => "decode",
            Stage::Scan => "content scan",
            Stage::Select => "symbol selection",
            Stage::Compose => "icon composition",
            Stage::Encode => "encode",
            Stage::Config => "configuration",
            Stage::Io => "i/o",
            Stage::Asset => "asset utility",
        };
        f.write_str(name)
    }
}

/// Metadata about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed when the error occurred
    pub operation: Option<String>,
    /// Additional context about the error
    pub context: Option<String>,
    /// File the run was reading or writing
    pub path: Option<String>,
    /// Suggested recovery action
    pub recovery_suggestion: Option<String>,
    /// Additional metadata as key-value pairs
    pub metadata: HashMap<String, String>,
}

/// Error type for the icon pipeline and its asset utilities.
#[derive(Debug, Error)]
pub enum IconError {
    /// The codec could not parse the input file.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
        context: ErrorContext,
    },

    /// No column holds a pixel above the visibility threshold.
    #[error("image has no visible content")]
    EmptyImage { context: ErrorContext },

    /// The symbol region has a zero-length side. `stage` is the step that caught it.
    #[error("symbol region is degenerate ({width}x{height})")]
    DegenerateSymbol {
        stage: Stage,
        width: u32,
        height: u32,
        context: ErrorContext,
    },

    /// The resampler rejected the resize.
    #[error("failed to resize symbol: {source}")]
    Resize {
        #[source]
        source: icon_scale::cpu::ScaleError,
        context: ErrorContext,
    },

    /// The codec could not write the output file.
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
        context: ErrorContext,
    },

    /// A configuration value is out of range or unparsable.
    #[error("invalid {field} '{value}': {reason}")]
    Config {
        field: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },

    /// Filesystem failure outside the codec.
    #[error("{operation} failed: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
        context: ErrorContext,
    },

    /// A background-removal, data-URI, restore or discovery step failed.
    #[error("{operation}: {reason}")]
    Asset {
        operation: String,
        reason: String,
        context: ErrorContext,
    },
}

/// Result alias used throughout the crate.
pub type IconResult<T> = Result<T, IconError>;

impl IconError {
    /// Create a decode error for `path`
    pub fn decode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        let path = path.as_ref().display().to_string();
        Self::Decode {
            context: ErrorContext {
                path: Some(path.clone()),
                ..ErrorContext::default()
            },
            path,
            source,
        }
    }

    /// Create an empty-image error
    pub fn empty_image() -> Self {
        Self::EmptyImage {
            context: ErrorContext::default(),
        }
    }

    /// Create a degenerate-symbol error raised by symbol selection
    pub fn degenerate_symbol(width: u32, height: u32) -> Self {
        Self::degenerate_symbol_at(Stage::Select, width, height)
    }

    /// Create a degenerate-symbol error attributed to `stage`
    pub fn degenerate_symbol_at(stage: Stage, width: u32, height: u32) -> Self {
        Self::DegenerateSymbol {
            stage,
            width,
            height,
            context: ErrorContext::default(),
        }
    }

    /// Create a resize error
    pub fn resize(source: icon_scale::cpu::ScaleError) -> Self {
        Self::Resize {
            source,
            context: ErrorContext::default(),
        }
    }

    /// Create an encode error for `path`
    pub fn encode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        let path = path.as_ref().display().to_string();
        Self::Encode {
            context: ErrorContext {
                path: Some(path.clone()),
                ..ErrorContext::default()
            },
            path,
            source,
        }
    }

    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
            context: ErrorContext::default(),
        }
    }

    /// Create an asset utility error
    pub fn asset(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Asset {
            operation: operation.into(),
            reason: reason.into(),
            context: ErrorContext::default(),
        }
    }

    /// Add context to the error. Context set earlier is kept, joined with `; `.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        let slot = &mut self.context_mut().context;
        *slot = Some(match slot.take() {
            Some(existing) => format!("{}; {}", existing, context),
            None => context,
        });
        self
    }

    /// Add operation context
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Attach the file the run was working on
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.context_mut().path = Some(path.as_ref().display().to_string());
        self
    }

    /// Add recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context_mut().metadata.insert(key.into(), value.into());
        self
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Decode { context, .. } => context,
            Self::EmptyImage { context } => context,
            Self::DegenerateSymbol { context, .. } => context,
            Self::Resize { context, .. } => context,
            Self::Encode { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Io { context, .. } => context,
            Self::Asset { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Decode { context, .. } => context,
            Self::EmptyImage { context } => context,
            Self::DegenerateSymbol { context, .. } => context,
            Self::Resize { context, .. } => context,
            Self::Encode { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Io { context, .. } => context,
            Self::Asset { context, .. } => context,
        }
    }

    /// The pipeline stage this error is attributed to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Decode { .. } => Stage::Decode,
            Self::EmptyImage { .. } => Stage::Scan,
            Self::DegenerateSymbol { stage, .. } => *stage,
            Self::Resize { .. } => Stage::Compose,
            Self::Encode { .. } => Stage::Encode,
            Self::Config { .. } => Stage::Config,
            Self::Io { .. } => Stage::Io,
            Self::Asset { .. } => Stage::Asset,
        }
    }

    /// One-line report for terminals and batch summaries:
    /// `<stage> failed: <message> (<path>)`, followed by the suggestion when present.
    pub fn report(&self) -> String {
        let ctx = self.context();
        let mut line = format!("{} failed: {}", self.stage(), self);
        if let Some(path) = &ctx.path {
            if !line.contains(path.as_str()) {
                line.push_str(&format!(" ({})", path));
            }
        }
        if let Some(extra) = &ctx.context {
            line.push_str(&format!(" [{}]", extra));
        }
        if let Some(hint) = &ctx.recovery_suggestion {
            line.push_str(&format!("\n  hint: {}", hint));
        }
        line
    }
}

impl From<icon_scale::cpu::ScaleError> for IconError {
    fn from(error: icon_scale::cpu::ScaleError) -> Self {
        Self::resize(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = IconError::config("fraction", "1.5", "must be in (0, 1]");
        assert_eq!(error.stage(), Stage::Config);
        assert_eq!(error.to_string(), "invalid fraction '1.5': must be in (0, 1]");
    }

    #[test]
    fn test_error_with_context() {
        let error = IconError::empty_image()
            .with_path("logo.png")
            .with_operation("scan")
            .with_metadata("alpha_threshold", "10");

        let ctx = error.context();
        assert_eq!(ctx.path.as_deref(), Some("logo.png"));
        assert_eq!(ctx.operation.as_deref(), Some("scan"));
        assert_eq!(ctx.metadata.get("alpha_threshold").map(String::as_str), Some("10"));
    }

    #[test]
    fn test_report_names_stage_and_path() {
        let report = IconError::empty_image()
            .with_path("public/logo.png")
            .with_recovery_suggestion("lower the alpha threshold")
            .report();
        assert!(report.starts_with("content scan failed: image has no visible content"));
        assert!(report.contains("(public/logo.png)"));
        assert!(report.contains("hint: lower the alpha threshold"));
    }

    #[test]
    fn test_decode_error_keeps_path_once() {
        let source = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let report = IconError::decode("in.png", source).report();
        assert_eq!(report.matches("in.png").count(), 1, "{}", report);
        assert!(report.starts_with("decode failed"));
    }

    #[test]
    fn test_stage_attribution() {
        assert_eq!(IconError::degenerate_symbol(0, 3).stage(), Stage::Select);
        assert_eq!(
            IconError::degenerate_symbol_at(Stage::Compose, 0, 3).stage(),
            Stage::Compose
        );
        assert_eq!(IconError::asset("restore", "no match").stage(), Stage::Asset);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(IconError::io("write", io).stage(), Stage::Io);
    }

    #[test]
    fn test_context_is_appended_not_replaced() {
        let error = IconError::degenerate_symbol(0, 0)
            .with_context("no visible pixel in columns 5..10")
            .with_context("input logo.png");
        assert_eq!(
            error.context().context.as_deref(),
            Some("no visible pixel in columns 5..10; input logo.png")
        );
        assert!(error.report().contains("[no visible pixel in columns 5..10; input logo.png]"));
    }
}
