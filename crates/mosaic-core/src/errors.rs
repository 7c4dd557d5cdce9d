//! Error types for the Mosaic engine.

use crate::types::WidgetId;
use thiserror::Error;

/// Top-level error type for the Mosaic engine.
#[derive(Debug, Error)]
pub enum MosaicError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors during reflow or auto-layout.
///
/// These indicate corrupted widget data. Callers are expected to recover by
/// discarding the layout and substituting a default one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Widget {widget} still collides after {limit} reflow steps")]
    ReflowLimitExceeded { widget: WidgetId, limit: u32 },

    #[error("No free cell found for widget {widget} within {limit} rows")]
    NoFreeCell { widget: WidgetId, limit: u32 },

    #[error("Widget {widget} has degenerate size {w}x{h}")]
    DegenerateSize { widget: WidgetId, w: u32, h: u32 },
}

impl LayoutError {
    /// The widget that triggered the error.
    pub fn widget(&self) -> &WidgetId {
        match self {
            LayoutError::ReflowLimitExceeded { widget, .. }
            | LayoutError::NoFreeCell { widget, .. }
            | LayoutError::DegenerateSize { widget, .. } => widget,
        }
    }
}

/// Errors from invalid grid options.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Row height must be positive, got {0}")]
    InvalidRowHeight(f64),

    #[error("Gap must be non-negative, got {0}")]
    InvalidGap(f64),

    #[error("Device scale must be positive, got {0}")]
    InvalidScale(f64),

    #[error("Fallback container width must be positive, got {0}")]
    InvalidFallbackWidth(f64),

    #[error("Iteration ceiling '{name}' must be at least 1")]
    InvalidLimit { name: &'static str },
}
