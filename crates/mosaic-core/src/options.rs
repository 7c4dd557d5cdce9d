//! Grid configuration and device classification.

use crate::errors::ConfigError;

/// Screen widths at or below this many pixels are treated as mobile.
pub const MOBILE_SCREEN_THRESHOLD: f64 = 768.0;

/// Container width substituted while the real width is still unmeasured.
pub const FALLBACK_CONTAINER_WIDTH: f64 = 350.0;

/// Maximum downward steps a single widget may take during reflow.
pub const DEFAULT_REFLOW_LIMIT: u32 = 1000;

/// Maximum number of rows scanned when searching for a free cell.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10_000;

/// Placements below this row trigger the narrower-width retry.
pub const DEFAULT_SHRINK_ROW_THRESHOLD: u32 = 100;

/// Device class, used to force the narrow column count on phones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceClass {
    /// Phones and other small screens
    Mobile,
    /// Everything else
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classify a device by its screen width in pixels.
    pub fn from_screen_width(screen_width: f64) -> Self {
        Self::from_screen_width_with_threshold(screen_width, MOBILE_SCREEN_THRESHOLD)
    }

    /// Classify with a custom mobile threshold.
    pub fn from_screen_width_with_threshold(screen_width: f64, threshold: f64) -> Self {
        if screen_width <= threshold {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, DeviceClass::Mobile)
    }
}

/// Grid configuration.
///
/// `row_height` and `gap` are device-independent units; `scale` converts them
/// to pixels (pixels per unit). Container widths are always pixels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    /// Height of one grid row
    pub row_height: f64,
    /// Gap between cells and around the grid edge
    pub gap: f64,
    /// Pixels per device-independent unit
    pub scale: f64,
    /// Container width used while the real width is unmeasured
    pub fallback_width: f64,
    /// Ceiling on reflow steps per widget
    pub reflow_limit: u32,
    /// Ceiling on rows scanned per free-cell search
    pub search_limit: u32,
    /// Row below which placement retries narrower widths
    pub shrink_row_threshold: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_height: 60.0,
            gap: 8.0,
            scale: 1.0,
            fallback_width: FALLBACK_CONTAINER_WIDTH,
            reflow_limit: DEFAULT_REFLOW_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
            shrink_row_threshold: DEFAULT_SHRINK_ROW_THRESHOLD,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row height.
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Set the gap.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the device scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the width used for an unmeasured container.
    pub fn with_fallback_width(mut self, width: f64) -> Self {
        self.fallback_width = width;
        self
    }

    /// Set the reflow step ceiling.
    pub fn with_reflow_limit(mut self, limit: u32) -> Self {
        self.reflow_limit = limit;
        self
    }

    /// Set the free-cell search ceiling.
    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Set the row that triggers the narrower-width retry.
    pub fn with_shrink_row_threshold(mut self, row: u32) -> Self {
        self.shrink_row_threshold = row;
        self
    }

    /// Row height in pixels.
    pub fn row_height_px(&self) -> f64 {
        self.row_height * self.scale
    }

    /// Gap in pixels.
    pub fn gap_px(&self) -> f64 {
        self.gap * self.scale
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.row_height > 0.0) {
            return Err(ConfigError::InvalidRowHeight(self.row_height));
        }
        if !(self.gap >= 0.0) {
            return Err(ConfigError::InvalidGap(self.gap));
        }
        if !(self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if !(self.fallback_width > 0.0) {
            return Err(ConfigError::InvalidFallbackWidth(self.fallback_width));
        }
        if self.reflow_limit == 0 {
            return Err(ConfigError::InvalidLimit { name: "reflow_limit" });
        }
        if self.search_limit == 0 {
            return Err(ConfigError::InvalidLimit { name: "search_limit" });
        }
        Ok(())
    }
}
