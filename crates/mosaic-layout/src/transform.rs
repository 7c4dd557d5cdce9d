//! Conversions between grid cells, pixels, and viewport-relative units.
//!
//! Three coordinate systems are involved:
//! - grid cells (integers, what widgets store)
//! - absolute pixels, used for live drag and resize feedback
//! - viewport-relative units: percent of container width horizontally and
//!   device-independent units vertically, used for rendered output

use glam::{DVec2, UVec2};
use mosaic_core::{DeviceClass, GridOptions, Widget};
use tracing::trace;

use crate::columns::calculate_columns;

/// Rectangle in absolute pixels relative to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Top-left corner.
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.left, self.top)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Rectangle in viewport-relative units.
///
/// Horizontal values are percentages of the container width, vertical values
/// are device-independent units, so the rectangle stays valid across
/// container resizes and screen densities.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub left_percent: f64,
    pub width_percent: f64,
    pub top: f64,
    pub height: f64,
}

impl ViewportRect {
    /// Resolve back to pixels for a given container width and device scale.
    pub fn to_pixels(&self, container_width: f64, scale: f64) -> PixelRect {
        PixelRect {
            left: self.left_percent * container_width / 100.0,
            top: self.top * scale,
            width: self.width_percent * container_width / 100.0,
            height: self.height * scale,
        }
    }
}

/// Snapshot of everything the transforms and packer need about the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub columns: u32,
    /// Effective container width in pixels, never zero
    pub container_width: f64,
    /// Row height in device-independent units
    pub row_height: f64,
    /// Gap in device-independent units
    pub gap: f64,
    /// Pixels per device-independent unit
    pub scale: f64,
}

impl GridMetrics {
    /// Resolve metrics for a container, substituting the fallback width for
    /// an unmeasured (`0`) container before deriving the column count.
    pub fn resolve(container_width: f64, device: DeviceClass, options: &GridOptions) -> Self {
        let width = if container_width > 0.0 {
            container_width
        } else {
            options.fallback_width
        };
        Self::from_parts(calculate_columns(width, device.is_mobile()), width, options)
    }

    /// Build metrics from an already resolved column count.
    pub fn from_parts(columns: u32, container_width: f64, options: &GridOptions) -> Self {
        let container_width = if container_width > 0.0 {
            container_width
        } else {
            options.fallback_width
        };
        Self {
            columns: columns.max(1),
            container_width,
            row_height: options.row_height,
            gap: options.gap,
            scale: options.scale,
        }
    }

    pub fn row_height_px(&self) -> f64 {
        self.row_height * self.scale
    }

    pub fn gap_px(&self) -> f64 {
        self.gap * self.scale
    }

    /// Width of a single column in pixels.
    pub fn column_width_px(&self) -> f64 {
        let columns = self.columns as f64;
        (self.container_width - self.gap_px() * (columns + 1.0)) / columns
    }

    /// Number of whole rows that fit in a viewport of the given pixel height.
    pub fn max_visible_rows(&self, viewport_height_px: f64) -> u32 {
        if !(viewport_height_px > 0.0) {
            return 0;
        }
        let rows = (viewport_height_px + self.gap_px()) / (self.row_height_px() + self.gap_px());
        rows.floor().max(0.0) as u32
    }

    /// Absolute pixel rectangle of a widget.
    pub fn to_pixel_rect(&self, widget: &Widget) -> PixelRect {
        let gap = self.gap_px();
        let col_width = self.column_width_px();
        let row_height = self.row_height_px();
        let (x, y, w, h) = (widget.x as f64, widget.y as f64, widget.w as f64, widget.h as f64);

        PixelRect {
            left: x * (col_width + gap) + gap,
            top: y * (row_height + gap) + gap,
            width: w * col_width + (w - 1.0) * gap,
            height: h * row_height + (h - 1.0) * gap,
        }
    }

    /// Viewport-relative rectangle of a widget.
    pub fn to_viewport_rect(&self, widget: &Widget) -> ViewportRect {
        let columns = self.columns as f64;
        let gap_percent = self.gap_px() / self.container_width * 100.0;
        let col_percent = (100.0 - gap_percent * (columns + 1.0)) / columns;
        let (x, y, w, h) = (widget.x as f64, widget.y as f64, widget.w as f64, widget.h as f64);

        ViewportRect {
            left_percent: x * (col_percent + gap_percent) + gap_percent,
            width_percent: w * col_percent + (w - 1.0) * gap_percent,
            top: y * (self.row_height + self.gap) + self.gap,
            height: h * self.row_height + (h - 1.0) * self.gap,
        }
    }

    /// Cell under a pixel position, rounded to the nearest cell origin.
    ///
    /// Columns clamp to `0..columns`; rows clamp at `0` only since the grid
    /// grows downward without bound.
    pub fn snap_to_cell(&self, point: DVec2) -> UVec2 {
        let gap = self.gap_px();
        let col = track_index(point.x - gap, self.column_width_px() + gap);
        let row = track_index(point.y - gap, self.row_height_px() + gap);

        let max_col = (self.columns - 1) as f64;
        UVec2::new(col.max(0.0).min(max_col) as u32, row.max(0.0) as u32)
    }

    /// Like [`snap_to_cell`](Self::snap_to_cell), but keeps a widget of width
    /// `w` entirely inside the grid.
    pub fn snap_widget(&self, point: DVec2, w: u32) -> UVec2 {
        let cell = self.snap_to_cell(point);
        let max_x = self.columns.saturating_sub(w.min(self.columns));
        UVec2::new(cell.x.min(max_x), cell.y)
    }
}

/// Nearest track for `offset` along tracks spaced `step` apart.
///
/// Gaps can swallow the whole track when the container is narrower than its
/// gaps; every point then lands on track 0.
fn track_index(offset: f64, step: f64) -> f64 {
    if step > 0.0 {
        (offset / step).round()
    } else {
        trace!(step, "collapsed track step, snapping to first track");
        0.0
    }
}
