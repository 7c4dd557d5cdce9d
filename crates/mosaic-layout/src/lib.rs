//! Responsive grid layout for Mosaic widgets.
//!
//! This crate positions rectangular widgets on an integer-celled grid whose
//! column count follows the container width.
//!
//! # Architecture
//!
//! 1. **Column resolution**: Derives 2, 3, or 4 columns from container width and device class
//! 2. **Coordinate transforms**: Grid cells to pixels, to viewport-relative units, and back
//! 3. **Collision detection**: Axis-aligned overlap tests between widgets
//! 4. **Reflow**: Pushes widgets down after an interactive drop until nothing overlaps
//! 5. **Auto-layout**: Bulk repacking via ordering, placement, compaction, and expansion
//!
//! # Example
//!
//! ```ignore
//! use mosaic_layout::{GridEngine, PackOrder, Unconstrained};
//!
//! let mut engine = GridEngine::new(GridOptions::default(), DeviceClass::Desktop)?;
//! engine.set_container_width(900.0);
//! engine.auto_layout(&mut widgets, &Unconstrained, 720.0, PackOrder::AreaDescending)?;
//!
//! for widget in &widgets {
//!     println!("{}: {:?}", widget.id, engine.to_viewport_rect(widget));
//! }
//! ```

mod auto_layout;
mod collision;
mod columns;
mod constraints;
mod engine;
mod occupancy;
mod reflow;
mod transform;

pub use auto_layout::{AutoLayout, PackOrder};
pub use collision::{any_collision, find_overlaps, overlaps};
pub use columns::{calculate_columns, ColumnChange, ColumnListener, ColumnResolver};
pub use constraints::{ConstraintTable, MaxAutoSize, SizeConstraint, SizeConstraints, Unconstrained};
pub use engine::{GridEngine, LayoutContext};
pub use reflow::{reflow, reflow_with_limit};
pub use transform::{GridMetrics, PixelRect, ViewportRect};

pub use mosaic_core::{layout_extent, CellSize, GridRect, LayoutError, Widget, WidgetId};
