//! Bulk repacking of a widget collection.
//!
//! Runs four passes over an occupancy map:
//! 1. **Ordering**: caller order, or largest area first
//! 2. **Placement**: first free origin in reading order, trading width for
//!    height when a widget would land far down the grid
//! 3. **Compaction**: slide every widget up into vertical gaps
//! 4. **Expansion**: grow widgets into free space, height before width

use mosaic_core::{layout_extent, GridRect, LayoutError, Widget, DEFAULT_SEARCH_LIMIT, DEFAULT_SHRINK_ROW_THRESHOLD};
use tracing::{debug, trace, warn};

use crate::collision::find_overlaps;
use crate::constraints::SizeConstraints;
use crate::occupancy::OccupancyMap;
use crate::transform::GridMetrics;

/// Order in which widgets are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackOrder {
    /// Keep the caller's order (for meaningful groupings)
    Preserve,
    /// Largest area first, taller first on ties
    #[default]
    AreaDescending,
}

/// Auto-layout configuration.
#[derive(Debug, Clone)]
pub struct AutoLayout {
    /// Column count of the grid
    pub columns: u32,
    /// Rows visible without scrolling; expansion never grows past it
    pub max_visible_rows: u32,
    /// Placement order
    pub order: PackOrder,
    /// Ceiling on rows scanned per free-cell search
    pub search_limit: u32,
    /// Placements starting below this row retry with narrower widths
    pub shrink_row_threshold: u32,
}

impl AutoLayout {
    /// Create a layout for a grid with the given column count.
    pub fn new(columns: u32) -> Self {
        Self {
            columns: columns.max(1),
            max_visible_rows: 0,
            order: PackOrder::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            shrink_row_threshold: DEFAULT_SHRINK_ROW_THRESHOLD,
        }
    }

    /// Create a layout for resolved grid metrics and a viewport height.
    pub fn from_metrics(metrics: &GridMetrics, viewport_height_px: f64) -> Self {
        Self::new(metrics.columns).with_max_visible_rows(metrics.max_visible_rows(viewport_height_px))
    }

    /// Set the visible row ceiling.
    pub fn with_max_visible_rows(mut self, rows: u32) -> Self {
        self.max_visible_rows = rows;
        self
    }

    /// Set the placement order.
    pub fn with_order(mut self, order: PackOrder) -> Self {
        self.order = order;
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

    /// Repack `widgets` in place.
    ///
    /// When the incoming arrangement is already valid it is also compacted
    /// and expanded in place, and kept if that ends shorter than the full
    /// repack. Running the layout on its own output therefore never
    /// increases the vertical extent.
    ///
    /// On error the widgets may be partially rearranged and should be
    /// replaced by a default layout.
    pub fn layout<C>(&self, widgets: &mut [Widget], constraints: &C) -> Result<(), LayoutError>
    where
        C: SizeConstraints + ?Sized,
    {
        if widgets.is_empty() {
            return Ok(());
        }

        let min_widths = self.normalize_sizes(widgets, constraints)?;
        let existing = self
            .is_valid_arrangement(widgets)
            .then(|| widgets.iter().map(Widget::rect).collect::<Vec<_>>());

        self.repack(widgets, &min_widths, constraints)?;
        let repacked_extent = layout_extent(widgets);

        if let Some(existing) = existing {
            let repacked: Vec<GridRect> = widgets.iter().map(Widget::rect).collect();
            for (widget, rect) in widgets.iter_mut().zip(&existing) {
                widget.set_rect(*rect);
            }
            self.settle_in_place(widgets, constraints);

            let settled_extent = layout_extent(widgets);
            if settled_extent < repacked_extent {
                debug!(settled_extent, repacked_extent, "kept existing arrangement");
            } else {
                for (widget, rect) in widgets.iter_mut().zip(&repacked) {
                    widget.set_rect(*rect);
                }
            }
        }

        debug!(
            extent = layout_extent(widgets),
            max_visible_rows = self.max_visible_rows,
            "auto-layout complete"
        );
        Ok(())
    }

    /// Full four-pass repack from an empty grid.
    fn repack<C>(&self, widgets: &mut [Widget], min_widths: &[u32], constraints: &C) -> Result<(), LayoutError>
    where
        C: SizeConstraints + ?Sized,
    {
        let order = self.placement_order(widgets);

        let mut map = OccupancyMap::new(self.columns);
        for &i in &order {
            let rect = self.place(&map, &widgets[i], min_widths[i])?;
            map.occupy(&rect);
            widgets[i].set_rect(rect);
        }
        debug!(widgets = widgets.len(), extent = layout_extent(widgets), "placement done");

        self.compact(widgets, &mut map);
        debug!(extent = layout_extent(widgets), "compaction done");

        self.expand(widgets, &mut map, constraints);
        Ok(())
    }

    /// Compaction and expansion over the current positions.
    ///
    /// Compaction only moves widgets up and expansion only grows height up
    /// to `max_visible_rows`, so the extent never exceeds the larger of the
    /// two. On an arrangement produced by [`layout`](Self::layout) this is a
    /// no-op.
    fn settle_in_place<C>(&self, widgets: &mut [Widget], constraints: &C)
    where
        C: SizeConstraints + ?Sized,
    {
        let mut map = OccupancyMap::new(self.columns);
        for widget in widgets.iter() {
            map.occupy(&widget.rect());
        }
        self.compact(widgets, &mut map);
        self.expand(widgets, &mut map, constraints);
    }

    /// Widgets fit inside the columns and nothing overlaps.
    fn is_valid_arrangement(&self, widgets: &[Widget]) -> bool {
        widgets.iter().all(|w| w.x.saturating_add(w.w) <= self.columns) && find_overlaps(widgets).is_empty()
    }

    /// Clamp every widget into `[min, columns]` and return the minimum width
    /// each may shrink to during placement.
    ///
    /// Width is clamped to the column count even when the kind's minimum is
    /// wider; a narrow grid wins over the minimum.
    fn normalize_sizes<C>(&self, widgets: &mut [Widget], constraints: &C) -> Result<Vec<u32>, LayoutError>
    where
        C: SizeConstraints + ?Sized,
    {
        widgets
            .iter_mut()
            .map(|widget| {
                let min = constraints.min_size(&widget.kind);
                let min_w = min.w.clamp(1, self.columns);

                widget.w = widget.w.max(min_w).min(self.columns);
                widget.h = widget.h.max(min.h).max(1);

                if widget.h > self.search_limit {
                    warn!(widget = %widget.id, h = widget.h, "degenerate widget height");
                    return Err(LayoutError::DegenerateSize {
                        widget: widget.id.clone(),
                        w: widget.w,
                        h: widget.h,
                    });
                }
                Ok(min_w.min(widget.w))
            })
            .collect()
    }

    fn placement_order(&self, widgets: &[Widget]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..widgets.len()).collect();
        if self.order == PackOrder::AreaDescending {
            order.sort_by(|&a, &b| {
                widgets[b]
                    .area()
                    .cmp(&widgets[a].area())
                    .then(widgets[b].h.cmp(&widgets[a].h))
            });
        }
        order
    }

    /// First free origin for a `w` x `h` footprint in reading order.
    fn first_fit(&self, map: &OccupancyMap, w: u32, h: u32) -> Option<GridRect> {
        let columns = map.columns();
        if w > columns {
            return None;
        }
        (0..self.search_limit)
            .flat_map(|y| (0..=columns - w).map(move |x| GridRect::new(x, y, w, h)))
            .find(|rect| map.is_free(rect))
    }

    fn place(&self, map: &OccupancyMap, widget: &Widget, min_w: u32) -> Result<GridRect, LayoutError> {
        let mut best = self
            .first_fit(map, widget.w, widget.h)
            .ok_or_else(|| LayoutError::NoFreeCell {
                widget: widget.id.clone(),
                limit: self.search_limit,
            })?;

        if best.y > self.shrink_row_threshold {
            for w in (min_w..widget.w).rev() {
                if let Some(candidate) = self.first_fit(map, w, widget.h) {
                    if candidate.y < best.y {
                        best = candidate;
                    }
                }
            }
            if best.w != widget.w {
                trace!(widget = %widget.id, from = widget.w, to = best.w, row = best.y, "narrowed to land earlier");
            }
        }
        Ok(best)
    }

    fn compact(&self, widgets: &mut [Widget], map: &mut OccupancyMap) {
        let mut order: Vec<usize> = (0..widgets.len()).collect();
        order.sort_by_key(|&i| widgets[i].y);

        for i in order {
            let rect = widgets[i].rect();
            map.release(&rect);

            let target = (0..rect.y)
                .map(|y| GridRect { y, ..rect })
                .find(|candidate| map.is_free(candidate))
                .unwrap_or(rect);

            map.occupy(&target);
            if target.y != rect.y {
                trace!(widget = %widgets[i].id, from = rect.y, to = target.y, "compacted");
                widgets[i].y = target.y;
            }
        }
    }

    fn expand<C>(&self, widgets: &mut [Widget], map: &mut OccupancyMap, constraints: &C)
    where
        C: SizeConstraints + ?Sized,
    {
        let mut order: Vec<usize> = (0..widgets.len()).collect();
        order.sort_by_key(|&i| (widgets[i].y, widgets[i].x));

        let row_ceiling = self.max_visible_rows.min(self.search_limit);
        for i in order {
            let max = constraints.max_auto_size(&widgets[i].kind, self.columns);
            let max_w = max.map_or(self.columns, |m| m.w.min(self.columns));
            let max_h = max.map_or(u32::MAX, |m| m.h);
            let mut rect = widgets[i].rect();

            while rect.h < max_h && rect.bottom() < row_ceiling {
                let next_row = GridRect::new(rect.x, rect.bottom(), rect.w, 1);
                if !map.is_free(&next_row) {
                    break;
                }
                map.occupy(&next_row);
                rect.h += 1;
            }

            while rect.w < max_w && rect.right() < self.columns {
                let next_column = GridRect::new(rect.right(), rect.y, 1, rect.h);
                if !map.is_free(&next_column) {
                    break;
                }
                map.occupy(&next_column);
                rect.w += 1;
            }

            if rect != widgets[i].rect() {
                trace!(widget = %widgets[i].id, w = rect.w, h = rect.h, "expanded");
                widgets[i].set_rect(rect);
            }
        }
    }
}
