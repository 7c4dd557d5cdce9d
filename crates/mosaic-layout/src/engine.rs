//! Engine facade tying configuration, column resolution, and the layout
//! passes together.

use glam::{DVec2, UVec2};
use mosaic_core::{ConfigError, DeviceClass, GridOptions, LayoutError, Widget};
use tracing::debug;

use crate::auto_layout::{AutoLayout, PackOrder};
use crate::columns::{ColumnChange, ColumnResolver};
use crate::constraints::SizeConstraints;
use crate::reflow::reflow_with_limit;
use crate::transform::{GridMetrics, PixelRect, ViewportRect};

/// Metrics and options handed to the column-change callback.
///
/// Owns copies of both so the callback can run a layout configured exactly
/// like [`GridEngine::packer`] without borrowing the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutContext {
    pub metrics: GridMetrics,
    pub options: GridOptions,
}

impl LayoutContext {
    pub fn new(metrics: GridMetrics, options: GridOptions) -> Self {
        Self { metrics, options }
    }

    /// Auto-layout honoring the configured search ceiling and narrowing row.
    pub fn packer(&self, viewport_height_px: f64, order: PackOrder) -> AutoLayout {
        AutoLayout::from_metrics(&self.metrics, viewport_height_px)
            .with_order(order)
            .with_search_limit(self.options.search_limit)
            .with_shrink_row_threshold(self.options.shrink_row_threshold)
    }
}

/// A responsive grid bound to one container.
///
/// All operations are synchronous and expect to be called serially from the
/// UI event loop. Widget collections are borrowed per call and never stored.
#[derive(Debug)]
pub struct GridEngine {
    options: GridOptions,
    resolver: ColumnResolver,
}

impl GridEngine {
    /// Create an engine for an unmeasured container.
    pub fn new(options: GridOptions, device: DeviceClass) -> Result<Self, ConfigError> {
        options.validate()?;
        let resolver = ColumnResolver::with_fallback_width(device, options.fallback_width);
        Ok(Self { options, resolver })
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn columns(&self) -> u32 {
        self.resolver.columns()
    }

    pub fn device(&self) -> DeviceClass {
        self.resolver.device()
    }

    /// Current metrics snapshot.
    pub fn metrics(&self) -> GridMetrics {
        GridMetrics::from_parts(self.resolver.columns(), self.resolver.effective_width(), &self.options)
    }

    pub fn context(&self) -> LayoutContext {
        LayoutContext::new(self.metrics(), self.options.clone())
    }

    /// Register the column-change callback.
    ///
    /// The callback runs synchronously inside [`set_container_width`] and
    /// [`set_device_class`] and receives a [`LayoutContext`] for the new
    /// column count, so it can run a full auto-layout over the widgets it
    /// owns before the setter returns.
    ///
    /// [`set_container_width`]: Self::set_container_width
    /// [`set_device_class`]: Self::set_device_class
    pub fn on_columns_changed<F>(&mut self, mut callback: F)
    where
        F: FnMut(ColumnChange, &LayoutContext) + 'static,
    {
        let options = self.options.clone();
        self.resolver.set_listener(Box::new(move |change: ColumnChange| {
            let metrics = GridMetrics::from_parts(change.new_columns, change.container_width, &options);
            callback(change, &LayoutContext::new(metrics, options.clone()));
        }));
    }

    /// Update the container width; returns `true` if the column count changed.
    pub fn set_container_width(&mut self, width: f64) -> bool {
        self.resolver.set_container_width(width)
    }

    /// Update the device class; returns `true` if the column count changed.
    pub fn set_device_class(&mut self, device: DeviceClass) -> bool {
        self.resolver.set_device_class(device)
    }

    pub fn to_pixel_rect(&self, widget: &Widget) -> PixelRect {
        self.metrics().to_pixel_rect(widget)
    }

    pub fn to_viewport_rect(&self, widget: &Widget) -> ViewportRect {
        self.metrics().to_viewport_rect(widget)
    }

    pub fn snap_to_cell(&self, point: DVec2) -> UVec2 {
        self.metrics().snap_to_cell(point)
    }

    pub fn snap_widget(&self, point: DVec2, w: u32) -> UVec2 {
        self.metrics().snap_widget(point, w)
    }

    pub fn max_visible_rows(&self, viewport_height_px: f64) -> u32 {
        self.metrics().max_visible_rows(viewport_height_px)
    }

    /// Resolve overlaps after an interactive drop.
    pub fn reflow(&self, widgets: &mut [Widget]) -> Result<(), LayoutError> {
        reflow_with_limit(widgets, self.options.reflow_limit)
    }

    /// Auto-layout configured from the current metrics and options.
    pub fn packer(&self, viewport_height_px: f64, order: PackOrder) -> AutoLayout {
        self.context().packer(viewport_height_px, order)
    }

    /// Repack every widget for the current column count.
    pub fn auto_layout<C>(
        &self,
        widgets: &mut [Widget],
        constraints: &C,
        viewport_height_px: f64,
        order: PackOrder,
    ) -> Result<(), LayoutError>
    where
        C: SizeConstraints + ?Sized,
    {
        self.packer(viewport_height_px, order).layout(widgets, constraints)
    }

    /// Fit an existing layout to the current column count without repacking.
    ///
    /// Widths are clamped to the column count (ignoring kind minimums),
    /// widgets are pulled left until they fit, and the result is reflowed.
    pub fn renormalize(&self, widgets: &mut [Widget]) -> Result<(), LayoutError> {
        let columns = self.columns();
        let mut adjusted = 0usize;
        for widget in widgets.iter_mut() {
            let w = widget.w.clamp(1, columns);
            let x = widget.x.min(columns - w);
            if (w, x) != (widget.w, widget.x) {
                widget.w = w;
                widget.x = x;
                adjusted += 1;
            }
        }
        debug!(columns, adjusted, "renormalized widgets");
        self.reflow(widgets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::find_overlaps;
    use crate::constraints::{ConstraintTable, SizeConstraint, Unconstrained};
    use mosaic_core::CellSize;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine() -> GridEngine {
        GridEngine::new(GridOptions::default(), DeviceClass::Desktop).unwrap()
    }

    #[test]
    fn test_rejects_invalid_options() {
        let err = GridEngine::new(GridOptions::default().with_row_height(-1.0), DeviceClass::Desktop)
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidRowHeight(-1.0));
    }

    #[test]
    fn test_unmeasured_engine_is_usable() {
        let engine = engine();
        assert_eq!(engine.columns(), 2);
        let rect = engine.to_pixel_rect(&Widget::new("w", 1, 1, 1, 1));
        assert!(rect.left.is_finite() && rect.top.is_finite());
    }

    #[test]
    fn test_set_container_width() {
        let mut engine = engine();
        assert!(engine.set_container_width(900.0));
        assert_eq!(engine.columns(), 4);
        assert!(!engine.set_container_width(950.0));
        assert!(engine.set_container_width(0.0));
        assert_eq!(engine.columns(), 2);
    }

    #[test]
    fn test_callback_runs_nested_auto_layout() {
        let widgets = Rc::new(RefCell::new(vec![
            Widget::new("a", 0, 0, 4, 1),
            Widget::new("b", 0, 1, 2, 2),
            Widget::new("c", 2, 1, 2, 2),
        ]));
        let changes = Rc::new(RefCell::new(Vec::new()));

        let mut engine = engine();
        engine.set_container_width(900.0);

        let owned = Rc::clone(&widgets);
        let seen = Rc::clone(&changes);
        engine.on_columns_changed(move |change, ctx| {
            seen.borrow_mut().push((change.new_columns, change.old_columns));
            assert_eq!(ctx.metrics.columns, change.new_columns);
            ctx.packer(600.0, PackOrder::AreaDescending)
                .layout(&mut owned.borrow_mut(), &Unconstrained)
                .unwrap();
        });

        assert!(engine.set_container_width(360.0));
        assert_eq!(*changes.borrow(), vec![(2, 4)]);

        // Layout already happened by the time the setter returned
        let widgets = widgets.borrow();
        assert!(widgets.iter().all(|w| w.right() <= 2));
        assert!(find_overlaps(&widgets).is_empty());
    }

    #[test]
    fn test_callback_layout_uses_engine_limits() {
        let options = GridOptions::default().with_search_limit(2);
        let mut engine = GridEngine::new(options, DeviceClass::Desktop).unwrap();
        engine.set_container_width(900.0);

        let widgets = Rc::new(RefCell::new(vec![
            Widget::new("one", 0, 0, 2, 1),
            Widget::new("two", 2, 0, 2, 1),
            Widget::new("three", 0, 1, 2, 1),
        ]));
        let outcome = Rc::new(RefCell::new(None));

        let owned = Rc::clone(&widgets);
        let result = Rc::clone(&outcome);
        engine.on_columns_changed(move |_, ctx| {
            assert_eq!(ctx.options.search_limit, 2);
            let laid_out = ctx
                .packer(600.0, PackOrder::Preserve)
                .layout(&mut owned.borrow_mut(), &Unconstrained);
            *result.borrow_mut() = Some(laid_out);
        });

        assert!(engine.set_container_width(360.0));
        // Three full-width rows do not fit in a two-row search
        assert!(matches!(
            outcome.borrow().as_ref(),
            Some(Err(LayoutError::NoFreeCell { limit: 2, .. }))
        ));
    }

    #[test]
    fn test_auto_layout_uses_viewport() {
        let mut engine = engine();
        engine.set_container_width(900.0);
        let mut widgets = vec![Widget::new("only", 3, 9, 1, 1)];
        // (200 + 8) / 68 = 3 visible rows
        engine
            .auto_layout(&mut widgets, &Unconstrained, 200.0, PackOrder::AreaDescending)
            .unwrap();
        assert_eq!(widgets[0].rect(), mosaic_core::GridRect::new(0, 0, 4, 3));
    }

    #[test]
    fn test_renormalize_after_column_decrease() {
        let mut engine = engine();
        engine.set_container_width(900.0);
        let mut widgets = vec![
            Widget::new("left", 0, 0, 2, 1),
            Widget::new("right", 2, 0, 2, 1),
            Widget::new("wide", 1, 1, 3, 1),
        ];

        engine.set_container_width(360.0);
        engine.renormalize(&mut widgets).unwrap();

        assert!(widgets.iter().all(|w| w.right() <= 2));
        assert!(find_overlaps(&widgets).is_empty());
        assert_eq!(widgets[0].rect(), mosaic_core::GridRect::new(0, 0, 2, 1));
        assert_eq!(widgets[1].rect(), mosaic_core::GridRect::new(0, 1, 2, 1));
        assert_eq!(widgets[2].rect(), mosaic_core::GridRect::new(0, 2, 2, 1));
    }

    #[test]
    fn test_column_decrease_breaks_min_width() {
        // A kind whose minimum is wider than the new grid is clamped to fit
        let table = ConstraintTable::new().with("chart", SizeConstraint::new(CellSize::new(3, 2)));
        let mut engine = engine();
        engine.set_container_width(900.0);
        let mut widgets = vec![Widget::new("chart", 1, 0, 3, 2).with_kind("chart")];

        engine.set_container_width(300.0);
        engine.renormalize(&mut widgets).unwrap();
        assert_eq!(widgets[0].rect(), mosaic_core::GridRect::new(0, 0, 2, 2));

        engine
            .auto_layout(&mut widgets, &table, 0.0, PackOrder::Preserve)
            .unwrap();
        assert_eq!(widgets[0].w, 2);
        assert!(widgets[0].w < table.min_size("chart").w);
    }

    #[test]
    fn test_reflow_uses_configured_limit() {
        let engine = GridEngine::new(GridOptions::default().with_reflow_limit(2), DeviceClass::Desktop).unwrap();
        let mut widgets = vec![
            Widget::new("tall", 0, 0, 1, 5),
            Widget::new("dropped", 0, 0, 1, 1),
        ];
        assert!(matches!(
            engine.reflow(&mut widgets),
            Err(LayoutError::ReflowLimitExceeded { limit: 2, .. })
        ));
    }

    #[test]
    fn test_drag_round_trip() {
        let mut engine = engine();
        engine.set_container_width(1024.0);
        let widget = Widget::new("w", 2, 3, 2, 2);
        let origin = engine.to_pixel_rect(&widget).origin();
        assert_eq!(engine.snap_to_cell(origin), UVec2::new(2, 3));
        assert_eq!(engine.snap_to_cell(DVec2::new(-50.0, -50.0)), UVec2::ZERO);
    }
}
