//! Core value types for grid geometry.

use std::fmt;

/// Opaque, caller-assigned widget identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WidgetId(pub String);

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        WidgetId(s.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(s: String) -> Self {
        WidgetId(s)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A size measured in whole grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSize {
    pub w: u32,
    pub h: u32,
}

impl CellSize {
    pub const ONE: CellSize = CellSize { w: 1, h: 1 };

    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::ONE
    }
}

/// Axis-aligned rectangle in grid-cell units.
///
/// `x`/`y` is the top-left cell; the rectangle covers the half-open ranges
/// `x..x + w` and `y..y + h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// First column to the right of the rectangle.
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// First row below the rectangle.
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    pub fn size(&self) -> CellSize {
        CellSize::new(self.w, self.h)
    }

    pub fn area(&self) -> u64 {
        self.size().area()
    }

    /// Two rectangles intersect unless one lies entirely to the left of,
    /// right of, above, or below the other.
    pub fn intersects(&self, other: &GridRect) -> bool {
        let separated = self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y;
        !separated
    }

    /// Check whether a cell lies inside the rectangle.
    pub fn contains_cell(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A rectangular widget placed on the grid.
///
/// The engine only ever reads `id` and `kind` and mutates the geometry
/// fields in place; everything else about a widget belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Widget {
    pub id: WidgetId,
    /// Type tag used to look up size constraints.
    pub kind: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Widget {
    /// Create an untyped widget at `(x, y)` with size `w` x `h`.
    pub fn new(id: impl Into<WidgetId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            kind: String::new(),
            x,
            y,
            w,
            h,
        }
    }

    /// Set the type tag.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }

    pub fn size(&self) -> CellSize {
        CellSize::new(self.w, self.h)
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    pub fn area(&self) -> u64 {
        self.size().area()
    }

    /// Overwrite the geometry from a rectangle.
    pub fn set_rect(&mut self, rect: GridRect) {
        self.x = rect.x;
        self.y = rect.y;
        self.w = rect.w;
        self.h = rect.h;
    }
}

/// Total vertical extent of a layout: the first row below every widget.
pub fn layout_extent(widgets: &[Widget]) -> u32 {
    widgets.iter().map(Widget::bottom).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = GridRect::new(1, 2, 3, 4);
        assert_eq!(r.right(), 4);
        assert_eq!(r.bottom(), 6);
        assert_eq!(r.area(), 12);
        assert!(r.contains_cell(1, 2));
        assert!(r.contains_cell(3, 5));
        assert!(!r.contains_cell(4, 5));
        assert!(!r.contains_cell(3, 6));
    }

    #[test]
    fn test_intersects_shared_edge_is_not_overlap() {
        let a = GridRect::new(0, 0, 2, 2);
        let right = GridRect::new(2, 0, 2, 2);
        let below = GridRect::new(0, 2, 2, 2);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(a.intersects(&GridRect::new(1, 1, 2, 2)));
    }

    #[test]
    fn test_intersects_containment() {
        let outer = GridRect::new(0, 0, 4, 4);
        let inner = GridRect::new(1, 1, 1, 1);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_widget_builder() {
        let w = Widget::new("clock", 1, 0, 2, 1).with_kind("clock");
        assert_eq!(w.id, WidgetId::from("clock"));
        assert_eq!(w.kind, "clock");
        assert_eq!(w.rect(), GridRect::new(1, 0, 2, 1));
        assert_eq!(w.right(), 3);
    }

    #[test]
    fn test_layout_extent() {
        assert_eq!(layout_extent(&[]), 0);
        let widgets = vec![
            Widget::new("a", 0, 0, 1, 3),
            Widget::new("b", 1, 2, 1, 2),
        ];
        assert_eq!(layout_extent(&widgets), 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_widget_serde_shape() {
        let w = Widget::new("notes", 0, 1, 2, 3).with_kind("notes");
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["id"], "notes");
        assert_eq!(json["h"], 3);
        let back: Widget = serde_json::from_value(json).unwrap();
        assert_eq!(back, w);
    }
}
