//! Axis-aligned overlap tests between widgets.

use mosaic_core::Widget;

/// Check whether two widgets overlap.
///
/// Widgets sharing an id are the same widget and never overlap.
pub fn overlaps(a: &Widget, b: &Widget) -> bool {
    a.id != b.id && a.rect().intersects(&b.rect())
}

/// Check whether `widget` overlaps any widget in `others`.
pub fn any_collision<'a, I>(widget: &Widget, others: I) -> bool
where
    I: IntoIterator<Item = &'a Widget>,
{
    others.into_iter().any(|other| overlaps(widget, other))
}

/// Index pairs `(i, j)` with `i < j` of all overlapping widgets.
pub fn find_overlaps(widgets: &[Widget]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in widgets.iter().enumerate() {
        for (j, b) in widgets.iter().enumerate().skip(i + 1) {
            if overlaps(a, b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
