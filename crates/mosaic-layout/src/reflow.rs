//! Drop-triggered overlap resolution.
//!
//! Widgets are settled in reading order. Each one is pushed straight down
//! until it clears every widget settled before it, so earlier widgets never
//! move and nothing moves sideways or up.

use mosaic_core::{LayoutError, Widget, DEFAULT_REFLOW_LIMIT};
use tracing::{debug, trace, warn};

use crate::collision::overlaps;

/// Resolve overlaps with the default step ceiling.
pub fn reflow(widgets: &mut [Widget]) -> Result<(), LayoutError> {
    reflow_with_limit(widgets, DEFAULT_REFLOW_LIMIT)
}

/// Resolve overlaps, allowing each widget at most `limit` downward steps.
///
/// Exceeding the ceiling means the widget data is corrupted; widgets already
/// moved keep their new positions.
pub fn reflow_with_limit(widgets: &mut [Widget], limit: u32) -> Result<(), LayoutError> {
    let mut order: Vec<usize> = (0..widgets.len()).collect();
    order.sort_by_key(|&i| (widgets[i].y, widgets[i].x));

    let mut moved = 0usize;
    for (settled_count, &i) in order.iter().enumerate() {
        let settled = &order[..settled_count];
        let start_y = widgets[i].y;
        let mut steps = 0u32;

        while settled.iter().any(|&j| overlaps(&widgets[i], &widgets[j])) {
            if steps >= limit {
                warn!(widget = %widgets[i].id, limit, "reflow step limit exceeded");
                return Err(LayoutError::ReflowLimitExceeded {
                    widget: widgets[i].id.clone(),
                    limit,
                });
            }
            widgets[i].y += 1;
            steps += 1;
        }

        if steps > 0 {
            trace!(widget = %widgets[i].id, from = start_y, to = widgets[i].y, "pushed down");
            moved += 1;
        }
    }

    debug!(widgets = widgets.len(), moved, "reflow complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::find_overlaps;

    #[test]
    fn test_pushes_later_widget_below() {
        let mut widgets = vec![
            Widget::new("a", 0, 0, 4, 2),
            Widget::new("b", 2, 0, 4, 2),
        ];
        reflow(&mut widgets).unwrap();

        assert_eq!(widgets[0], Widget::new("a", 0, 0, 4, 2));
        assert_eq!(widgets[1].y, 2);
        assert_eq!(widgets[1].x, 2);
        assert!(!overlaps(&widgets[0], &widgets[1]));
    }

    #[test]
    fn test_reading_order_not_slice_order() {
        // "low" is first in the slice but later in reading order
        let mut widgets = vec![
            Widget::new("low", 0, 1, 2, 1),
            Widget::new("high", 0, 0, 2, 2),
        ];
        reflow(&mut widgets).unwrap();

        assert_eq!(widgets[1].y, 0);
        assert_eq!(widgets[0].y, 2);
    }

    #[test]
    fn test_cascade() {
        let mut widgets = vec![
            Widget::new("dropped", 0, 0, 2, 1),
            Widget::new("a", 0, 0, 1, 1),
            Widget::new("b", 0, 1, 2, 1),
            Widget::new("c", 1, 2, 1, 1),
        ];
        reflow(&mut widgets).unwrap();

        assert!(find_overlaps(&widgets).is_empty());
        assert_eq!(widgets[0].y, 0);
        assert_eq!(widgets[1].y, 1);
        assert_eq!(widgets[2].y, 2);
        assert_eq!(widgets[3].y, 3);
        // Nobody moved sideways
        assert_eq!(widgets.iter().map(|w| w.x).collect::<Vec<_>>(), vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_non_overlapping_untouched() {
        let original = vec![
            Widget::new("a", 0, 0, 1, 1),
            Widget::new("b", 1, 0, 1, 3),
            Widget::new("c", 0, 5, 2, 1),
        ];
        let mut widgets = original.clone();
        reflow(&mut widgets).unwrap();
        assert_eq!(widgets, original);
    }

    #[test]
    fn test_step_limit() {
        let mut widgets = vec![
            Widget::new("tall", 0, 0, 1, 10),
            Widget::new("small", 0, 0, 1, 1),
        ];
        let err = reflow_with_limit(&mut widgets, 3).unwrap_err();
        assert_eq!(
            err,
            LayoutError::ReflowLimitExceeded {
                widget: "small".into(),
                limit: 3,
            }
        );

        let mut widgets = vec![
            Widget::new("tall", 0, 0, 1, 10),
            Widget::new("small", 0, 0, 1, 1),
        ];
        reflow_with_limit(&mut widgets, 10).unwrap();
        assert_eq!(widgets[1].y, 10);
    }

    #[test]
    fn test_empty() {
        let mut widgets: Vec<Widget> = Vec::new();
        reflow(&mut widgets).unwrap();
    }
}
