//! Column count resolution from container width.

use mosaic_core::{DeviceClass, FALLBACK_CONTAINER_WIDTH};
use tracing::debug;

/// Containers narrower than this get two columns.
const TWO_COLUMN_MAX_WIDTH: f64 = 370.0;

/// Containers narrower than this (and at least [`TWO_COLUMN_MAX_WIDTH`]) get three.
const THREE_COLUMN_MAX_WIDTH: f64 = 450.0;

/// Derive the column count for a container.
///
/// Mobile devices always get two columns regardless of container width.
pub fn calculate_columns(container_width: f64, is_mobile: bool) -> u32 {
    if is_mobile || container_width < TWO_COLUMN_MAX_WIDTH {
        2
    } else if container_width < THREE_COLUMN_MAX_WIDTH {
        3
    } else {
        4
    }
}

/// A change in the resolved column count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnChange {
    pub new_columns: u32,
    pub old_columns: u32,
    /// Effective container width that produced `new_columns`
    pub container_width: f64,
}

/// Callback invoked synchronously when the column count changes.
pub type ColumnListener = Box<dyn FnMut(ColumnChange)>;

/// Tracks the container width and the column count derived from it.
pub struct ColumnResolver {
    container_width: f64,
    device: DeviceClass,
    fallback_width: f64,
    columns: u32,
    listener: Option<ColumnListener>,
}

impl std::fmt::Debug for ColumnResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnResolver")
            .field("container_width", &self.container_width)
            .field("device", &self.device)
            .field("columns", &self.columns)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl ColumnResolver {
    /// Create a resolver for an unmeasured container.
    pub fn new(device: DeviceClass) -> Self {
        Self::with_fallback_width(device, FALLBACK_CONTAINER_WIDTH)
    }

    /// Create a resolver with a custom width for the unmeasured state.
    pub fn with_fallback_width(device: DeviceClass, fallback_width: f64) -> Self {
        let mut resolver = Self {
            container_width: 0.0,
            device,
            fallback_width,
            columns: 0,
            listener: None,
        };
        resolver.columns = resolver.resolve();
        resolver
    }

    /// Register the column-change callback, replacing any previous one.
    pub fn set_listener(&mut self, listener: ColumnListener) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Width as last reported by the caller, `0` while unmeasured.
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Width used for arithmetic: the fallback replaces an unmeasured width.
    pub fn effective_width(&self) -> f64 {
        if self.container_width > 0.0 {
            self.container_width
        } else {
            self.fallback_width
        }
    }

    fn resolve(&self) -> u32 {
        calculate_columns(self.effective_width(), self.device.is_mobile())
    }

    /// Store a new container width and recompute the column count.
    ///
    /// Returns `true` and notifies the listener when the count changed.
    pub fn set_container_width(&mut self, width: f64) -> bool {
        self.container_width = width;
        self.update()
    }

    /// Change the device class (e.g. after a screen rotation).
    pub fn set_device_class(&mut self, device: DeviceClass) -> bool {
        self.device = device;
        self.update()
    }

    fn update(&mut self) -> bool {
        let old_columns = self.columns;
        let new_columns = self.resolve();
        if new_columns == old_columns {
            return false;
        }
        self.columns = new_columns;

        let change = ColumnChange {
            new_columns,
            old_columns,
            container_width: self.effective_width(),
        };
        debug!(new_columns, old_columns, width = change.container_width, "column count changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(change);
        }
        true
    }
}
