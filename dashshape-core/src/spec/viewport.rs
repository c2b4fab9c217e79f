use dashshape_common::error::{DashShapeError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OVERSCAN: usize = 3;

/// Scroll position and geometry of a fixed-row-height list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    pub scroll_offset: f64,
    pub item_size: f64,
    pub viewport_size: f64,
    pub item_count: usize,
    #[serde(default = "default_overscan")]
    pub overscan: usize,
}

fn default_overscan() -> usize {
    DEFAULT_OVERSCAN
}

impl ViewportState {
    /// Sizes must be positive finite numbers
    pub fn validate(&self) -> Result<()> {
        validate_size("itemSize", self.item_size)?;
        validate_size("viewportSize", self.viewport_size)
    }
}

pub(crate) fn validate_size(name: &str, size: f64) -> Result<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(DashShapeError::configuration(format!(
            "{name} must be a positive number, received {size}"
        )))
    }
}

/// Fixed settings of a windowed list. Scroll offset and viewport size vary per render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfig {
    pub item_size: f64,
    #[serde(default = "default_overscan")]
    pub overscan: usize,
}

impl WindowConfig {
    pub fn try_new(item_size: f64, overscan: usize) -> Result<Self> {
        validate_size("itemSize", item_size)?;
        Ok(Self {
            item_size,
            overscan,
        })
    }

    pub fn viewport(&self, scroll_offset: f64, viewport_size: f64, item_count: usize) -> ViewportState {
        ViewportState {
            scroll_offset,
            item_size: self.item_size,
            viewport_size,
            item_count,
            overscan: self.overscan,
        }
    }
}

/// Half-open index range `[start, end)` of items to materialize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowRange {
    pub start: usize,
    pub end: usize,
}

impl WindowRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Range plus the spacer sizes needed to keep scrollbar geometry correct
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowLayout {
    pub range: WindowRange,
    /// Full scrollable extent, `item_count * item_size`
    pub total_size: f64,
    /// Pixel offset of the first rendered item
    pub offset_before: f64,
    /// Space below the last rendered item
    pub offset_after: f64,
}
