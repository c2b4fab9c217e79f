//! Viewport math for rendering only the visible slice of a long list.
use dashshape_common::error::{Result, ResultWithContext};
use dashshape_core::spec::viewport::{ViewportState, WindowConfig, WindowLayout, WindowRange};

/// Index range to materialize for the current scroll position, including overscan.
///
/// Always satisfies `0 <= start <= end <= item_count`. Negative or non-finite scroll
/// offsets are treated as 0. Non-positive sizes are configuration errors.
pub fn compute_range(viewport: &ViewportState) -> Result<WindowRange> {
    viewport.validate()?;

    let offset = if viewport.scroll_offset.is_finite() && viewport.scroll_offset > 0.0 {
        viewport.scroll_offset
    } else {
        0.0
    };
    let raw_start = (offset / viewport.item_size).floor() as usize;
    let raw_end = ((offset + viewport.viewport_size) / viewport.item_size).ceil() as usize;

    let end = raw_end
        .saturating_add(viewport.overscan)
        .min(viewport.item_count);
    let start = raw_start.saturating_sub(viewport.overscan).min(end);

    log::trace!(
        "Window for offset {offset} over {} items: [{start}, {end})",
        viewport.item_count
    );
    Ok(WindowRange { start, end })
}

/// Range plus spacer geometry, so the scrollbar reflects the full list
pub fn compute_layout(viewport: &ViewportState) -> Result<WindowLayout> {
    let range = compute_range(viewport)?;
    let item_size = viewport.item_size;
    Ok(WindowLayout {
        range,
        total_size: viewport.item_count as f64 * item_size,
        offset_before: range.start as f64 * item_size,
        offset_after: (viewport.item_count - range.end) as f64 * item_size,
    })
}

/// What a list should render for the current scroll position
#[derive(Debug, Clone, PartialEq)]
pub enum WindowedList<'a, T> {
    /// No items at all. Render an empty-state placeholder instead of the list.
    Empty,
    Slice {
        items: &'a [T],
        layout: WindowLayout,
    },
}

impl<'a, T> WindowedList<'a, T> {
    /// Visible items paired with their absolute index in the full list
    pub fn indexed(&self) -> Vec<(usize, &'a T)> {
        match self {
            WindowedList::Empty => Vec::new(),
            WindowedList::Slice { items, layout } => items
                .iter()
                .enumerate()
                .map(|(i, item)| (layout.range.start + i, item))
                .collect(),
        }
    }
}

/// Windower bound to a fixed item size and overscan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Windower {
    config: WindowConfig,
}

impl Windower {
    pub fn try_new(config: WindowConfig) -> Result<Self> {
        let config = WindowConfig::try_new(config.item_size, config.overscan)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn window<'a, T>(
        &self,
        items: &'a [T],
        scroll_offset: f64,
        viewport_size: f64,
    ) -> Result<WindowedList<'a, T>> {
        let viewport = self
            .config
            .viewport(scroll_offset, viewport_size, items.len());
        let layout = compute_layout(&viewport)
            .with_context(|| format!("Failed to window list of {} items", items.len()))?;
        if items.is_empty() {
            return Ok(WindowedList::Empty);
        }
        Ok(WindowedList::Slice {
            items: &items[layout.range.start..layout.range.end],
            layout,
        })
    }
}
