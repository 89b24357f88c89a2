//! Viewport-driven index windowing for uniform-height rows.
//!
//! Uniform row height makes the offset → index mapping a single division, so every function
//! here is `O(1)` in the collection size and never touches the items themselves.

use core::ops::RangeInclusive;

use crate::spacer::{Spacers, spacers};
use crate::{Overscan, ViewportState, Window};

/// Maps viewport geometry to the window of rows to materialize.
///
/// Returns [`Window::DEGENERATE`] when `item_count`, `row_height`, or `viewport_height` is zero.
/// `scroll_offset` past the content extent (overscroll bounce, a collection that just shrank) is
/// tolerated: the window clamps to the last row, and the offset itself is left untouched.
pub fn compute_window(
    item_count: usize,
    row_height: u32,
    scroll_offset: u64,
    viewport_height: u32,
    overscan: impl Into<Overscan>,
) -> Window {
    if item_count == 0 || row_height == 0 || viewport_height == 0 {
        wtrace!(
            item_count,
            row_height,
            viewport_height,
            "compute_window: degenerate"
        );
        return Window::DEGENERATE;
    }

    let overscan = overscan.into();
    let max_index = item_count - 1;
    let estimated_start = estimated_start(scroll_offset, row_height);
    let estimated_visible = viewport_height.div_ceil(row_height) as usize;

    let start_index = estimated_start
        .saturating_sub(overscan.before)
        .min(max_index);
    let end_index = estimated_start
        .saturating_add(estimated_visible)
        .saturating_add(overscan.after)
        .min(max_index);

    let Spacers {
        pad_top,
        pad_bottom,
    } = spacers(item_count, row_height, start_index, end_index);

    Window {
        start_index,
        end_index,
        pad_top,
        pad_bottom,
        degenerate: false,
    }
}

/// Same as [`compute_window`], reading scroll offset and height from a [`ViewportState`].
pub fn compute_window_for(
    item_count: usize,
    row_height: u32,
    viewport: ViewportState,
    overscan: impl Into<Overscan>,
) -> Window {
    compute_window(
        item_count,
        row_height,
        viewport.scroll_offset,
        viewport.viewport_height,
        overscan,
    )
}

/// Rows that intersect the viewport, without overscan.
///
/// Returns `None` for degenerate geometry.
pub fn visible_rows(
    item_count: usize,
    row_height: u32,
    viewport: ViewportState,
) -> Option<RangeInclusive<usize>> {
    if item_count == 0 || row_height == 0 || viewport.viewport_height == 0 {
        return None;
    }
    let max_index = item_count - 1;
    let first = estimated_start(viewport.scroll_offset, row_height).min(max_index);
    let last = estimated_start(viewport.scroll_end().saturating_sub(1), row_height)
        .clamp(first, max_index);
    Some(first..=last)
}

/// Index of the row covering `offset`, clamped to the last row.
pub fn index_at_offset(item_count: usize, row_height: u32, offset: u64) -> Option<usize> {
    if item_count == 0 || row_height == 0 {
        return None;
    }
    Some(estimated_start(offset, row_height).min(item_count - 1))
}

fn estimated_start(scroll_offset: u64, row_height: u32) -> usize {
    let rows = scroll_offset / row_height as u64;
    usize::try_from(rows).unwrap_or(usize::MAX)
}
