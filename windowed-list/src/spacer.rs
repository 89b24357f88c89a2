//! Leading/trailing filler sizes that keep the total scrollable extent constant.

/// Spacer sizes around a materialized `[start, end]` window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spacers {
    pub pad_top: u64,
    pub pad_bottom: u64,
}

/// Computes the spacers for an inclusive `[start_index, end_index]` window.
///
/// `pad_top + (end - start + 1) * row_height + pad_bottom == item_count * row_height` for any
/// in-bounds window. With `item_count == 0` both spacers are zero.
pub fn spacers(item_count: usize, row_height: u32, start_index: usize, end_index: usize) -> Spacers {
    if item_count == 0 {
        return Spacers::default();
    }
    let max_index = item_count - 1;
    debug_assert!(
        start_index <= end_index && end_index <= max_index,
        "window out of bounds (start={start_index}, end={end_index}, max={max_index})"
    );
    let end_index = end_index.min(max_index);
    let start_index = start_index.min(end_index);

    Spacers {
        pad_top: extent_of_rows(start_index, row_height),
        pad_bottom: extent_of_rows(max_index - end_index, row_height),
    }
}

/// Height the whole collection would occupy if every row were rendered.
pub fn total_extent(item_count: usize, row_height: u32) -> u64 {
    extent_of_rows(item_count, row_height)
}

/// Start offset of the row at `index`.
pub fn row_start(index: usize, row_height: u32) -> u64 {
    extent_of_rows(index, row_height)
}

fn extent_of_rows(rows: usize, row_height: u32) -> u64 {
    (rows as u64).saturating_mul(row_height as u64)
}
