use core::fmt;

use windowed_list::{ScrollContainer, ScrollTo, WindowedList, row_start, visible_rows};

/// A scroll anchor that keeps an item visually steady across collection changes.
///
/// Typical use cases:
/// - a filter or sort that moves the row the user was looking at
/// - loading older entries above the current position without the content jumping
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// The distance from the anchor row's start to the viewport's scroll offset.
    pub offset_in_row: u64,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("offset_in_row", &self.offset_in_row)
            .finish()
    }
}

/// Captures an anchor for the first visible row of `items` (by key).
///
/// Returns `None` if the list is detached or disabled, or if nothing is visible.
pub fn capture_first_visible_anchor<C: ScrollContainer, T, K>(
    list: &WindowedList<C>,
    items: &[T],
    key_of: impl FnOnce(&T) -> K,
) -> Option<ScrollAnchor<K>> {
    if !list.enabled() {
        return None;
    }
    let viewport = list.viewport()?;
    let row_height = list.row_height();
    let index = *visible_rows(items.len(), row_height, viewport)?.start();
    let item = items.get(index)?;
    let start = row_start(index, row_height);
    Some(ScrollAnchor {
        key: key_of(item),
        offset_in_row: viewport.scroll_offset.saturating_sub(start),
    })
}

/// Computes the scroll offset that restores `anchor` for the current collection.
///
/// `key_to_index` maps the anchor's key to its index in the *current* collection.
pub fn anchor_offset<C: ScrollContainer, K>(
    list: &WindowedList<C>,
    anchor: &ScrollAnchor<K>,
    mut key_to_index: impl FnMut(&K) -> Option<usize>,
) -> Option<u64> {
    let index = key_to_index(&anchor.key)?;
    let start = list.item_start(index)?;
    Some(start.saturating_add(anchor.offset_in_row))
}

/// Applies a previously captured anchor by moving the container's scroll offset.
///
/// Call [`WindowedList::set_item_count`] for the new collection first. Returns `true` when the
/// anchor was found and applied.
pub fn apply_anchor<C: ScrollTo, K>(
    list: &mut WindowedList<C>,
    anchor: &ScrollAnchor<K>,
    key_to_index: impl FnMut(&K) -> Option<usize>,
) -> bool {
    let Some(target) = anchor_offset(list, anchor, key_to_index) else {
        return false;
    };
    list.scroll_to_offset(target).is_some()
}
