use alloc::sync::Arc;

use crate::{Overscan, Window};

/// A callback fired after every state change with the freshly recomputed window.
pub type OnChangeCallback = Arc<dyn Fn(Window) + Send + Sync>;

/// Configuration for [`crate::WindowedList`].
///
/// Cheap to clone: the callback lives in an `Arc`, so hosts can tweak a field and call
/// `WindowedList::set_options` every frame.
#[derive(Clone)]
pub struct WindowedListOptions {
    /// Uniform row height in pixels. `0` yields a degenerate (empty) window.
    pub row_height: u32,
    pub overscan: Overscan,

    /// Collection length used by [`crate::WindowedList::window`] and `on_change`.
    ///
    /// Rendering always reads the length of the slice it is given instead.
    pub item_count: usize,

    /// Enables/disables the list. When disabled, every window is degenerate.
    pub enabled: bool,

    /// Additional padding applied when computing scroll-to offsets.
    pub scroll_padding_start: u32,
    /// Additional padding applied when computing scroll-to offsets.
    pub scroll_padding_end: u32,

    pub on_change: Option<OnChangeCallback>,
}

impl WindowedListOptions {
    pub fn new(row_height: u32) -> Self {
        Self {
            row_height,
            overscan: Overscan::NONE,
            item_count: 0,
            enabled: true,
            scroll_padding_start: 0,
            scroll_padding_end: 0,
            on_change: None,
        }
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_overscan(mut self, overscan: impl Into<Overscan>) -> Self {
        self.overscan = overscan.into();
        self
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_scroll_padding(
        mut self,
        scroll_padding_start: u32,
        scroll_padding_end: u32,
    ) -> Self {
        self.scroll_padding_start = scroll_padding_start;
        self.scroll_padding_end = scroll_padding_end;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(Window) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for WindowedListOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl core::fmt::Debug for WindowedListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowedListOptions")
            .field("row_height", &self.row_height)
            .field("overscan", &self.overscan)
            .field("item_count", &self.item_count)
            .field("enabled", &self.enabled)
            .field("scroll_padding_start", &self.scroll_padding_start)
            .field("scroll_padding_end", &self.scroll_padding_end)
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .finish()
    }
}
