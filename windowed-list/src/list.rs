use alloc::sync::Arc;
use core::cell::Cell;
use core::ops::{Deref, DerefMut, RangeInclusive};

use crate::calculator::{compute_window_for, index_at_offset, visible_rows};
use crate::render::{Rendered, for_each_in_window, render_window, try_render_window};
use crate::spacer::{row_start, total_extent};
use crate::tracker::{ScrollContainer, ScrollTo, ViewportTracker};
use crate::{Align, Overscan, ViewportEvent, ViewportState, Window, WindowedListOptions};

/// A windowed list bound to one host scroll container.
///
/// The list owns its [`ViewportTracker`] and its options; the items stay with the caller and are
/// passed in on every render, so a new collection (after a filter or a fetch) is picked up
/// without any invalidation step.
///
/// Everything is recomputed on demand from current state. There is no cached window to go
/// stale, and repeated queries with the same state return the same window.
#[derive(Debug)]
pub struct WindowedList<C> {
    options: WindowedListOptions,
    tracker: ViewportTracker<C>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<C: ScrollContainer> WindowedList<C> {
    pub fn new(options: WindowedListOptions) -> Self {
        wdebug!(
            row_height = options.row_height,
            item_count = options.item_count,
            overscan_before = options.overscan.before,
            overscan_after = options.overscan.after,
            "WindowedList::new"
        );
        Self {
            options,
            tracker: ViewportTracker::new(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &WindowedListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: WindowedListOptions) {
        self.options = options;
        wtrace!(
            row_height = self.options.row_height,
            item_count = self.options.item_count,
            enabled = self.options.enabled,
            "WindowedList::set_options"
        );
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut WindowedListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn tracker(&self) -> &ViewportTracker<C> {
        &self.tracker
    }

    /// Begins observing `container`. `None` is a no-op (see [`ViewportTracker::attach`]).
    pub fn attach(&mut self, container: Option<C>) -> bool {
        let mounted = container.is_some();
        let attached = self.tracker.attach(container);
        if mounted {
            self.notify();
        }
        attached
    }

    /// Attaches `container` for the lifetime of the returned guard.
    ///
    /// The guard derefs to the list and detaches when dropped, including on early return and
    /// unwinding.
    pub fn attach_scoped(&mut self, container: C) -> ScopedList<'_, C> {
        self.attach(Some(container));
        ScopedList { list: self }
    }

    /// Stops observing the container. Idempotent; later events are ignored.
    pub fn detach(&mut self) -> Option<C> {
        self.tracker.detach()
    }

    pub fn is_attached(&self) -> bool {
        self.tracker.is_attached()
    }

    pub fn viewport(&self) -> Option<ViewportState> {
        self.tracker.viewport()
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self.window());
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    /// Re-reads the container after a scroll event. Returns `true` when the viewport changed.
    pub fn on_scroll(&mut self) -> bool {
        self.handle_event(ViewportEvent::Scroll)
    }

    /// Re-reads the container after a resize event. Returns `true` when the viewport changed.
    pub fn on_resize(&mut self) -> bool {
        self.handle_event(ViewportEvent::Resize)
    }

    pub fn handle_event(&mut self, event: ViewportEvent) -> bool {
        if !self.tracker.is_attached() {
            wtrace!(?event, "WindowedList: event after detach ignored");
            return false;
        }
        let changed = self.tracker.handle_event(event);
        if changed {
            self.notify();
        }
        changed
    }

    pub fn row_height(&self) -> u32 {
        self.options.row_height
    }

    pub fn set_row_height(&mut self, row_height: u32) {
        if self.options.row_height == row_height {
            return;
        }
        self.options.row_height = row_height;
        self.notify();
    }

    pub fn overscan(&self) -> Overscan {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: impl Into<Overscan>) {
        let overscan = overscan.into();
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn item_count(&self) -> usize {
        self.options.item_count
    }

    /// Records a new collection length (after a filter, sort, or fetch) and notifies.
    pub fn set_item_count(&mut self, item_count: usize) {
        if self.options.item_count == item_count {
            return;
        }
        wtrace!(
            from = self.options.item_count,
            to = item_count,
            "WindowedList::set_item_count"
        );
        self.options.item_count = item_count;
        self.notify();
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        self.notify();
    }

    pub fn set_scroll_padding(&mut self, scroll_padding_start: u32, scroll_padding_end: u32) {
        self.options.scroll_padding_start = scroll_padding_start;
        self.options.scroll_padding_end = scroll_padding_end;
        self.notify();
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(Window) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    /// The window for the configured `item_count` and the current viewport.
    pub fn window(&self) -> Window {
        self.window_for(self.options.item_count)
    }

    /// The window for a collection of `item_count` rows and the current viewport.
    ///
    /// Degenerate while detached or disabled.
    pub fn window_for(&self, item_count: usize) -> Window {
        if !self.options.enabled {
            return Window::DEGENERATE;
        }
        let Some(viewport) = self.tracker.viewport() else {
            return Window::DEGENERATE;
        };
        compute_window_for(
            item_count,
            self.options.row_height,
            viewport,
            self.options.overscan,
        )
    }

    /// Rows intersecting the viewport for the configured `item_count`, without overscan.
    pub fn visible_rows(&self) -> Option<RangeInclusive<usize>> {
        if !self.options.enabled {
            return None;
        }
        let viewport = self.tracker.viewport()?;
        visible_rows(self.options.item_count, self.options.row_height, viewport)
    }

    /// Materializes the current window over `items`.
    ///
    /// `render_row` is called exactly once per index in `[start, end]`, in order. Panics inside
    /// it are not caught.
    pub fn render<T, R>(
        &self,
        items: &[T],
        render_row: impl FnMut(&T, usize) -> R,
    ) -> Rendered<R> {
        self.render_with_empty(items, render_row, || None)
    }

    /// Same as [`Self::render`], with `render_empty` providing the zero-items output.
    pub fn render_with_empty<T, R>(
        &self,
        items: &[T],
        render_row: impl FnMut(&T, usize) -> R,
        render_empty: impl FnOnce() -> Option<R>,
    ) -> Rendered<R> {
        let window = self.window_for(items.len());
        render_window(items, window, render_row, render_empty)
    }

    /// Materializes the current window with a fallible `render_row`.
    ///
    /// The first error is returned as-is; the list makes no per-row recovery decisions.
    pub fn try_render<T, R, E>(
        &self,
        items: &[T],
        render_row: impl FnMut(&T, usize) -> Result<R, E>,
    ) -> Result<Rendered<R>, E> {
        let window = self.window_for(items.len());
        try_render_window(items, window, render_row, || None)
    }

    /// Visits `(index, item)` for every row in the current window without allocating.
    pub fn for_each_row<T>(&self, items: &[T], f: impl FnMut(usize, &T)) {
        let window = self.window_for(items.len());
        for_each_in_window(items, window, f);
    }

    /// Height of the whole collection as if every row were rendered.
    pub fn total_extent(&self) -> u64 {
        if !self.options.enabled {
            return 0;
        }
        total_extent(self.options.item_count, self.options.row_height)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        let view = self
            .tracker
            .viewport()
            .map_or(0, |v| v.viewport_height as u64);
        self.total_extent().saturating_sub(view)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if !self.options.enabled {
            return None;
        }
        index_at_offset(self.options.item_count, self.options.row_height, offset)
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        if !self.options.enabled || index >= self.options.item_count {
            return None;
        }
        Some(row_start(index, self.options.row_height))
    }

    /// Computes the (clamped) offset that brings `index` into view.
    ///
    /// Returns `None` while detached, disabled, or for an empty collection.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> Option<u64> {
        if !self.options.enabled || self.options.item_count == 0 {
            return None;
        }
        let viewport = self.tracker.viewport()?;
        let index = index.min(self.options.item_count - 1);
        let size = self.options.row_height as u64;
        let start = row_start(index, self.options.row_height);
        let end = start.saturating_add(size);

        let sp_start = self.options.scroll_padding_start as u64;
        let sp_end = self.options.scroll_padding_end as u64;
        let view = viewport.viewport_height as u64;

        let target = match align {
            Align::Start => start.saturating_sub(sp_start),
            Align::End => end.saturating_add(sp_end).saturating_sub(view),
            Align::Center => start.saturating_add(size / 2).saturating_sub(view / 2),
            Align::Auto => {
                let cur = viewport.scroll_offset;
                if start >= cur && end <= viewport.scroll_end() {
                    cur
                } else if start < cur {
                    start.saturating_sub(sp_start)
                } else {
                    end.saturating_add(sp_end).saturating_sub(view)
                }
            }
        };

        Some(self.clamp_scroll_offset(target))
    }
}

impl<C: ScrollTo> WindowedList<C> {
    /// Scrolls the container so `index` is in view. Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<u64> {
        let offset = self.scroll_to_index_offset(index, align)?;
        self.scroll_to_offset(offset)
    }

    /// Scrolls the container to `offset` (clamped). Returns the offset read back from the
    /// container, or `None` while detached.
    pub fn scroll_to_offset(&mut self, offset: u64) -> Option<u64> {
        if !self.tracker.is_attached() {
            return None;
        }
        let offset = self.clamp_scroll_offset(offset);
        if self.tracker.scroll_to(offset) {
            self.notify();
        }
        self.tracker.viewport().map(|v| v.scroll_offset)
    }

    /// Pulls the container's scroll offset back inside the content after a shrink.
    ///
    /// See [`ViewportTracker::reclamp`].
    pub fn reclamp(&mut self) -> bool {
        let changed = self
            .tracker
            .reclamp(self.options.item_count, self.options.row_height);
        if changed {
            self.notify();
        }
        changed
    }
}

/// Guard returned by [`WindowedList::attach_scoped`]; detaches when dropped.
#[derive(Debug)]
pub struct ScopedList<'a, C: ScrollContainer> {
    list: &'a mut WindowedList<C>,
}

impl<C: ScrollContainer> Deref for ScopedList<'_, C> {
    type Target = WindowedList<C>;

    fn deref(&self) -> &Self::Target {
        self.list
    }
}

impl<C: ScrollContainer> DerefMut for ScopedList<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.list
    }
}

impl<C: ScrollContainer> Drop for ScopedList<'_, C> {
    fn drop(&mut self) {
        self.list.detach();
    }
}
