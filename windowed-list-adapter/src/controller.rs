use windowed_list::{
    Align, ScrollContainer, ScrollTo, ViewportEvent, Window, WindowedList, WindowedListOptions,
};

use crate::{FrameCoalescer, ScrollAnchor, apply_anchor, capture_first_visible_anchor};

/// A framework-neutral controller that wraps a [`WindowedList`] and provides common host
/// workflows (per-frame coalescing, anchoring across collection changes).
///
/// This type does not hold any UI objects. Hosts drive it by calling:
/// - `attach`/`detach` on mount and unmount
/// - `on_event` when the container reports a scroll or resize
/// - `tick(now_ms)` once per frame/timer tick, which performs at most one recompute
#[derive(Debug)]
pub struct Controller<C> {
    list: WindowedList<C>,
    coalescer: FrameCoalescer,
}

impl<C: ScrollContainer> Controller<C> {
    pub fn new(options: WindowedListOptions) -> Self {
        Self::from_list(WindowedList::new(options))
    }

    pub fn from_list(list: WindowedList<C>) -> Self {
        Self {
            list,
            coalescer: FrameCoalescer::default(),
        }
    }

    pub fn with_frame_interval_ms(mut self, frame_interval_ms: u64) -> Self {
        self.coalescer.set_frame_interval_ms(frame_interval_ms);
        self
    }

    pub fn list(&self) -> &WindowedList<C> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut WindowedList<C> {
        &mut self.list
    }

    pub fn into_list(self) -> WindowedList<C> {
        self.list
    }

    /// Attaches `container`, dropping events queued for the previous one.
    ///
    /// `attach(None)` is a no-op and keeps the queue.
    pub fn attach(&mut self, container: Option<C>) -> bool {
        if container.is_some() {
            self.coalescer.clear();
        }
        self.list.attach(container)
    }

    /// Detaches the container and drops any queued events.
    pub fn detach(&mut self) -> Option<C> {
        self.coalescer.clear();
        self.list.detach()
    }

    /// Queues a container event for the next [`Self::tick`]. Ignored while detached.
    pub fn on_event(&mut self, event: ViewportEvent) {
        if !self.list.is_attached() {
            return;
        }
        self.coalescer.push(event);
    }

    pub fn has_pending_events(&self) -> bool {
        self.coalescer.has_pending()
    }

    /// Advances the controller.
    ///
    /// Flushes queued events if a frame boundary has passed. Returns the new window when the
    /// viewport changed, `None` otherwise.
    pub fn tick(&mut self, now_ms: u64) -> Option<Window> {
        let due = self.coalescer.take_due(now_ms)?;
        let event = due.replay()?;
        atrace!(?due, now_ms, "Controller::tick flush");
        self.list.handle_event(event).then(|| self.list.window())
    }

    /// Applies queued events now, ahead of the frame boundary.
    fn flush_pending(&mut self) -> bool {
        match self.coalescer.take_pending().replay() {
            Some(event) => self.list.handle_event(event),
            None => false,
        }
    }

    /// Records a collection change and tries to keep `anchor` steady.
    ///
    /// Queued events are applied first, in the same notification batch.
    /// Falls back to re-clamping the offset when the anchor's item is gone. Returns `true` when
    /// the anchor was applied.
    pub fn replace_items<K>(
        &mut self,
        item_count: usize,
        anchor: Option<&ScrollAnchor<K>>,
        key_to_index: impl FnMut(&K) -> Option<usize>,
    ) -> bool
    where
        C: ScrollTo,
    {
        let pending = self.coalescer.take_pending();
        let list = &mut self.list;
        let mut applied = false;
        list.batch_update(|l| {
            if let Some(event) = pending.replay() {
                l.handle_event(event);
            }
            l.set_item_count(item_count);
            applied = anchor.is_some_and(|a| apply_anchor(l, a, key_to_index));
            if !applied {
                l.reclamp();
            }
        });
        adebug!(item_count, applied, "Controller::replace_items");
        applied
    }

    /// Scrolls the container so `index` is in view. Queued events are applied first so the
    /// target is clamped against the current viewport.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<u64>
    where
        C: ScrollTo,
    {
        self.flush_pending();
        self.list.scroll_to_index(index, align)
    }

    /// Scrolls the container to `offset`, clamped against the current viewport.
    pub fn scroll_to_offset(&mut self, offset: u64) -> Option<u64>
    where
        C: ScrollTo,
    {
        self.flush_pending();
        self.list.scroll_to_offset(offset)
    }

    pub fn capture_first_visible_anchor<T, K>(
        &self,
        items: &[T],
        key_of: impl FnOnce(&T) -> K,
    ) -> Option<ScrollAnchor<K>> {
        capture_first_visible_anchor(&self.list, items, key_of)
    }
}
