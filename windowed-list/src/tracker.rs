use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use core::ops::{Deref, DerefMut};

use crate::spacer::total_extent;
use crate::{ViewportEvent, ViewportState};

/// A host scroll container the tracker can observe.
///
/// Implement this for your UI layer's scroll handle (a terminal pane, a native scroll view, a DOM
/// element wrapper). Reads must be cheap: they run on every scroll and resize event.
pub trait ScrollContainer {
    /// Current scroll offset in pixels from the top of the content.
    fn scroll_offset(&self) -> u64;

    /// Visible height of the container in pixels.
    fn client_height(&self) -> u32;

    fn viewport_state(&self) -> ViewportState {
        ViewportState::new(self.scroll_offset(), self.client_height())
    }
}

/// A container that also lets the engine move its scroll position.
pub trait ScrollTo: ScrollContainer {
    fn scroll_to(&self, offset: u64);
}

macro_rules! forward_container {
    ($($ptr:ident),*) => {$(
        impl<C: ScrollContainer + ?Sized> ScrollContainer for $ptr<C> {
            fn scroll_offset(&self) -> u64 {
                (**self).scroll_offset()
            }

            fn client_height(&self) -> u32 {
                (**self).client_height()
            }
        }

        impl<C: ScrollTo + ?Sized> ScrollTo for $ptr<C> {
            fn scroll_to(&self, offset: u64) {
                (**self).scroll_to(offset);
            }
        }
    )*};
}

forward_container!(Box, Rc, Arc);

impl<C: ScrollContainer + ?Sized> ScrollContainer for &C {
    fn scroll_offset(&self) -> u64 {
        (**self).scroll_offset()
    }

    fn client_height(&self) -> u32 {
        (**self).client_height()
    }
}

impl<C: ScrollTo + ?Sized> ScrollTo for &C {
    fn scroll_to(&self, offset: u64) {
        (**self).scroll_to(offset);
    }
}

/// Keeps an up-to-date [`ViewportState`] for one host container.
///
/// The tracker is an explicit subscribe/unsubscribe handle: the host calls [`Self::attach`] when
/// the container mounts, forwards scroll/resize notifications via [`Self::handle_event`], and calls
/// [`Self::detach`] on unmount. Prefer [`Self::attach_scoped`], which detaches on drop.
///
/// While detached, [`Self::viewport`] is `None` and every event is ignored.
#[derive(Clone, Debug)]
pub struct ViewportTracker<C> {
    container: Option<C>,
    state: Option<ViewportState>,
}

impl<C> Default for ViewportTracker<C> {
    fn default() -> Self {
        Self {
            container: None,
            state: None,
        }
    }
}

impl<C: ScrollContainer> ViewportTracker<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins observing `container` and reads its metrics once.
    ///
    /// `None` (container not mounted yet) is a no-op: the tracker stays detached and the window
    /// stays degenerate until a later `attach` succeeds. Attaching while already attached
    /// replaces the previous container.
    ///
    /// Returns `true` when the tracker is attached afterwards.
    pub fn attach(&mut self, container: Option<C>) -> bool {
        let Some(container) = container else {
            wdebug!("ViewportTracker::attach: container not mounted");
            return self.is_attached();
        };
        if self.container.is_some() {
            self.detach();
        }
        let state = container.viewport_state();
        wdebug!(
            scroll_offset = state.scroll_offset,
            viewport_height = state.viewport_height,
            "ViewportTracker::attach"
        );
        self.container = Some(container);
        self.state = Some(state);
        true
    }

    /// Attaches `container` for the lifetime of the returned guard.
    pub fn attach_scoped(&mut self, container: C) -> Attachment<'_, C> {
        self.attach(Some(container));
        Attachment { tracker: self }
    }

    /// Stops observing and hands the container back. Safe to call repeatedly.
    pub fn detach(&mut self) -> Option<C> {
        self.state = None;
        let container = self.container.take();
        if container.is_some() {
            wdebug!("ViewportTracker::detach");
        }
        container
    }

    pub fn is_attached(&self) -> bool {
        self.container.is_some()
    }

    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    pub fn viewport(&self) -> Option<ViewportState> {
        self.state
    }

    /// Re-reads `scroll_offset`/`client_height` from the container.
    ///
    /// Returns `true` when the viewport changed. A no-op after [`Self::detach`].
    pub fn refresh(&mut self) -> bool {
        let Some(container) = &self.container else {
            wtrace!("ViewportTracker::refresh: detached, ignoring");
            return false;
        };
        let next = container.viewport_state();
        if self.state == Some(next) {
            return false;
        }
        wtrace!(
            scroll_offset = next.scroll_offset,
            viewport_height = next.viewport_height,
            "ViewportTracker::refresh"
        );
        self.state = Some(next);
        true
    }

    pub fn on_scroll(&mut self) -> bool {
        self.refresh()
    }

    pub fn on_resize(&mut self) -> bool {
        self.refresh()
    }

    pub fn handle_event(&mut self, event: ViewportEvent) -> bool {
        match event {
            ViewportEvent::Scroll => self.on_scroll(),
            ViewportEvent::Resize => self.on_resize(),
        }
    }
}

impl<C: ScrollTo> ViewportTracker<C> {
    /// Moves the container to `offset` and re-reads its metrics.
    ///
    /// The container may clamp the offset itself; the tracker reports what it reads back.
    /// Returns `false` when detached or when nothing changed.
    pub fn scroll_to(&mut self, offset: u64) -> bool {
        let Some(container) = &self.container else {
            return false;
        };
        container.scroll_to(offset);
        self.refresh()
    }

    /// Pulls the scroll offset back inside the content after the collection shrank.
    ///
    /// Browser-like hosts do this on their own when content height drops; other hosts can call
    /// this after updating the collection. Returns `true` when the offset was moved.
    pub fn reclamp(&mut self, item_count: usize, row_height: u32) -> bool {
        let Some(state) = self.state else {
            return false;
        };
        let max = total_extent(item_count, row_height).saturating_sub(state.viewport_height as u64);
        if state.scroll_offset <= max {
            return false;
        }
        wdebug!(
            from = state.scroll_offset,
            to = max,
            item_count,
            "ViewportTracker::reclamp"
        );
        self.scroll_to(max)
    }
}

/// Guard returned by [`ViewportTracker::attach_scoped`]; detaches when dropped.
#[derive(Debug)]
pub struct Attachment<'a, C: ScrollContainer> {
    tracker: &'a mut ViewportTracker<C>,
}

impl<C: ScrollContainer> Deref for Attachment<'_, C> {
    type Target = ViewportTracker<C>;

    fn deref(&self) -> &Self::Target {
        self.tracker
    }
}

impl<C: ScrollContainer> DerefMut for Attachment<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.tracker
    }
}

impl<C: ScrollContainer> Drop for Attachment<'_, C> {
    fn drop(&mut self) {
        self.tracker.detach();
    }
}
