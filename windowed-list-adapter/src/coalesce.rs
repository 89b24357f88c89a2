use windowed_list::ViewportEvent;

/// Default frame interval (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Events collected since the last flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingEvents {
    pub scroll: bool,
    pub resize: bool,
}

impl PendingEvents {
    pub fn is_empty(&self) -> bool {
        !self.scroll && !self.resize
    }

    /// The single event to replay. The tracker re-reads both offset and height on any event, so
    /// one replay covers everything that was queued.
    pub fn replay(&self) -> Option<ViewportEvent> {
        if self.resize {
            Some(ViewportEvent::Resize)
        } else if self.scroll {
            Some(ViewportEvent::Scroll)
        } else {
            None
        }
    }
}

/// Collapses bursts of scroll/resize events into at most one recompute per frame.
///
/// This is the `requestAnimationFrame` pattern for hosts without one: push every event as it
/// arrives, and call [`Self::take_due`] from the frame/timer tick.
#[derive(Clone, Debug)]
pub struct FrameCoalescer {
    frame_interval_ms: u64,
    pending: PendingEvents,
    last_flush_ms: Option<u64>,
}

impl Default for FrameCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL_MS)
    }
}

impl FrameCoalescer {
    pub fn new(frame_interval_ms: u64) -> Self {
        Self {
            frame_interval_ms,
            pending: PendingEvents::default(),
            last_flush_ms: None,
        }
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    pub fn set_frame_interval_ms(&mut self, frame_interval_ms: u64) {
        self.frame_interval_ms = frame_interval_ms;
    }

    pub fn push(&mut self, event: ViewportEvent) {
        match event {
            ViewportEvent::Scroll => self.pending.scroll = true,
            ViewportEvent::Resize => self.pending.resize = true,
        }
    }

    pub fn pending(&self) -> PendingEvents {
        self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drops queued events without flushing them.
    pub fn clear(&mut self) {
        self.pending = PendingEvents::default();
    }

    /// Takes the queued events regardless of the frame boundary.
    pub fn take_pending(&mut self) -> PendingEvents {
        core::mem::take(&mut self.pending)
    }

    /// Returns the queued events if a frame boundary has passed, and clears the queue.
    pub fn take_due(&mut self, now_ms: u64) -> Option<PendingEvents> {
        if self.pending.is_empty() {
            return None;
        }
        if let Some(last) = self.last_flush_ms {
            if now_ms.saturating_sub(last) < self.frame_interval_ms {
                return None;
            }
        }
        self.last_flush_ms = Some(now_ms);
        Some(core::mem::take(&mut self.pending))
    }
}
