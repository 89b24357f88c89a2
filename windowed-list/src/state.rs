/// A snapshot of the host container's scroll position and visible height.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: u64,
    pub viewport_height: u32,
}

impl ViewportState {
    pub const fn new(scroll_offset: u64, viewport_height: u32) -> Self {
        Self {
            scroll_offset,
            viewport_height,
        }
    }

    /// Offset one past the last visible pixel.
    pub fn scroll_end(&self) -> u64 {
        self.scroll_offset.saturating_add(self.viewport_height as u64)
    }
}
