#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Extra rows materialized outside the strictly visible range.
///
/// Symmetric by default; `before` applies above the first visible row and `after` below the last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overscan {
    pub before: usize,
    pub after: usize,
}

impl Overscan {
    pub const NONE: Self = Self {
        before: 0,
        after: 0,
    };

    pub const fn symmetric(rows: usize) -> Self {
        Self {
            before: rows,
            after: rows,
        }
    }

    pub const fn asymmetric(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    pub fn is_symmetric(&self) -> bool {
        self.before == self.after
    }
}

impl From<usize> for Overscan {
    fn from(rows: usize) -> Self {
        Self::symmetric(rows)
    }
}

/// The rows to materialize for one render pass, plus the spacers around them.
///
/// `end_index` is inclusive. A degenerate window (empty collection or unusable geometry) is
/// always `{0, 0}` with zero padding and materializes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start_index: usize,
    pub end_index: usize, // inclusive
    /// Leading spacer size in pixels.
    pub pad_top: u64,
    /// Trailing spacer size in pixels.
    pub pad_bottom: u64,
    pub degenerate: bool,
}

impl Default for Window {
    fn default() -> Self {
        Self::DEGENERATE
    }
}

impl Window {
    pub const DEGENERATE: Self = Self {
        start_index: 0,
        end_index: 0,
        pad_top: 0,
        pad_bottom: 0,
        degenerate: true,
    };

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Number of rows to materialize (`0` for a degenerate window).
    pub fn len(&self) -> usize {
        if self.degenerate {
            0
        } else {
            self.end_index - self.start_index + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        !self.degenerate && index >= self.start_index && index <= self.end_index
    }

    /// Indices to materialize, as a half-open range.
    pub fn indices(&self) -> core::ops::Range<usize> {
        if self.degenerate {
            0..0
        } else {
            self.start_index..self.end_index + 1
        }
    }
}

/// A notification from the host scroll container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewportEvent {
    Scroll,
    Resize,
}
