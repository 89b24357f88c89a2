//! A headless windowed-rendering engine for large uniform-height lists and tables.
//!
//! For host-integration utilities (anchoring, per-frame coalescing), see the
//! `windowed-list-adapter` crate.
//!
//! Given a scroll offset, a viewport height, a row height, and an overscan margin, the engine
//! computes which rows to materialize plus the leading/trailing spacers that keep the total
//! scrollable extent equal to `item_count * row_height`. Every computation is `O(1)` in the
//! collection size.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`ScrollContainer`] to read scroll offset and visible height from
//! - scroll/resize notifications
//! - a row materializer (`render_row(item, index)`)
//!
//! ```
//! use windowed_list::compute_window;
//!
//! let w = compute_window(1000, 48, 4800, 600, 4);
//! assert_eq!((w.start_index, w.end_index), (96, 117));
//! assert_eq!((w.pad_top, w.pad_bottom), (4608, 42336));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod calculator;
mod list;
mod options;
mod render;
mod spacer;
mod state;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

pub use calculator::{compute_window, compute_window_for, index_at_offset, visible_rows};
pub use list::{ScopedList, WindowedList};
pub use options::{OnChangeCallback, WindowedListOptions};
pub use render::{Rendered, for_each_in_window, render_window, try_render_window};
pub use spacer::{Spacers, row_start, spacers, total_extent};
pub use state::ViewportState;
pub use tracker::{Attachment, ScrollContainer, ScrollTo, ViewportTracker};
pub use types::{Align, Overscan, ViewportEvent, Window};
