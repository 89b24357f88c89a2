use alloc::vec::Vec;

use crate::Window;

/// Output of one render pass.
///
/// `Rows` lays out, in order: a leading spacer of `pad_top`, the materialized rows, and a trailing
/// spacer of `pad_bottom`. `Empty` carries the host's empty-state element, if any, and is produced
/// whenever the window is degenerate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered<R> {
    Empty(Option<R>),
    Rows {
        pad_top: u64,
        rows: Vec<R>,
        pad_bottom: u64,
    },
}

impl<R> Rendered<R> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Materialized rows (empty for the empty state).
    pub fn rows(&self) -> &[R] {
        match self {
            Self::Empty(_) => &[],
            Self::Rows { rows, .. } => rows,
        }
    }

    pub fn into_rows(self) -> Vec<R> {
        match self {
            Self::Empty(_) => Vec::new(),
            Self::Rows { rows, .. } => rows,
        }
    }

    /// `(pad_top, pad_bottom)`, zero for the empty state.
    pub fn padding(&self) -> (u64, u64) {
        match self {
            Self::Empty(_) => (0, 0),
            Self::Rows {
                pad_top,
                pad_bottom,
                ..
            } => (*pad_top, *pad_bottom),
        }
    }
}

/// Calls `f` once per index in the window, in ascending order, with the matching item.
///
/// `window` must have been computed for `items.len()`. A window from a longer collection is a
/// caller bug: it is debug-asserted, and the out-of-range tail is skipped in release builds.
pub fn for_each_in_window<T>(items: &[T], window: Window, mut f: impl FnMut(usize, &T)) {
    for index in window.indices() {
        let Some(item) = items.get(index) else {
            wwarn!(
                index,
                len = items.len(),
                "for_each_in_window: window exceeds collection"
            );
            debug_assert!(
                index < items.len(),
                "window exceeds collection (index={index}, len={})",
                items.len()
            );
            return;
        };
        f(index, item);
    }
}

/// Materializes `window` over `items`.
///
/// `render_empty` is only called for a degenerate window.
pub fn render_window<T, R>(
    items: &[T],
    window: Window,
    mut render_row: impl FnMut(&T, usize) -> R,
    render_empty: impl FnOnce() -> Option<R>,
) -> Rendered<R> {
    if window.is_degenerate() {
        return Rendered::Empty(render_empty());
    }
    let mut rows = Vec::with_capacity(window.len());
    for_each_in_window(items, window, |index, item| rows.push(render_row(item, index)));
    Rendered::Rows {
        pad_top: window.pad_top,
        rows,
        pad_bottom: window.pad_bottom,
    }
}

/// Like [`render_window`], but stops at the first materializer error and returns it unchanged.
///
/// Same contract on `window` as [`for_each_in_window`].
pub fn try_render_window<T, R, E>(
    items: &[T],
    window: Window,
    mut render_row: impl FnMut(&T, usize) -> Result<R, E>,
    render_empty: impl FnOnce() -> Option<R>,
) -> Result<Rendered<R>, E> {
    if window.is_degenerate() {
        return Ok(Rendered::Empty(render_empty()));
    }
    let mut rows = Vec::with_capacity(window.len());
    for index in window.indices() {
        let Some(item) = items.get(index) else {
            wwarn!(
                index,
                len = items.len(),
                "try_render_window: window exceeds collection"
            );
            debug_assert!(
                index < items.len(),
                "window exceeds collection (index={index}, len={})",
                items.len()
            );
            break;
        };
        rows.push(render_row(item, index)?);
    }
    Ok(Rendered::Rows {
        pad_top: window.pad_top,
        rows,
        pad_bottom: window.pad_bottom,
    })
}
