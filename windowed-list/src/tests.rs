use crate::*;

use alloc::vec::Vec;
use core::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Pane {
    offset: Cell<u64>,
    height: Cell<u32>,
}

impl Pane {
    fn new(offset: u64, height: u32) -> Self {
        Self {
            offset: Cell::new(offset),
            height: Cell::new(height),
        }
    }
}

impl ScrollContainer for Pane {
    fn scroll_offset(&self) -> u64 {
        self.offset.get()
    }

    fn client_height(&self) -> u32 {
        self.height.get()
    }
}

impl ScrollTo for Pane {
    fn scroll_to(&self, offset: u64) {
        self.offset.set(offset);
    }
}

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range(&mut self, start: u64, end_exclusive: u64) -> u64 {
        start + (self.next_u64() % (end_exclusive - start))
    }
}

/// Walks every row to find the window, without any index arithmetic shortcuts.
fn expected_window(
    item_count: usize,
    row_height: u32,
    scroll_offset: u64,
    viewport_height: u32,
    overscan: Overscan,
) -> Window {
    if item_count == 0 || row_height == 0 || viewport_height == 0 {
        return Window::DEGENERATE;
    }
    let h = row_height as u64;
    let mut first_row = item_count;
    for i in 0..item_count {
        if (i as u64 + 1) * h > scroll_offset {
            first_row = i;
            break;
        }
    }
    // Rows past the end: `floor(offset / h)` still counts from zero.
    if first_row == item_count {
        first_row = (scroll_offset / h) as usize;
    }
    let visible = (viewport_height as u64).div_ceil(h) as usize;
    let max_index = item_count - 1;
    let start = first_row.saturating_sub(overscan.before).min(max_index);
    let end = (first_row + visible + overscan.after).min(max_index);

    let mut pad_top = 0u64;
    let mut pad_bottom = 0u64;
    for i in 0..item_count {
        if i < start {
            pad_top += h;
        } else if i > end {
            pad_bottom += h;
        }
    }
    Window {
        start_index: start,
        end_index: end,
        pad_top,
        pad_bottom,
        degenerate: false,
    }
}

fn attached_list(pane: &Pane, item_count: usize, overscan: usize) -> WindowedList<&Pane> {
    let mut list = WindowedList::new(
        WindowedListOptions::new(48)
            .with_item_count(item_count)
            .with_overscan(overscan),
    );
    assert!(list.attach(Some(pane)));
    list
}

#[test]
fn mid_list_window_matches_worked_example() {
    let w = compute_window(1000, 48, 4800, 600, 4);
    assert_eq!(w.start_index, 96);
    assert_eq!(w.end_index, 117);
    assert_eq!(w.pad_top, 4608);
    assert_eq!(w.pad_bottom, 42336);
    assert_eq!(w.len(), 22);
    assert!(!w.is_degenerate());
}

#[test]
fn top_boundary_never_goes_negative() {
    let w = compute_window(1000, 48, 0, 600, 4);
    assert_eq!(w.start_index, 0);
    // 0 + 13 visible + 4 overscan
    assert_eq!(w.end_index, 17);
    assert_eq!(w.pad_top, 0);
}

#[test]
fn bottom_boundary_clamps_end_to_last_row() {
    let w = compute_window(1000, 48, 995 * 48, 600, 4);
    assert_eq!(w.start_index, 991);
    assert_eq!(w.end_index, 999);
    assert_eq!(w.pad_top, 991 * 48);
    assert_eq!(w.pad_bottom, 0);
}

#[test]
fn shrink_after_filter_keeps_window_in_bounds() {
    let before = compute_window(1000, 48, 995 * 48, 600, 4);
    assert_eq!(before.end_index, 999);

    let after = compute_window(10, 48, 995 * 48, 600, 4);
    assert_eq!(after.start_index, 9);
    assert_eq!(after.end_index, 9);
    assert_eq!(after.pad_top + 48 + after.pad_bottom, 10 * 48);
}

#[test]
fn degenerate_inputs_yield_empty_window() {
    for w in [
        compute_window(0, 48, 0, 600, 4),
        compute_window(100, 0, 0, 600, 4),
        compute_window(100, 48, 0, 0, 4),
    ] {
        assert_eq!(w, Window::DEGENERATE);
        assert_eq!((w.start_index, w.end_index), (0, 0));
        assert_eq!((w.pad_top, w.pad_bottom), (0, 0));
        assert!(w.is_empty());
        assert_eq!(w.indices(), 0..0);
    }
}

#[test]
fn default_window_is_degenerate() {
    let w = Window::default();
    assert_eq!(w, Window::DEGENERATE);
    assert!(w.is_degenerate());
    assert_eq!(w.len(), 0);
    assert!(!w.contains(0));
}

#[test]
fn huge_scroll_offset_saturates_instead_of_overflowing() {
    let w = compute_window(usize::MAX, 1, u64::MAX, u32::MAX, usize::MAX);
    assert_eq!(w.start_index, 0);
    assert_eq!(w.end_index, usize::MAX - 1);
}

#[test]
fn asymmetric_overscan_applies_each_side_separately() {
    let w = compute_window(1000, 48, 4800, 600, Overscan::asymmetric(1, 8));
    assert_eq!(w.start_index, 99);
    assert_eq!(w.end_index, 121);
    assert!(!Overscan::asymmetric(1, 8).is_symmetric());
    assert_eq!(Overscan::from(3), Overscan::symmetric(3));
}

#[test]
fn window_matches_row_walk_reference() {
    let mut rng = Lcg(0x5eed);
    for _ in 0..500 {
        let count = rng.gen_range(0, 300) as usize;
        let row_height = rng.gen_range(0, 64) as u32;
        let viewport = rng.gen_range(0, 900) as u32;
        let offset = rng.gen_range(0, 30_000);
        let overscan = Overscan::asymmetric(
            rng.gen_range(0, 6) as usize,
            rng.gen_range(0, 6) as usize,
        );

        let got = compute_window(count, row_height, offset, viewport, overscan);
        let want = expected_window(count, row_height, offset, viewport, overscan);
        assert_eq!(
            got, want,
            "count={count} h={row_height} vh={viewport} off={offset} {overscan:?}"
        );
    }
}

#[test]
fn visible_rows_exclude_overscan() {
    let vp = ViewportState::new(4800, 600);
    assert_eq!(visible_rows(1000, 48, vp), Some(100..=112));
    // One extra pixel reveals row 113.
    assert_eq!(
        visible_rows(1000, 48, ViewportState::new(4800, 626)),
        Some(100..=113)
    );
    assert_eq!(visible_rows(0, 48, vp), None);
    assert_eq!(
        visible_rows(10, 48, ViewportState::new(99_999, 600)),
        Some(9..=9)
    );
}

#[test]
fn index_at_offset_clamps_to_last_row() {
    assert_eq!(index_at_offset(10, 48, 0), Some(0));
    assert_eq!(index_at_offset(10, 48, 47), Some(0));
    assert_eq!(index_at_offset(10, 48, 48), Some(1));
    assert_eq!(index_at_offset(10, 48, 10_000), Some(9));
    assert_eq!(index_at_offset(0, 48, 0), None);
}

#[test]
fn spacers_conserve_total_extent() {
    let s = spacers(1000, 48, 96, 117);
    assert_eq!(s.pad_top + 22 * 48 + s.pad_bottom, total_extent(1000, 48));
    assert_eq!(spacers(0, 48, 0, 0), Spacers::default());
    assert_eq!(row_start(3, 48), 144);
}

#[test]
fn detached_list_renders_empty_state() {
    let list: WindowedList<&Pane> = WindowedList::new(WindowedListOptions::new(48));
    let items = [1, 2, 3];
    let out = list.render_with_empty(&items, |i, _| *i, || Some(-1));
    assert_eq!(out, Rendered::Empty(Some(-1)));
    assert!(list.window().is_degenerate());
}

#[test]
fn attach_none_is_a_no_op() {
    let pane = Pane::new(0, 600);
    let mut list: WindowedList<&Pane> = WindowedList::new(WindowedListOptions::new(48));
    assert!(!list.attach(None));
    assert!(!list.is_attached());
    assert_eq!(list.viewport(), None);

    assert!(list.attach(Some(&pane)));
    // A later `None` does not drop the mounted container.
    assert!(list.attach(None));
    assert!(list.is_attached());
}

#[test]
fn render_materializes_each_window_row_once_in_order() {
    let pane = Pane::new(4800, 600);
    let list = attached_list(&pane, 1000, 4);
    let items: Vec<u32> = (0..1000).collect();

    let mut seen = Vec::new();
    let out = list.render(&items, |item, index| {
        assert_eq!(*item as usize, index);
        seen.push(index);
        index * 2
    });

    assert_eq!(seen, (96..=117).collect::<Vec<_>>());
    let Rendered::Rows {
        pad_top,
        rows,
        pad_bottom,
    } = out
    else {
        panic!("expected rows");
    };
    assert_eq!(pad_top, 4608);
    assert_eq!(pad_bottom, 42336);
    assert_eq!(rows.len(), 22);
    assert_eq!(rows[0], 192);
}

#[test]
fn render_of_empty_collection_skips_materializer() {
    let pane = Pane::new(0, 600);
    let list = attached_list(&pane, 0, 4);
    let items: [u8; 0] = [];
    let out = list.render_with_empty(
        &items,
        |_, _| -> &str { panic!("materializer must not run") },
        || Some("No results"),
    );
    assert!(out.is_empty());
    assert_eq!(out, Rendered::Empty(Some("No results")));
    assert_eq!(out.padding(), (0, 0));
    assert!(out.rows().is_empty());
}

#[test]
fn render_reads_collection_length_fresh_each_time() {
    let pane = Pane::new(995 * 48, 600);
    let list = attached_list(&pane, 1000, 4);

    let big: Vec<u32> = (0..1000).collect();
    let first = list.render(&big, |_, i| i);
    assert_eq!(first.rows().last(), Some(&999));

    // Same list, new collection identity, far shorter.
    let small: Vec<u32> = (0..10).collect();
    let second = list.render(&small, |_, i| i);
    assert_eq!(second.rows(), &[9]);
    assert_eq!(second.padding(), (9 * 48, 0));
}

#[test]
fn try_render_propagates_first_materializer_error() {
    let pane = Pane::new(0, 96);
    let list = attached_list(&pane, 10, 0);
    let items: Vec<u32> = (0..10).collect();

    let mut calls = 0;
    let out: Result<Rendered<u32>, &str> = list.try_render(&items, |item, _| {
        calls += 1;
        if *item == 1 { Err("bad row") } else { Ok(*item) }
    });
    assert_eq!(out, Err("bad row"));
    assert_eq!(calls, 2);

    let ok: Result<Rendered<u32>, &str> = list.try_render(&items, |item, _| Ok(*item));
    assert_eq!(ok.map(Rendered::into_rows), Ok(vec![0, 1, 2]));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "window exceeds collection")]
fn try_render_window_asserts_window_fits_collection() {
    let window = compute_window(10, 48, 0, 600, 0);
    let items: Vec<u32> = (0..5).collect();
    let _ = try_render_window(&items, window, |item, _| Ok::<_, ()>(*item), || None);
}

#[test]
#[should_panic(expected = "row exploded")]
fn materializer_panics_are_not_caught() {
    let pane = Pane::new(0, 96);
    let list = attached_list(&pane, 10, 0);
    let items: Vec<u32> = (0..10).collect();
    let _ = list.render(&items, |_, _| -> u32 { panic!("row exploded") });
}

#[test]
fn for_each_row_visits_window_without_allocating_output() {
    let pane = Pane::new(480, 96);
    let list = attached_list(&pane, 100, 1);
    let items: Vec<char> = (0..100).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    let mut out = Vec::new();
    list.for_each_row(&items, |i, c| out.push((i, *c)));
    assert_eq!(out.first(), Some(&(9, 'j')));
    assert_eq!(out.last(), Some(&(13, 'n')));
}

#[test]
fn scroll_and_resize_events_reread_container() {
    let pane = Pane::new(0, 600);
    let mut list = attached_list(&pane, 1000, 0);
    assert_eq!(list.window().start_index, 0);

    pane.offset.set(4800);
    assert!(list.on_scroll());
    assert_eq!(list.window().start_index, 100);
    // No change, no recompute reported.
    assert!(!list.on_scroll());

    pane.height.set(96);
    assert!(list.handle_event(ViewportEvent::Resize));
    assert_eq!(list.window().end_index, 102);
}

#[test]
fn events_after_detach_are_ignored() {
    let pane = Pane::new(0, 600);
    let mut list = attached_list(&pane, 1000, 0);

    assert!(list.detach().is_some());
    assert!(list.detach().is_none());

    pane.offset.set(4800);
    assert!(!list.on_scroll());
    assert!(!list.on_resize());
    assert!(list.window().is_degenerate());
}

#[test]
fn scoped_attachment_detaches_on_early_return() {
    fn mount<'p>(list: &mut WindowedList<&'p Pane>, pane: &'p Pane) -> Result<(), &'static str> {
        let scoped = list.attach_scoped(pane);
        if !scoped.window().is_empty() {
            return Err("layout failed");
        }
        Ok(())
    }

    let pane = Pane::new(0, 600);
    let mut list = WindowedList::new(WindowedListOptions::new(48).with_item_count(10));
    assert_eq!(mount(&mut list, &pane), Err("layout failed"));
    assert!(!list.is_attached());
}

#[test]
fn scoped_attachment_detaches_on_unwind() {
    let pane = Pane::new(0, 600);
    let mut list: WindowedList<&Pane> = WindowedList::new(WindowedListOptions::new(48));

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let scoped = list.attach_scoped(&pane);
        assert!(scoped.is_attached());
        panic!("host render failed");
    }));
    assert!(result.is_err());
    assert!(!list.is_attached());
}

#[test]
fn tracker_attachment_guard_detaches_on_drop() {
    let pane = Pane::new(10, 20);
    let mut tracker = ViewportTracker::new();
    {
        let attached = tracker.attach_scoped(&pane);
        assert_eq!(attached.viewport(), Some(ViewportState::new(10, 20)));
    }
    assert!(!tracker.is_attached());
    assert!(!tracker.refresh());
}

#[test]
fn trackers_are_independent_per_list() {
    let a = Pane::new(0, 600);
    let b = Pane::new(4800, 600);
    let list_a = attached_list(&a, 1000, 0);
    let list_b = attached_list(&b, 1000, 0);
    assert_eq!(list_a.window().start_index, 0);
    assert_eq!(list_b.window().start_index, 100);
}

#[test]
fn on_change_fires_with_recomputed_window() {
    let calls = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(Mutex::new(None));

    let pane = Pane::new(4800, 600);
    let mut list = WindowedList::new(
        WindowedListOptions::new(48)
            .with_item_count(1000)
            .with_on_change(Some({
                let calls = Arc::clone(&calls);
                let last = Arc::clone(&last);
                move |w: Window| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    *last.lock().unwrap() = Some(w);
                }
            })),
    );
    list.attach(Some(&pane));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(last.lock().unwrap().map(|w| w.start_index), Some(100));

    list.set_overscan(4);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(last.lock().unwrap().map(|w| w.start_index), Some(96));

    // Unchanged values do not notify.
    list.set_overscan(4);
    list.set_row_height(48);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn batch_update_coalesces_notifications() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pane = Pane::new(0, 600);
    let mut list = attached_list(&pane, 1000, 0);
    list.set_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: Window| {
            calls.fetch_add(1, Ordering::SeqCst);
        }
    }));
    calls.store(0, Ordering::SeqCst);

    list.batch_update(|l| {
        l.set_row_height(24);
        l.set_overscan(2);
        l.set_item_count(50);
    });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn disabled_list_renders_nothing() {
    let pane = Pane::new(0, 600);
    let mut list = attached_list(&pane, 1000, 0);
    list.set_enabled(false);
    let items: Vec<u32> = (0..1000).collect();
    assert!(list.render(&items, |_, i| i).is_empty());
    assert_eq!(list.total_extent(), 0);
    assert_eq!(list.index_at_offset(0), None);

    list.update_options(|o| o.enabled = true);
    assert!(!list.render(&items, |_, i| i).is_empty());
}

#[test]
fn scroll_to_index_offset_respects_align() {
    let pane = Pane::new(0, 600);
    let list = attached_list(&pane, 1000, 0);

    assert_eq!(list.scroll_to_index_offset(10, Align::Start), Some(480));
    assert_eq!(list.scroll_to_index_offset(10, Align::End), Some(0));
    assert_eq!(list.scroll_to_index_offset(100, Align::Center), Some(4524));
    // Fully visible: Auto keeps the current offset.
    assert_eq!(list.scroll_to_index_offset(5, Align::Auto), Some(0));
    // Below the viewport: Auto aligns to the end.
    assert_eq!(list.scroll_to_index_offset(50, Align::Auto), Some(1848));
    // Offsets never pass max_scroll_offset.
    assert_eq!(list.max_scroll_offset(), 47_400);
    assert_eq!(list.scroll_to_index_offset(999, Align::Start), Some(47_400));
    assert_eq!(list.scroll_to_index_offset(5_000, Align::Start), Some(47_400));
}

#[test]
fn scroll_to_index_padding_and_detached_cases() {
    let pane = Pane::new(4800, 600);
    let mut list = attached_list(&pane, 1000, 0);
    list.set_scroll_padding(12, 6);
    assert_eq!(list.scroll_to_index_offset(10, Align::Start), Some(468));
    // Above the viewport: Auto aligns to the start.
    assert_eq!(list.scroll_to_index_offset(10, Align::Auto), Some(468));
    assert_eq!(list.item_start(10), Some(480));
    assert_eq!(list.item_start(1000), None);

    list.detach();
    assert_eq!(list.scroll_to_index_offset(10, Align::Start), None);
}

#[test]
fn scroll_to_index_moves_container() {
    let pane = Pane::new(0, 600);
    let mut list = attached_list(&pane, 1000, 2);
    assert_eq!(list.scroll_to_index(200, Align::Start), Some(9600));
    assert_eq!(pane.offset.get(), 9600);
    assert_eq!(list.window().start_index, 198);
}

#[test]
fn reclamp_pulls_offset_back_after_shrink() {
    let pane = Pane::new(47_400, 600);
    let mut list = attached_list(&pane, 1000, 4);
    assert!(!list.reclamp());

    list.set_item_count(10);
    // Window is already valid before the host re-clamps.
    assert_eq!(list.window().end_index, 9);

    assert!(list.reclamp());
    assert_eq!(pane.offset.get(), 0);
    let w = list.window();
    assert_eq!((w.start_index, w.end_index), (0, 9));
    assert_eq!(w.pad_top + 10 * 48 + w.pad_bottom, 480);
}

#[test]
fn shared_container_handles_are_supported() {
    let pane = std::rc::Rc::new(Pane::new(4800, 600));
    let mut list = WindowedList::new(WindowedListOptions::new(48).with_item_count(1000));
    list.attach(Some(std::rc::Rc::clone(&pane)));
    assert_eq!(list.window().start_index, 100);

    pane.offset.set(0);
    assert!(list.on_scroll());
    assert_eq!(list.window().start_index, 0);
}
