// Example: keep the row under the viewport top steady while the host filters and sorts.
use std::cell::Cell;

use windowed_list::{ScrollContainer, ScrollTo, ViewportEvent, WindowedListOptions};
use windowed_list_adapter::Controller;

#[derive(Debug)]
struct Pane {
    offset: Cell<u64>,
    height: Cell<u32>,
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

#[derive(Clone, Debug)]
struct Gig {
    id: u64,
    rate: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let pane = Pane {
        offset: Cell::new(0),
        height: Cell::new(480),
    };
    let mut gigs: Vec<Gig> = (0..5_000)
        .map(|id| Gig {
            id,
            rate: (id * 7919 % 300) as u32 + 20,
        })
        .collect();

    let mut c = Controller::new(
        WindowedListOptions::new(48)
            .with_item_count(gigs.len())
            .with_overscan(3),
    );
    c.attach(Some(&pane));

    // A burst of wheel events within one frame costs one recompute.
    for step in 1..=10 {
        pane.offset.set(step * 480);
        c.on_event(ViewportEvent::Scroll);
    }
    let w = c.tick(0);
    println!("after burst: {w:?}");

    let anchor = c.capture_first_visible_anchor(&gigs, |g| g.id);
    println!("anchor: {anchor:?}");

    gigs.sort_by_key(|g| g.rate);
    let applied = c.replace_items(gigs.len(), anchor.as_ref(), |id| {
        gigs.iter().position(|g| g.id == *id)
    });
    println!(
        "sorted: anchor applied={applied}, offset={}",
        pane.offset.get()
    );

    gigs.retain(|g| g.rate > 310);
    let applied = c.replace_items(gigs.len(), anchor.as_ref(), |id| {
        gigs.iter().position(|g| g.id == *id)
    });
    println!(
        "filtered to {}: anchor applied={applied}, offset={}, window={:?}",
        gigs.len(),
        pane.offset.get(),
        c.list().window()
    );
    let frame = c.list().render_with_empty(&gigs, |g, _| g.id, || None);
    println!("empty={}", frame.is_empty());
}
