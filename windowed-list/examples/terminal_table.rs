// Example: a terminal-style pane driving a windowed table.
//
// Run with `RUST_LOG=windowed_list=trace cargo run --example terminal_table --features tracing`.
use std::cell::Cell;

use tracing_subscriber::EnvFilter;
use windowed_list::{
    Align, Rendered, ScrollContainer, ScrollTo, ViewportEvent, WindowedList, WindowedListOptions,
};

#[derive(Debug)]
struct Pane {
    offset: Cell<u64>,
    rows: Cell<u32>,
}

impl ScrollContainer for Pane {
    fn scroll_offset(&self) -> u64 {
        self.offset.get()
    }

    fn client_height(&self) -> u32 {
        self.rows.get()
    }
}

impl ScrollTo for Pane {
    fn scroll_to(&self, offset: u64) {
        self.offset.set(offset);
    }
}

struct Invoice {
    number: u32,
    amount_cents: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut invoices: Vec<Invoice> = (0..10_000)
        .map(|i| Invoice {
            number: 1000 + i,
            amount_cents: u64::from(i) * 137 % 99_991,
        })
        .collect();

    let pane = Pane {
        offset: Cell::new(0),
        rows: Cell::new(8),
    };
    let mut list = WindowedList::new(
        WindowedListOptions::new(1)
            .with_overscan(2)
            .with_item_count(invoices.len())
            .with_on_change(Some(|w: windowed_list::Window| {
                tracing::info!(start = w.start_index, end = w.end_index, "window changed");
            })),
    );

    let mut scoped = list.attach_scoped(&pane);
    print_frame(&scoped, &invoices);

    pane.offset.set(4_200);
    scoped.handle_event(ViewportEvent::Scroll);
    print_frame(&scoped, &invoices);

    scoped.scroll_to_index(9_999, Align::End);
    print_frame(&scoped, &invoices);

    // Filter down to a handful of rows; the host re-clamps the offset.
    invoices.retain(|inv| inv.amount_cents < 500);
    scoped.set_item_count(invoices.len());
    scoped.reclamp();
    print_frame(&scoped, &invoices);

    invoices.clear();
    scoped.set_item_count(0);
    print_frame(&scoped, &invoices);
}

fn print_frame(list: &WindowedList<&Pane>, invoices: &[Invoice]) {
    let frame = list.render_with_empty(
        invoices,
        |inv, index| {
            format!(
                "{index:>5} | INV-{:<6} | {:>8.2}",
                inv.number,
                inv.amount_cents as f64 / 100.0
            )
        },
        || Some("No results".to_owned()),
    );
    match frame {
        Rendered::Empty(placeholder) => {
            println!("{}", placeholder.unwrap_or_default());
        }
        Rendered::Rows {
            pad_top,
            rows,
            pad_bottom,
        } => {
            println!("-- {pad_top} rows above --");
            for row in rows {
                println!("{row}");
            }
            println!("-- {pad_bottom} rows below --");
        }
    }
    println!();
}
