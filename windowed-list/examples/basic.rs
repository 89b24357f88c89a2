// Example: minimal usage of the window calculator and spacer model.
use windowed_list::{Overscan, compute_window, total_extent};

fn main() {
    let w = compute_window(1_000_000, 20, 123_456, 400, Overscan::symmetric(3));
    println!("total_extent={}", total_extent(1_000_000, 20));
    println!(
        "rows={}..={} pad_top={} pad_bottom={}",
        w.start_index, w.end_index, w.pad_top, w.pad_bottom
    );

    let empty = compute_window(0, 20, 0, 400, 3);
    println!("empty degenerate={}", empty.is_degenerate());
}
