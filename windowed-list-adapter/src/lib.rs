//! Host integration utilities for the `windowed-list` crate.
//!
//! The `windowed-list` crate is UI-agnostic and focuses on the window math and viewport
//! tracking. This crate provides small, framework-neutral helpers commonly needed by hosts:
//!
//! - Scroll anchoring (keep the row under the viewport top steady across a filter, sort, or
//!   prepend)
//! - Per-frame coalescing of scroll/resize bursts (optional; host-driven ticks)
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod coalesce;
mod controller;


pub use anchor::{ScrollAnchor, anchor_offset, apply_anchor, capture_first_visible_anchor};
pub use coalesce::{DEFAULT_FRAME_INTERVAL_MS, FrameCoalescer, PendingEvents};
pub use controller::Controller;
