//! 7-segment display engine for Vernier
//!
//! This crate provides:
//! - [`Glyph`] and the segment pattern table
//! - [`SegmentScreen`], a double-buffered 6-digit image with a dirty flag
//! - [`SegmentBackend`], the transport trait for pushing an image to hardware
//!
//! # Architecture
//!
//! Formatting calls (`set_number`, `show_micrometres`, ...) only ever touch
//! the back buffer. A periodic refresh copies back to front, and the
//! transport sends the front buffer. Slot 0 is the rightmost (least
//! significant) digit.
//!
//! ```text
//!   set_*/show_*            refresh_if_needed          SegmentBackend
//! ──────────────▶ back[6] ───────────────────▶ front[6] ─────────────▶ 74HC595 chain
//!                  dirty=1                      dirty=0
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod screen;
pub mod segment;

// Re-export key types
pub use backend::{DisplayError, SegmentBackend};
pub use screen::{SegmentScreen, SignPlacement, DIGITS};
pub use segment::Glyph;
