//! Shahe-compatible digital caliper protocol
//!
//! Low-cost digital calipers push one measurement frame roughly every
//! 8 ms over a two-wire clock/data link. Each frame is 24 bits, sent
//! least-significant bit first, one bit per rising clock edge:
//!
//! ```text
//!  bit  0                15 16   19  20  21  23
//! ┌──────────────────────┬─────────┬────┬──────┐
//! │ COUNTER (0.01 mm)    │  zero   │SIGN│ zero │
//! │ 16 bits, unsigned    │         │ 1b │      │
//! └──────────────────────┴─────────┴────┴──────┘
//! ```
//!
//! Frames are separated by a pause in the clock; a pause longer than a
//! few milliseconds mid-frame means bits were lost and capture must be
//! restarted (see `vernier-core`'s sync monitor).
//!
//! This crate contains the two pieces with actual protocol semantics:
//! - [`FrameCapture`]: bit accumulator, safe to drive from an edge interrupt
//! - [`RawFrame`] / [`Measurement`]: fixed-layout frame decoding

#![no_std]
#![deny(unsafe_code)]

pub mod capture;
pub mod frame;

pub use capture::FrameCapture;
pub use frame::{decode, Measurement, RawFrame, FRAME_BITS, FRAME_BYTES, UM_PER_TICK};
