//! Readout pipeline
//!
//! Ties the decoder to the screen: every completed frame is decoded (which
//! restarts capture) and rendered according to the active [`ViewMode`].
//!
//! [`ViewMode`]: crate::config::ViewMode

pub mod pipeline;

pub use pipeline::{ClockTime, Readout};
