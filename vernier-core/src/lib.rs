//! Board-agnostic core logic for the caliper readout
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Configuration type definitions and their postcard encoding
//! - Link-silence sync monitor (restarts capture after a dropped bit)
//! - Readout pipeline (frame -> measurement -> segment image)
//! - Interrupt-safe shared handles for capture and screen state

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod readout;
pub mod shared;
pub mod sync;

pub use vernier_display as display;
pub use vernier_protocol as protocol;
