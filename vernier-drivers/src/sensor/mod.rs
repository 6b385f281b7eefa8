//! Ambient sensor drivers

pub mod sht31;

pub use sht31::{Sht31, Sht31Error, Sht31Reading};
