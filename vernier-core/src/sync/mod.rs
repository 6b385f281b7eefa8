//! Link synchronisation
//!
//! The caliper protocol has no start marker; frames are delimited only by
//! clock silence. A missed edge shifts every later bit, so a stalled
//! partial frame must be thrown away before the next one starts.

pub mod monitor;

pub use monitor::{SyncMonitor, SyncStatus};
