//! Inter-task shared state
//!
//! The capture and screen handles are critical-section protected so the
//! clock edge task and the periodic tasks can reach them without awaiting.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use vernier_core::config::DEFAULT_SYNC_TIMEOUT_US;
use vernier_core::shared::{SharedCapture, SharedScreen};
use vernier_core::sync::SyncMonitor;

/// Capture state written on each caliper clock edge
pub static CAPTURE: SharedCapture = SharedCapture::new();

/// Screen composed by the readout task and sent by the display task
pub static SCREEN: SharedScreen = SharedScreen::new();

/// Clock line silence monitor; timeout replaced from config at startup
pub static SYNC_MONITOR: Mutex<CriticalSectionRawMutex, RefCell<SyncMonitor>> =
    Mutex::new(RefCell::new(SyncMonitor::new(DEFAULT_SYNC_TIMEOUT_US)));

/// Signal that a complete frame is waiting in [`CAPTURE`]
pub static FRAME_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that the caliper just finished a frame and the link is quiet
pub static FRAME_GAP: Signal<CriticalSectionRawMutex, ()> = Signal::new();
