//! Interrupt-safe shared state
//!
//! The capture state is written from the clock edge handler and drained
//! from the readout task; the screen is composed by the readout task and
//! published by the refresh task. Both are wrapped in a critical-section
//! mutex so each multi-field update is observed whole, and so they can be
//! declared as `static` items.
//!
//! Every closure runs with interrupts masked: keep it short.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use vernier_display::{SegmentScreen, DIGITS};
use vernier_protocol::{FrameCapture, Measurement, FRAME_BYTES};

/// Capture state shared between the edge handler and the decoder
pub struct SharedCapture {
    inner: Mutex<CriticalSectionRawMutex, RefCell<FrameCapture>>,
}

impl Default for SharedCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedCapture {
    /// Create an empty shared capture
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(FrameCapture::new())),
        }
    }

    /// Run `f` with exclusive access to the capture state
    pub fn with<R>(&self, f: impl FnOnce(&mut FrameCapture) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Feed one data bit (edge handler side)
    pub fn process_bit(&self, bit: bool) {
        self.with(|capture| capture.process_bit(bit));
    }

    /// Whether a complete frame is waiting
    pub fn frame_ready(&self) -> bool {
        self.with(|capture| capture.frame_ready())
    }

    /// Unconditionally restart capture
    pub fn reset(&self) {
        self.with(|capture| capture.reset());
    }

    /// Discard a stalled partial frame, keeping a completed one
    ///
    /// Returns whether anything was discarded.
    pub fn resync(&self) -> bool {
        self.with(|capture| {
            let stalled = capture.is_partial();
            if stalled {
                capture.reset();
            }
            stalled
        })
    }

    /// Snapshot and release a completed frame in one step
    pub fn take_frame(&self) -> Option<[u8; FRAME_BYTES]> {
        self.with(|capture| capture.take_frame().map(|frame| frame.to_bytes()))
    }

    /// Decode a completed frame, if any
    pub fn take_measurement(&self) -> Option<Measurement> {
        self.with(|capture| capture.frame_ready().then(|| capture.decode()))
    }
}

/// Screen shared between the formatter and the refresh task
pub struct SharedScreen {
    inner: Mutex<CriticalSectionRawMutex, RefCell<SegmentScreen>>,
}

impl Default for SharedScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedScreen {
    /// Create a blank shared screen
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(SegmentScreen::new())),
        }
    }

    /// Run `f` with exclusive access to the screen
    pub fn with<R>(&self, f: impl FnOnce(&mut SegmentScreen) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Publish pending changes and copy the front buffer out
    ///
    /// Returns false (leaving `out` untouched) when nothing changed, so
    /// the transport can skip the transfer.
    pub fn refresh_into(&self, out: &mut [u8; DIGITS]) -> bool {
        self.with(|screen| {
            let refreshed = screen.refresh_if_needed();
            if refreshed {
                *out = *screen.front_buffer();
            }
            refreshed
        })
    }

    /// Whether a refresh is pending
    pub fn needs_update(&self) -> bool {
        self.with(|screen| screen.needs_update())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::sync::Arc;
    use std::thread;
    use vernier_protocol::FRAME_BITS;

    fn feed(capture: &SharedCapture, value: u32) {
        for i in 0..FRAME_BITS {
            capture.process_bit((value >> i) & 1 != 0);
        }
    }

    #[test]
    fn test_take_frame_releases_capture() {
        let capture = SharedCapture::new();
        assert_eq!(capture.take_frame(), None);

        feed(&capture, 0x10_0064);
        assert!(capture.frame_ready());
        assert_eq!(capture.take_frame(), Some([0x64, 0x00, 0x10]));
        assert!(!capture.frame_ready());
        assert_eq!(capture.with(|c| c.bit_index()), 0);
    }

    #[test]
    fn test_take_measurement() {
        let capture = SharedCapture::new();
        assert_eq!(capture.take_measurement(), None);
        feed(&capture, 0x00_0064);
        assert_eq!(capture.take_measurement().map(|m| m.relative_um), Some(1000));
        assert_eq!(capture.take_measurement(), None);
    }

    #[test]
    fn test_resync_keeps_completed_frame() {
        let capture = SharedCapture::new();
        assert!(!capture.resync());

        for _ in 0..5 {
            capture.process_bit(true);
        }
        assert!(capture.resync());
        assert_eq!(capture.with(|c| c.bit_index()), 0);

        feed(&capture, 0x00_0001);
        assert!(!capture.resync());
        assert!(capture.frame_ready());
    }

    #[test]
    fn test_refresh_into() {
        let screen = SharedScreen::new();
        let mut out = [0xAA; DIGITS];

        assert!(screen.refresh_into(&mut out));
        assert_eq!(out, [0; DIGITS]);

        out = [0xAA; DIGITS];
        assert!(!screen.refresh_into(&mut out));
        assert_eq!(out, [0xAA; DIGITS]);

        screen.with(|s| s.set_number(1));
        assert!(screen.needs_update());
        assert!(screen.refresh_into(&mut out));
        assert_eq!(out, [0x06, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_concurrent_writer_and_refresher() {
        // A published image must always be one that some writer composed
        // in full, never a mix of two.
        let screen = Arc::new(SharedScreen::new());
        let writer = {
            let screen = Arc::clone(&screen);
            thread::spawn(move || {
                for i in 0..2_000 {
                    let value = if i % 2 == 0 { 111_111 } else { 888_888 };
                    screen.with(|s| s.set_number(value));
                }
            })
        };

        let ones = [0x06; DIGITS];
        let eights = [0x7F; DIGITS];
        let mut out = [0; DIGITS];
        for _ in 0..2_000 {
            if screen.refresh_into(&mut out) {
                assert!(out == ones || out == eights || out == [0; DIGITS]);
            }
        }
        writer.join().unwrap();
    }
}
