//! Bit-level frame capture
//!
//! [`FrameCapture`] is fed one data bit per rising clock edge. After
//! [`FRAME_BITS`] bits the frame is latched and further bits are dropped
//! until the frame has been consumed by [`FrameCapture::decode`] or the
//! state is [`reset`](FrameCapture::reset).
//!
//! All methods are O(1) and never block, so they can be
//! called straight from an EXTI handler.

use crate::frame::{Measurement, RawFrame, FRAME_BITS, FRAME_BYTES};

/// Capture state machine for one caliper link
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameCapture {
    /// Bits received so far, bit 0 = first bit after reset
    shift_reg: u32,
    /// Number of bits received since reset (0..=FRAME_BITS)
    bit_index: u8,
    /// Latched once `bit_index == FRAME_BITS`
    ready: bool,
    /// Snapshot of the last completed frame
    raw: [u8; FRAME_BYTES],
}

impl Default for FrameCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCapture {
    /// Create an empty capture state
    pub const fn new() -> Self {
        Self {
            shift_reg: 0,
            bit_index: 0,
            ready: false,
            raw: [0; FRAME_BYTES],
        }
    }

    /// Discard any partial frame and restart capture
    ///
    /// The last completed snapshot stays readable through
    /// [`raw_bytes`](Self::raw_bytes).
    pub fn reset(&mut self) {
        self.shift_reg = 0;
        self.bit_index = 0;
        self.ready = false;
    }

    /// Feed a single data bit sampled on a clock edge
    ///
    /// Ignored while a completed frame is waiting to be consumed.
    pub fn process_bit(&mut self, bit: bool) {
        if self.ready {
            #[cfg(feature = "defmt")]
            defmt::trace!("caliper: bit dropped, frame not consumed");
            return;
        }

        self.shift_reg |= (bit as u32) << self.bit_index;
        self.bit_index += 1;

        if self.bit_index >= FRAME_BITS {
            self.raw = RawFrame::new(self.shift_reg).to_bytes();
            self.ready = true;
        }
    }

    /// True once a full frame has been captured
    pub fn frame_ready(&self) -> bool {
        self.ready
    }

    /// Bits received since the last reset
    pub fn bit_index(&self) -> u8 {
        self.bit_index
    }

    /// True while a frame is partially received
    ///
    /// This is the only state a link-silence timeout should discard.
    pub fn is_partial(&self) -> bool {
        self.bit_index > 0 && !self.ready
    }

    /// Snapshot of the last completed frame, LSB-first
    ///
    /// Only meaningful while [`frame_ready`](Self::frame_ready) is true.
    pub fn raw_bytes(&self) -> [u8; FRAME_BYTES] {
        self.raw
    }

    /// Decode the latched frame and restart capture
    pub fn decode(&mut self) -> Measurement {
        let measurement = RawFrame::from_bytes(self.raw).decode();
        self.reset();
        measurement
    }

    /// Take the completed frame, if any, restarting capture
    pub fn take_frame(&mut self) -> Option<RawFrame> {
        if !self.ready {
            return None;
        }
        let frame = RawFrame::from_bytes(self.raw);
        self.reset();
        Some(frame)
    }
}
