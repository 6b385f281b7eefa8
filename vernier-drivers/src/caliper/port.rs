//! Caliper clock/data port
//!
//! The caliper runs at ~1.5 V, so boards usually sit a transistor stage
//! between it and the MCU, which inverts the logic level. The port samples
//! the data line on each clock edge and applies the configured polarity.

use vernier_core::protocol::FrameCapture;
use vernier_core::shared::SharedCapture;
use vernier_hal::InputPin;

/// Data line sampler for one caliper
pub struct CaliperPort<DATA> {
    data: DATA,
    /// If true, a low pin level means a 1 bit
    inverted: bool,
}

impl<DATA: InputPin> CaliperPort<DATA> {
    /// Create a new caliper port
    ///
    /// # Arguments
    /// - `data`: The data line input
    /// - `inverted`: Set when the data line passes through an inverting stage
    pub fn new(data: DATA, inverted: bool) -> Self {
        Self { data, inverted }
    }

    /// Read the current data bit
    pub fn sample(&mut self) -> bool {
        if self.inverted {
            self.data.is_low()
        } else {
            self.data.is_high()
        }
    }

    /// Clock edge handler for exclusively owned capture state
    pub fn on_clock_edge(&mut self, capture: &mut FrameCapture) {
        let bit = self.sample();
        capture.process_bit(bit);
    }

    /// Clock edge handler for capture state shared with another context
    ///
    /// Returns true when this edge completed a frame.
    pub fn on_clock_edge_shared(&mut self, capture: &SharedCapture) -> bool {
        let bit = self.sample();
        capture.with(|c| {
            let was_ready = c.frame_ready();
            c.process_bit(bit);
            !was_ready && c.frame_ready()
        })
    }

    /// Release the data pin
    pub fn release(self) -> DATA {
        self.data
    }
}
