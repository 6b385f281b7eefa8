//! 74HC595 shift-register segment display
//!
//! One register per digit, daisy-chained. The register closest to the MCU
//! ends up holding the last byte shifted in, so the chain is fed from the
//! far digit (slot 5) down to slot 0. The latch line (RCLK) copies the
//! shift stages to the outputs on its rising edge, so the digits change
//! together.

use vernier_core::display::{DisplayError, SegmentBackend, DIGITS};
use vernier_hal::{OutputPin, SpiBus};

/// LED wiring of the digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentPolarity {
    /// Segment lit when its output is high
    #[default]
    CommonCathode,
    /// Segment lit when its output is low
    CommonAnode,
}

impl SegmentPolarity {
    /// Convert a segment pattern to register output levels
    pub const fn apply(self, pattern: u8) -> u8 {
        match self {
            Self::CommonCathode => pattern,
            Self::CommonAnode => !pattern,
        }
    }
}

/// Shift-register chain display
pub struct ShiftRegisterDisplay<SPI, LATCH> {
    spi: SPI,
    latch: LATCH,
    polarity: SegmentPolarity,
}

impl<SPI: SpiBus, LATCH: OutputPin> ShiftRegisterDisplay<SPI, LATCH> {
    /// Create a new display driver
    ///
    /// The latch line is driven high so the outputs hold whatever the
    /// registers power up with until the first write.
    pub fn new(spi: SPI, mut latch: LATCH, polarity: SegmentPolarity) -> Self {
        latch.set_high();
        Self {
            spi,
            latch,
            polarity,
        }
    }

    /// Configured LED polarity
    pub fn polarity(&self) -> SegmentPolarity {
        self.polarity
    }

    /// Release the bus and latch pin
    pub fn release(self) -> (SPI, LATCH) {
        (self.spi, self.latch)
    }
}

impl<SPI: SpiBus, LATCH: OutputPin> SegmentBackend for ShiftRegisterDisplay<SPI, LATCH> {
    fn write_digits(&mut self, digits: &[u8; DIGITS]) -> Result<(), DisplayError> {
        let mut frame = [0u8; DIGITS];
        for (out, pattern) in frame.iter_mut().zip(digits.iter().rev()) {
            *out = self.polarity.apply(*pattern);
        }

        self.latch.set_low();
        let result = self.spi.write(&frame);
        // always release the latch, even after a failed transfer
        self.latch.set_high();

        result.map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("display transfer failed");
            DisplayError::Communication
        })
    }
}
