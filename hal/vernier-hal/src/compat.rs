//! Adapters for `embedded-hal` 1.0 peripherals
//!
//! [`Compat`] wraps any chip HAL type implementing the matching
//! `embedded-hal` trait and exposes it through this crate's traits.
//!
//! GPIO errors are discarded: every supported chip uses
//! `core::convert::Infallible` for pin operations.

use crate::{I2cBus, InputPin, OutputPin, SpiBus};

/// Wrapper adapting an `embedded-hal` peripheral
#[derive(Debug)]
pub struct Compat<T>(pub T);

impl<T> Compat<T> {
    /// Wrap a peripheral
    pub const fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Release the wrapped peripheral
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: embedded_hal::digital::OutputPin> OutputPin for Compat<T> {
    fn set_high(&mut self) {
        let _ = embedded_hal::digital::OutputPin::set_high(&mut self.0);
    }

    fn set_low(&mut self) {
        let _ = embedded_hal::digital::OutputPin::set_low(&mut self.0);
    }
}

impl<T: embedded_hal::digital::InputPin> InputPin for Compat<T> {
    fn is_high(&mut self) -> bool {
        embedded_hal::digital::InputPin::is_high(&mut self.0).unwrap_or(false)
    }
}

impl<T: embedded_hal::spi::SpiBus<u8>> SpiBus for Compat<T> {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::write(&mut self.0, data)?;
        embedded_hal::spi::SpiBus::flush(&mut self.0)
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for Compat<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::write(&mut self.0, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::read(&mut self.0, address, buf)
    }
}
