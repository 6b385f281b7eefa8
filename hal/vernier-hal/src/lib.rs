//! Vernier Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the caliper readout
//! needs. Chip support lives in the firmware, which either implements these
//! traits directly or wraps `embedded-hal` 1.0 peripherals with the
//! [`compat`] adapters (enable the `embedded-hal` feature).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  vernier-drivers (shift register, SHT31)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vernier-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embassy-stm32 via compat::Compat<T>    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`spi::SpiBus`] - SPI bus operations

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "embedded-hal")]
pub mod compat;
pub mod gpio;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig};
pub use spi::{SpiBus, SpiConfig};
