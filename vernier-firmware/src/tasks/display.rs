//! Display refresh task
//!
//! Publishes the composed screen at a fixed rate and shifts it out to
//! the 74HC595 chain when it changed.

use defmt::*;
use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::Spi;
use embassy_time::{Duration, Ticker};

use vernier_core::display::{SegmentBackend, DIGITS};
use vernier_drivers::display::ShiftRegisterDisplay;
use vernier_hal::compat::Compat;

use crate::channels::SCREEN;

/// Segment display on SPI2 with a GPIO latch
pub type Display = ShiftRegisterDisplay<Compat<Spi<'static, Blocking>>, Compat<Output<'static>>>;

/// Display task
#[embassy_executor::task]
pub async fn display_task(mut display: Display, refresh_period_ms: u32) {
    info!("Display task started ({}ms refresh)", refresh_period_ms);

    if let Err(e) = display.blank() {
        error!("Failed to blank display: {:?}", e);
    }

    let mut image = [0u8; DIGITS];
    let mut ticker = Ticker::every(Duration::from_millis(refresh_period_ms as u64));

    loop {
        ticker.next().await;

        if !SCREEN.refresh_into(&mut image) {
            continue;
        }
        if let Err(e) = display.write_digits(&image) {
            warn!("Display update failed: {:?}", e);
        }
    }
}
