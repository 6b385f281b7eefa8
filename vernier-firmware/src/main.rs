//! Vernier - Digital Caliper Readout Firmware
//!
//! Reads the synchronous clock/data output of a Shahe-compatible caliper,
//! decodes each 24-bit frame and shows the reading on a 6-digit
//! 7-segment display behind a 74HC595 chain.
//!
//! Board: STM32F411CE "black pill"
//!
//! | Signal       | Pin  |
//! |--------------|------|
//! | Caliper CLK  | PA0  |
//! | Caliper DATA | PA1  |
//! | 595 SRCLK    | PB13 |
//! | 595 SER      | PB15 |
//! | 595 RCLK     | PB12 |
//! | SHT31 SCL    | PB6  |
//! | SHT31 SDA    | PB7  |
//! | Status LED   | PC13 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, interrupt};
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use vernier_core::config::{ReadoutConfig, ViewMode};
use vernier_core::display::SignPlacement;
use vernier_core::readout::Readout;
use vernier_drivers::caliper::CaliperPort;
use vernier_drivers::display::{SegmentPolarity, ShiftRegisterDisplay};
use vernier_drivers::sensor::Sht31;
use vernier_hal::compat::Compat;
use vernier_hal::{I2cConfig, OutputPin, SpiConfig};

mod channels;
mod tasks;

use crate::channels::SCREEN;

// Generated by build.rs from vernier.toml
include!(concat!(env!("OUT_DIR"), "/readout_config.rs"));

bind_interrupts!(struct Irqs {
    EXTI0 => exti::InterruptHandler<interrupt::typelevel::EXTI0>;
});

/// Heartbeat LED half-period
const HEARTBEAT_MS: u64 = 500;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Vernier firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = match READOUT_CONFIG.validate() {
        Ok(()) => READOUT_CONFIG,
        Err(e) => {
            warn!("Built-in config rejected ({:?}), using defaults", e);
            ReadoutConfig::DEFAULT
        }
    };
    info!("Config: {:?}", config);

    // Display chain on SPI2, transmit only
    let hal_spi = SpiConfig::default();
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(hal_spi.frequency);
    spi_config.mode = spi_mode(hal_spi.mode);
    let spi = Spi::new_blocking_txonly(p.SPI2, p.PB13, p.PB15, spi_config);
    let latch = Output::new(p.PB12, Level::High, Speed::Low);
    let display = ShiftRegisterDisplay::new(
        Compat::new(spi),
        Compat::new(latch),
        SegmentPolarity::CommonCathode,
    );
    SCREEN.with(|screen| {
        screen.init();
        screen.set_sign_placement(config.sign_placement);
    });
    info!("Display initialized");

    // Caliper link
    let clock = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up, Irqs);
    let data = Input::new(p.PA1, Pull::Up);
    let port = CaliperPort::new(Compat::new(data), config.invert_data);
    info!("Caliper port initialized (inverted={})", config.invert_data);

    // Ambient sensor on I2C1; fast mode keeps each transfer short
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = Hertz(I2cConfig::FAST.frequency);
    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c_config);
    let sensor = Sht31::new(Compat::new(i2c));

    // Spawn tasks
    spawner.spawn(tasks::caliper_task(clock, port)).unwrap();
    spawner
        .spawn(tasks::watchdog_task(config.sync_timeout_us))
        .unwrap();
    spawner
        .spawn(tasks::readout_task(Readout::from_config(&config)))
        .unwrap();
    spawner
        .spawn(tasks::display_task(display, config.refresh_period_ms))
        .unwrap();
    spawner
        .spawn(tasks::sensor_task(sensor, config.sensor_period_ms))
        .unwrap();

    info!("All tasks spawned");

    // Status LED (active low) doubles as a heartbeat
    let mut led = Compat::new(Output::new(p.PC13, Level::High, Speed::Low));
    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_MS));
    let mut lit = false;
    loop {
        ticker.next().await;
        lit = !lit;
        led.set_state(!lit);
    }
}

/// Convert the bus-neutral SPI mode to the chip HAL's
fn spi_mode(mode: vernier_hal::spi::Mode) -> spi::Mode {
    let (polarity, phase): (vernier_hal::spi::Polarity, vernier_hal::spi::Phase) = mode.into();
    spi::Mode {
        polarity: match polarity {
            vernier_hal::spi::Polarity::IdleLow => spi::Polarity::IdleLow,
            vernier_hal::spi::Polarity::IdleHigh => spi::Polarity::IdleHigh,
        },
        phase: match phase {
            vernier_hal::spi::Phase::CaptureOnFirstTransition => {
                spi::Phase::CaptureOnFirstTransition
            }
            vernier_hal::spi::Phase::CaptureOnSecondTransition => {
                spi::Phase::CaptureOnSecondTransition
            }
        },
    }
}
