//! Ambient sensor task
//!
//! Polls the SHT31 and logs workshop temperature and humidity alongside
//! the readings.
//!
//! The I2C calls block the executor that also services caliper clock
//! edges, so any edge arriving mid-transfer is lost. Each transfer is
//! therefore started right after a frame completes, inside the caliper's
//! quiet gap of several milliseconds. If no frame shows up within
//! [`GAP_WAIT_MS`] (caliper off or unplugged) the transfer goes ahead.

use defmt::*;
use embassy_stm32::i2c::{I2c, Master};
use embassy_stm32::mode::Blocking;
use embassy_time::{with_timeout, Duration, Ticker, Timer};

use vernier_drivers::sensor::sht31::MEASUREMENT_DURATION_MS;
use vernier_drivers::sensor::Sht31;
use vernier_hal::compat::Compat;

use crate::channels::FRAME_GAP;

/// Longest wait for a frame gap before touching the bus anyway
pub const GAP_WAIT_MS: u64 = 50;

/// SHT31 on I2C1
pub type AmbientSensor = Sht31<Compat<I2c<'static, Blocking, Master>>>;

/// Sensor task
#[embassy_executor::task]
pub async fn sensor_task(mut sensor: AmbientSensor, period_ms: u32) {
    info!("Sensor task started (addr 0x{:02x})", sensor.address());

    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));

    loop {
        ticker.next().await;

        wait_for_gap().await;
        if let Err(e) = sensor.start_measurement() {
            warn!("SHT31 trigger failed: {:?}", e);
            continue;
        }

        Timer::after(Duration::from_millis(MEASUREMENT_DURATION_MS as u64)).await;

        wait_for_gap().await;
        match sensor.read_measurement() {
            Ok(reading) => {
                debug!(
                    "Ambient: {}.{:02}C {}.{:02}%RH",
                    reading.temperature_centi / 100,
                    (reading.temperature_centi % 100).unsigned_abs(),
                    reading.humidity_centi / 100,
                    reading.humidity_centi % 100
                );
            }
            Err(e) => warn!("SHT31 read failed: {:?}", e),
        }
    }
}

/// Wait until the caliper has just finished a frame
async fn wait_for_gap() {
    FRAME_GAP.reset();
    let _ = with_timeout(Duration::from_millis(GAP_WAIT_MS), FRAME_GAP.wait()).await;
}
