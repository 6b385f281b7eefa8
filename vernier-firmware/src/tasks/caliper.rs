//! Caliper clock edge task
//!
//! Samples the data line on every rising clock edge and feeds the shared
//! capture.

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Input;
use embassy_time::Instant;

use vernier_drivers::caliper::CaliperPort;
use vernier_hal::compat::Compat;

use crate::channels::{CAPTURE, FRAME_GAP, FRAME_READY, SYNC_MONITOR};

/// Caliper port on an STM32 input pin
pub type CaliperData = CaliperPort<Compat<Input<'static>>>;

/// Caliper task - one data bit per clock edge
#[embassy_executor::task]
pub async fn caliper_task(mut clock: ExtiInput<'static>, mut port: CaliperData) {
    info!("Caliper task started");

    loop {
        clock.wait_for_rising_edge().await;

        let now_us = Instant::now().as_micros() as u32;
        SYNC_MONITOR.lock(|m| m.borrow_mut().edge(now_us));

        if port.on_clock_edge_shared(&CAPTURE) {
            FRAME_READY.signal(());
            FRAME_GAP.signal(());
        }
    }
}
