//! Readout task
//!
//! Decodes completed frames into the shared screen, and ticks the clock
//! view once per second.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};

use vernier_core::readout::{ClockTime, Readout};

use crate::channels::{CAPTURE, FRAME_READY, SCREEN};

/// Readout task
#[embassy_executor::task]
pub async fn readout_task(mut readout: Readout) {
    info!("Readout task started ({:?} view)", readout.view());

    let mut clock_tick = Ticker::every(Duration::from_secs(1));

    loop {
        match select(FRAME_READY.wait(), clock_tick.next()).await {
            Either::First(()) => {
                let Some(raw) = CAPTURE.take_frame() else {
                    // completed frame already discarded by a resync
                    continue;
                };
                let m = SCREEN.with(|screen| readout.accept(raw, screen));
                trace!(
                    "Frame {}: {} um (abs {} um)",
                    readout.frames(),
                    m.relative_um,
                    m.absolute_um
                );
            }
            Either::Second(()) => {
                let time = ClockTime::from_uptime_secs(Instant::now().as_secs());
                SCREEN.with(|screen| readout.show_clock(time, screen));
            }
        }
    }
}
