//! Link silence watchdog
//!
//! A dropped or spurious clock edge leaves the capture out of step with
//! the caliper. The frame gap is silent for milliseconds, so a partial
//! frame that sees no edges for the sync timeout is thrown away and the
//! next burst starts on bit 0.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use crate::channels::{CAPTURE, SYNC_MONITOR};

/// Polling interval in microseconds
pub const POLL_INTERVAL_US: u64 = 500;

/// Watchdog task
#[embassy_executor::task]
pub async fn watchdog_task(timeout_us: u32) {
    info!("Watchdog task started (timeout {}us)", timeout_us);

    SYNC_MONITOR.lock(|m| m.borrow_mut().set_timeout_us(timeout_us));
    let mut ticker = Ticker::every(Duration::from_micros(POLL_INTERVAL_US));

    loop {
        ticker.next().await;

        let now_us = Instant::now().as_micros() as u32;
        let stalls = SYNC_MONITOR.lock(|m| {
            let mut monitor = m.borrow_mut();
            monitor.service(now_us, &CAPTURE).then(|| monitor.stalls())
        });

        if let Some(stalls) = stalls {
            warn!("Caliper link stalled mid-frame, resync #{}", stalls);
        }
    }
}
