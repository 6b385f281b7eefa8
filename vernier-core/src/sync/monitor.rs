//! Clock silence monitor
//!
//! Tracks the time of the last clock edge and reports when the link has
//! been quiet for longer than the configured timeout.

use crate::config::DEFAULT_SYNC_TIMEOUT_US;
use crate::shared::SharedCapture;

/// Link status reported by [`SyncMonitor::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncStatus {
    /// No edge seen since start or since the last timeout
    Idle,
    /// Edges are arriving
    Active,
    /// The link just went silent; restart capture
    Resync,
}

/// Silence watchdog for the caliper clock line
///
/// Timestamps are free-running `u32` microseconds; wraparound is handled
/// with `wrapping_sub`, so gaps up to ~71 minutes are measured correctly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncMonitor {
    /// Silence threshold (µs)
    timeout_us: u32,
    /// Time of the most recent edge, cleared after a timeout
    last_edge_us: Option<u32>,
    /// Silent periods seen, including the normal gap after every frame
    timeouts: u32,
    /// Silent periods that cut a frame short
    stalls: u32,
}

impl Default for SyncMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_SYNC_TIMEOUT_US)
    }
}

impl SyncMonitor {
    /// Create a monitor with the given silence threshold
    pub const fn new(timeout_us: u32) -> Self {
        Self {
            timeout_us,
            last_edge_us: None,
            timeouts: 0,
            stalls: 0,
        }
    }

    /// Record a clock edge
    pub fn edge(&mut self, now_us: u32) {
        self.last_edge_us = Some(now_us);
    }

    /// Check for silence
    ///
    /// Reports [`SyncStatus::Resync`] once per silent period.
    pub fn poll(&mut self, now_us: u32) -> SyncStatus {
        match self.last_edge_us {
            None => SyncStatus::Idle,
            Some(last) if now_us.wrapping_sub(last) >= self.timeout_us => {
                self.last_edge_us = None;
                self.timeouts = self.timeouts.saturating_add(1);
                SyncStatus::Resync
            }
            Some(_) => SyncStatus::Active,
        }
    }

    /// Silence threshold (µs)
    pub fn timeout_us(&self) -> u32 {
        self.timeout_us
    }

    /// Change the silence threshold
    pub fn set_timeout_us(&mut self, timeout_us: u32) {
        self.timeout_us = timeout_us;
    }

    /// Number of silent periods seen so far
    ///
    /// The caliper pauses after every frame, so this grows at the frame
    /// rate on a healthy link. See [`stalls`](Self::stalls) for errors.
    pub fn timeouts(&self) -> u32 {
        self.timeouts
    }

    /// Number of silent periods that discarded a partial frame
    pub fn stalls(&self) -> u32 {
        self.stalls
    }

    /// Poll for silence and resync `capture` when the link went quiet
    ///
    /// Returns true only when a partial frame was thrown away; the pause
    /// after a complete frame is not a stall.
    pub fn service(&mut self, now_us: u32, capture: &SharedCapture) -> bool {
        if self.poll(now_us) != SyncStatus::Resync {
            return false;
        }
        let stalled = capture.resync();
        if stalled {
            self.stalls = self.stalls.saturating_add(1);
        }
        stalled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_first_edge() {
        let mut monitor = SyncMonitor::default();
        assert_eq!(monitor.poll(0), SyncStatus::Idle);
        assert_eq!(monitor.poll(1_000_000), SyncStatus::Idle);
        assert_eq!(monitor.timeouts(), 0);
    }

    #[test]
    fn test_active_within_timeout() {
        let mut monitor = SyncMonitor::new(3_000);
        monitor.edge(100);
        assert_eq!(monitor.poll(100), SyncStatus::Active);
        assert_eq!(monitor.poll(3_099), SyncStatus::Active);
    }

    #[test]
    fn test_resync_reported_once() {
        let mut monitor = SyncMonitor::new(3_000);
        monitor.edge(100);
        assert_eq!(monitor.poll(3_100), SyncStatus::Resync);
        assert_eq!(monitor.poll(3_200), SyncStatus::Idle);
        assert_eq!(monitor.poll(50_000), SyncStatus::Idle);
        assert_eq!(monitor.timeouts(), 1);

        monitor.edge(60_000);
        assert_eq!(monitor.poll(70_000), SyncStatus::Resync);
        assert_eq!(monitor.timeouts(), 2);
    }

    #[test]
    fn test_frame_gaps_are_not_stalls() {
        let capture = SharedCapture::new();
        let mut monitor = SyncMonitor::new(3_000);
        let mut now = 0u32;

        for _ in 0..5 {
            for _ in 0..24 {
                capture.process_bit(false);
                monitor.edge(now);
                now += 10;
            }
            capture.take_frame();
            now += 8_000;
            assert!(!monitor.service(now, &capture));
        }

        assert_eq!(monitor.timeouts(), 5);
        assert_eq!(monitor.stalls(), 0);
    }

    #[test]
    fn test_partial_frame_counts_as_stall() {
        let capture = SharedCapture::new();
        let mut monitor = SyncMonitor::new(3_000);

        for t in 0..7 {
            capture.process_bit(true);
            monitor.edge(t * 10);
        }
        assert!(!monitor.service(1_000, &capture));
        assert!(monitor.service(4_000, &capture));
        assert_eq!(capture.with(|c| c.bit_index()), 0);
        assert_eq!(monitor.stalls(), 1);

        // reported once per silent period
        assert!(!monitor.service(9_000, &capture));
        assert_eq!(monitor.stalls(), 1);
    }

    #[test]
    fn test_edges_keep_link_alive() {
        let mut monitor = SyncMonitor::new(3_000);
        for t in (0..20_000).step_by(1_000) {
            monitor.edge(t);
            assert_eq!(monitor.poll(t + 500), SyncStatus::Active);
        }
        assert_eq!(monitor.timeouts(), 0);
    }

    #[test]
    fn test_timer_wraparound() {
        let mut monitor = SyncMonitor::new(3_000);
        monitor.edge(u32::MAX - 1_000);
        assert_eq!(monitor.poll(500), SyncStatus::Active);
        assert_eq!(monitor.poll(2_000), SyncStatus::Resync);
    }
}
