//! Frame-to-screen pipeline

use vernier_display::SegmentScreen;
use vernier_protocol::{FrameCapture, Measurement, RawFrame, FRAME_BYTES};

use crate::config::{ReadoutConfig, ViewMode};

/// Wall-clock style time for the clock view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    /// Split an uptime in seconds, hours wrapping at 100
    pub const fn from_uptime_secs(secs: u64) -> Self {
        Self {
            hours: ((secs / 3600) % 100) as u8,
            minutes: ((secs / 60) % 60) as u8,
            seconds: (secs % 60) as u8,
        }
    }
}

/// Consumer side of the caliper link
#[derive(Debug, Clone)]
pub struct Readout {
    view: ViewMode,
    last: Option<Measurement>,
    frames: u32,
}

impl Default for Readout {
    fn default() -> Self {
        Self::new(ViewMode::default())
    }
}

impl Readout {
    /// Create a pipeline showing `view`
    pub const fn new(view: ViewMode) -> Self {
        Self {
            view,
            last: None,
            frames: 0,
        }
    }

    /// Create a pipeline from a config
    pub const fn from_config(config: &ReadoutConfig) -> Self {
        Self::new(config.view)
    }

    /// Active view
    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Switch view; takes effect with the next frame or clock tick
    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    /// Most recent decoded measurement
    pub fn last(&self) -> Option<Measurement> {
        self.last
    }

    /// Frames decoded so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Drain a completed frame from `capture`, if any, and render it
    pub fn poll(
        &mut self,
        capture: &mut FrameCapture,
        screen: &mut SegmentScreen,
    ) -> Option<Measurement> {
        capture
            .take_frame()
            .map(|frame| self.accept(frame.to_bytes(), screen))
    }

    /// Decode one captured frame and render it per the active view
    pub fn accept(&mut self, raw: [u8; FRAME_BYTES], screen: &mut SegmentScreen) -> Measurement {
        let measurement = RawFrame::from_bytes(raw).decode();
        self.last = Some(measurement);
        self.frames = self.frames.wrapping_add(1);

        match self.view {
            ViewMode::Measurement => screen.show_micrometres(measurement.relative_um),
            ViewMode::RawHex => screen.show_raw_hex(&raw),
            ViewMode::Clock => {}
        }

        measurement
    }

    /// Render the clock, if the clock view is active
    ///
    /// Returns whether the screen was touched.
    pub fn show_clock(&self, time: ClockTime, screen: &mut SegmentScreen) -> bool {
        if self.view != ViewMode::Clock {
            return false;
        }
        screen.set_time(time.hours, time.minutes, time.seconds);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vernier_display::segment::{MINUS, SEG_DP};
    use vernier_protocol::FRAME_BITS;

    fn feed(capture: &mut FrameCapture, value: u32) {
        for i in 0..FRAME_BITS {
            capture.process_bit((value >> i) & 1 != 0);
        }
    }

    #[test]
    fn test_poll_without_frame() {
        let mut readout = Readout::default();
        let mut capture = FrameCapture::new();
        let mut screen = SegmentScreen::new();
        screen.refresh_if_needed();

        assert_eq!(readout.poll(&mut capture, &mut screen), None);
        assert!(!screen.needs_update());
        assert_eq!(readout.frames(), 0);
    }

    #[test]
    fn test_measurement_view() {
        let mut readout = Readout::new(ViewMode::Measurement);
        let mut capture = FrameCapture::new();
        let mut screen = SegmentScreen::new();

        // -1.00 mm
        feed(&mut capture, 0x10_0064);
        let m = readout.poll(&mut capture, &mut screen).unwrap();

        assert_eq!(m.relative_um, -1000);
        assert_eq!(capture.bit_index(), 0);
        assert!(!capture.frame_ready());
        assert_eq!(
            screen.back_buffer(),
            &[0x3F, 0x3F, 0x06 | SEG_DP, MINUS, 0, 0]
        );
        assert_eq!(readout.last(), Some(m));
        assert_eq!(readout.frames(), 1);
    }

    #[test]
    fn test_raw_hex_view_uses_undecoded_bytes() {
        let mut readout = Readout::new(ViewMode::RawHex);
        let mut screen = SegmentScreen::new();

        readout.accept([0x64, 0x00, 0x10], &mut screen);
        assert_eq!(
            screen.back_buffer(),
            &[0x66, 0x7D, 0x3F, 0x3F, 0x3F, 0x06]
        );
    }

    #[test]
    fn test_clock_hours_wrap_at_100() {
        assert_eq!(
            ClockTime::from_uptime_secs(99 * 3600 + 3599),
            ClockTime { hours: 99, minutes: 59, seconds: 59 }
        );
        assert_eq!(
            ClockTime::from_uptime_secs(100 * 3600 + 61),
            ClockTime { hours: 0, minutes: 1, seconds: 1 }
        );
        assert_eq!(
            ClockTime::from_uptime_secs(250 * 3600),
            ClockTime { hours: 50, minutes: 0, seconds: 0 }
        );
    }

    #[test]
    fn test_clock_view() {
        let mut readout = Readout::new(ViewMode::Measurement);
        let mut screen = SegmentScreen::new();
        screen.refresh_if_needed();

        let time = ClockTime::from_uptime_secs(3_723);
        assert_eq!(time, ClockTime { hours: 1, minutes: 2, seconds: 3 });
        assert!(!readout.show_clock(time, &mut screen));
        assert!(!screen.needs_update());

        readout.set_view(ViewMode::Clock);
        assert!(readout.show_clock(time, &mut screen));
        assert_eq!(
            screen.back_buffer(),
            &[0x4F, 0x3F, 0x5B | SEG_DP, 0x3F, 0x06 | SEG_DP, 0x3F]
        );

        // frames keep decoding without disturbing the clock
        let before = *screen.back_buffer();
        readout.accept([0x64, 0x00, 0x00], &mut screen);
        assert_eq!(screen.back_buffer(), &before);
        assert_eq!(readout.last().map(|m| m.relative_um), Some(1000));
    }

    #[test]
    fn test_from_config() {
        let config = ReadoutConfig {
            view: ViewMode::RawHex,
            ..ReadoutConfig::default()
        };
        assert_eq!(Readout::from_config(&config).view(), ViewMode::RawHex);
    }
}
