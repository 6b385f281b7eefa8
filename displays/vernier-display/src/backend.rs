//! Display backend trait
//!
//! Defines the interface for pushing a finished segment image to hardware.

use crate::screen::DIGITS;
use crate::segment::BLANK;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display hardware
    Communication,
}

/// Segment display backend
///
/// Implementations own the physical transport (shift registers over SPI,
/// a multiplexing driver IC, ...). Index 0 of `digits` is the rightmost
/// digit.
pub trait SegmentBackend {
    /// Send a complete 6-digit image
    fn write_digits(&mut self, digits: &[u8; DIGITS]) -> Result<(), DisplayError>;

    /// Turn every segment off
    fn blank(&mut self) -> Result<(), DisplayError> {
        self.write_digits(&[BLANK; DIGITS])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latched {
        last: Option<[u8; DIGITS]>,
    }

    impl SegmentBackend for Latched {
        fn write_digits(&mut self, digits: &[u8; DIGITS]) -> Result<(), DisplayError> {
            self.last = Some(*digits);
            Ok(())
        }
    }

    struct Unplugged;

    impl SegmentBackend for Unplugged {
        fn write_digits(&mut self, _digits: &[u8; DIGITS]) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }
    }

    #[test]
    fn test_blank_writes_all_off() {
        let mut backend = Latched { last: None };
        assert_eq!(backend.blank(), Ok(()));
        assert_eq!(backend.last, Some([BLANK; DIGITS]));
    }

    #[test]
    fn test_blank_reports_transport_failure() {
        assert_eq!(Unplugged.blank(), Err(DisplayError::Communication));
    }
}
