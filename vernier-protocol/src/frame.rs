//! Frame layout and decoding
//!
//! Frame format (LSB-first, byte 0 = bits 0..7):
//! - bits 0..15: unsigned counter, one tick = 0.01 mm
//! - bit 20: sign (1 = negative)
//! - all other bits: zero by protocol, never validated

/// Number of bits in one frame
pub const FRAME_BITS: u8 = 24;

/// Number of bytes in one frame
pub const FRAME_BYTES: usize = 3;

/// Micrometres per counter tick (0.01 mm)
pub const UM_PER_TICK: i32 = 10;

/// Counter field mask (bits 0..15)
const COUNTER_MASK: u32 = 0xFFFF;

/// Sign flag (bit 20)
const SIGN_MASK: u32 = 1 << 20;

/// Mask of the 24 meaningful bits
const FRAME_MASK: u32 = (1 << FRAME_BITS) - 1;

/// A complete 24-bit frame as received on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame(u32);

impl RawFrame {
    /// Build a frame from its 24-bit value (upper bits are discarded)
    pub const fn new(value: u32) -> Self {
        Self(value & FRAME_MASK)
    }

    /// Reassemble a frame from capture order bytes (little-endian)
    pub const fn from_bytes(bytes: [u8; FRAME_BYTES]) -> Self {
        Self(bytes[0] as u32 | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16)
    }

    /// Split the frame back into capture order bytes
    pub const fn to_bytes(self) -> [u8; FRAME_BYTES] {
        [self.0 as u8, (self.0 >> 8) as u8, (self.0 >> 16) as u8]
    }

    /// The raw 24-bit value
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Unsigned magnitude counter in 0.01 mm ticks
    pub const fn counter(self) -> u16 {
        (self.0 & COUNTER_MASK) as u16
    }

    /// Whether the sign flag is set
    pub const fn is_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }

    /// Signed relative position in micrometres
    pub const fn micrometres(self) -> i32 {
        let um = self.counter() as i32 * UM_PER_TICK;
        if self.is_negative() {
            -um
        } else {
            um
        }
    }

    /// Decode into a [`Measurement`]
    pub const fn decode(self) -> Measurement {
        Measurement {
            relative_um: self.micrometres(),
            absolute_um: 0,
        }
    }
}

impl From<[u8; FRAME_BYTES]> for RawFrame {
    fn from(bytes: [u8; FRAME_BYTES]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// A decoded caliper reading
///
/// Shahe-type calipers only transmit the relative channel; `absolute_um`
/// is carried for API parity with two-channel calipers and is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Position relative to the last zeroing, in micrometres (10 µm steps)
    pub relative_um: i32,
    /// Absolute position channel (not transmitted, always 0)
    pub absolute_um: i32,
}

/// Decode three capture order bytes
///
/// Any bit pattern decodes; out-of-protocol bits are ignored.
pub const fn decode(bytes: [u8; FRAME_BYTES]) -> Measurement {
    RawFrame::from_bytes(bytes).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_zero() {
        let m = decode([0x00, 0x00, 0x00]);
        assert_eq!(m.relative_um, 0);
        assert_eq!(m.absolute_um, 0);
    }

    #[test]
    fn test_decode_positive() {
        // counter = 100 ticks = 1.00 mm
        let m = decode([0x64, 0x00, 0x00]);
        assert_eq!(m.relative_um, 1000);
    }

    #[test]
    fn test_decode_negative() {
        // bit 20 lives in byte 2, bit 4
        let m = decode([0x64, 0x00, 0x10]);
        assert_eq!(m.relative_um, -1000);
        assert_eq!(m.absolute_um, 0);
    }

    #[test]
    fn test_decode_full_scale() {
        let m = decode([0xFF, 0xFF, 0x00]);
        assert_eq!(m.relative_um, 655_350);
    }

    #[test]
    fn test_reserved_bits_ignored() {
        // bits 16..19 and 21..23 set: counter and sign still read cleanly
        let frame = RawFrame::from_bytes([0x2C, 0x01, 0xEF]);
        assert_eq!(frame.counter(), 300);
        assert!(!frame.is_negative());
        assert_eq!(frame.micrometres(), 3000);
    }

    #[test]
    fn test_negative_zero() {
        let frame = RawFrame::from_bytes([0x00, 0x00, 0x10]);
        assert!(frame.is_negative());
        assert_eq!(frame.micrometres(), 0);
    }

    #[test]
    fn test_byte_order() {
        let frame = RawFrame::from_bytes([0x56, 0x34, 0x12]);
        assert_eq!(frame.value(), 0x12_3456);
        assert_eq!(frame.to_bytes(), [0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_new_masks_upper_bits() {
        assert_eq!(RawFrame::new(0xFF12_3456).value(), 0x12_3456);
    }
}
