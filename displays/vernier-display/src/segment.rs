//! Segment patterns
//!
//! One byte per digit: bit0=A, bit1=B, bit2=C, bit3=D, bit4=E, bit5=F,
//! bit6=G, bit7=decimal point.
//!
//! ```text
//!    ─A─
//!   F   B
//!    ─G─
//!   E   C
//!    ─D─  .DP
//! ```

/// Segment A - top
pub const SEG_A: u8 = 1 << 0;
/// Segment B - top right
pub const SEG_B: u8 = 1 << 1;
/// Segment C - bottom right
pub const SEG_C: u8 = 1 << 2;
/// Segment D - bottom
pub const SEG_D: u8 = 1 << 3;
/// Segment E - bottom left
pub const SEG_E: u8 = 1 << 4;
/// Segment F - top left
pub const SEG_F: u8 = 1 << 5;
/// Segment G - middle
pub const SEG_G: u8 = 1 << 6;
/// Decimal point
pub const SEG_DP: u8 = 1 << 7;

/// All segments off
pub const BLANK: u8 = 0x00;

/// Middle bar only, used as a sign glyph
pub const MINUS: u8 = SEG_G;

/// Patterns for nibble values 0x0..=0xF
pub const HEX_DIGITS: [u8; 16] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
    0x77, // A
    0x7C, // b
    0x39, // C
    0x5E, // d
    0x79, // E
    0x71, // F
];

/// A symbol that can occupy one digit slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// A nibble value 0x0..=0xF
    Hex(u8),
    /// All segments off
    Blank,
    /// Sign bar
    Minus,
}

impl Glyph {
    /// Glyph for a single value, blank when it has no symbol
    ///
    /// Values 10..=15 render as hex letters.
    pub const fn digit(value: u8) -> Self {
        if value < 16 {
            Glyph::Hex(value)
        } else {
            Glyph::Blank
        }
    }

    /// Segment pattern without decimal point
    pub const fn pattern(self) -> u8 {
        match self {
            Glyph::Hex(n) if n < 16 => HEX_DIGITS[n as usize],
            Glyph::Hex(_) | Glyph::Blank => BLANK,
            Glyph::Minus => MINUS,
        }
    }

    /// Segment pattern with the decimal point lit
    pub const fn with_dp(self) -> u8 {
        self.pattern() | SEG_DP
    }
}

/// Pattern for a decimal digit (`value % 10`)
pub(crate) const fn decimal(value: u32) -> u8 {
    HEX_DIGITS[(value % 10) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_table() {
        let expected = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];
        for (d, pattern) in expected.iter().enumerate() {
            assert_eq!(Glyph::digit(d as u8).pattern(), *pattern);
        }
    }

    #[test]
    fn test_reserved_glyphs() {
        assert_eq!(Glyph::Blank.pattern(), 0x00);
        assert_eq!(Glyph::Minus.pattern(), 0x40);
    }

    #[test]
    fn test_segment_composition() {
        assert_eq!(SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F, HEX_DIGITS[0]);
        assert_eq!(SEG_B | SEG_C, HEX_DIGITS[1]);
    }

    #[test]
    fn test_with_dp() {
        assert_eq!(Glyph::digit(5).with_dp(), 0x6D | 0x80);
    }

    #[test]
    fn test_out_of_range_is_blank() {
        assert_eq!(Glyph::digit(16), Glyph::Blank);
        assert_eq!(Glyph::Hex(200).pattern(), BLANK);
    }
}
