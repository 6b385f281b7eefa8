//! Double-buffered segment image
//!
//! Formatting operations compose into the back buffer and raise the dirty
//! flag; [`SegmentScreen::refresh_if_needed`] publishes the back buffer to
//! the front buffer, which is what gets transmitted.

use crate::backend::{DisplayError, SegmentBackend};
use crate::segment::{decimal, Glyph, BLANK, MINUS, SEG_DP};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of physical digit positions
pub const DIGITS: usize = 6;

/// Where [`SegmentScreen::set_number`] draws the minus sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SignPlacement {
    /// Leftmost slot, detached from the digits (`-    5`)
    ///
    /// Use [`SignPlacement::Adjacent`] to keep the sign next to the number.
    #[default]
    Edge,
    /// First free slot above the digits (`    -5`)
    Adjacent,
}

/// 6-digit 7-segment screen
#[derive(Debug, Clone)]
pub struct SegmentScreen {
    /// Image being composed
    back: [u8; DIGITS],
    /// Image currently published
    front: [u8; DIGITS],
    /// Back buffer has unpublished changes
    dirty: bool,
    /// Sign layout for raw integers
    sign_placement: SignPlacement,
}

impl Default for SegmentScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentScreen {
    /// Create a blank screen, already marked for its first refresh
    pub const fn new() -> Self {
        Self::with_sign_placement(SignPlacement::Edge)
    }

    /// Create a blank screen with a specific sign layout
    pub const fn with_sign_placement(sign_placement: SignPlacement) -> Self {
        Self {
            back: [BLANK; DIGITS],
            front: [BLANK; DIGITS],
            dirty: true,
            sign_placement,
        }
    }

    /// Blank both buffers and mark the screen dirty
    pub fn init(&mut self) {
        self.back = [BLANK; DIGITS];
        self.front = [BLANK; DIGITS];
        self.dirty = true;
    }

    /// Change the sign layout used by [`set_number`](Self::set_number)
    pub fn set_sign_placement(&mut self, placement: SignPlacement) {
        self.sign_placement = placement;
    }

    /// Current sign layout
    pub fn sign_placement(&self) -> SignPlacement {
        self.sign_placement
    }

    fn clear_back(&mut self) {
        self.back = [BLANK; DIGITS];
    }

    /// Show a signed integer, right aligned
    ///
    /// Values wider than [`DIGITS`] are silently truncated to their low
    /// order digits. The minus sign is only drawn if a slot is left over.
    pub fn set_number(&mut self, value: i32) {
        self.clear_back();

        let negative = value < 0;
        let mut n = value.unsigned_abs();
        let mut idx = 0;

        if n == 0 {
            self.back[idx] = decimal(0);
            idx += 1;
        } else {
            while n != 0 && idx < DIGITS {
                self.back[idx] = decimal(n);
                n /= 10;
                idx += 1;
            }
        }

        if negative && idx < DIGITS {
            let slot = match self.sign_placement {
                SignPlacement::Edge => DIGITS - 1,
                SignPlacement::Adjacent => idx,
            };
            self.back[slot] = MINUS;
        }

        self.dirty = true;
    }

    /// Show a clock as `HH.MM.SS`
    ///
    /// Inputs are not range checked; each field is split with `/ 10` and
    /// `% 10`, and a tens value without a glyph renders blank.
    pub fn set_time(&mut self, hours: u8, minutes: u8, seconds: u8) {
        self.clear_back();

        self.back[5] = Glyph::digit(hours / 10).pattern();
        self.back[4] = Glyph::digit(hours % 10).with_dp();
        self.back[3] = Glyph::digit(minutes / 10).pattern();
        self.back[2] = Glyph::digit(minutes % 10).with_dp();
        self.back[1] = Glyph::digit(seconds / 10).pattern();
        self.back[0] = Glyph::digit(seconds % 10).pattern();

        self.dirty = true;
    }

    /// Show a caliper reading in millimetres with 0.01 mm resolution
    ///
    /// Layout (slot 5 on the left): `xxxx.xx`, the decimal point sits on
    /// slot 2. The minus sign goes directly left of the highest digit, or
    /// replaces it when all six slots are used. Readings beyond
    /// ±9999.99 mm fill every slot with minus bars.
    pub fn show_micrometres(&mut self, value_um: i32) {
        self.clear_back();

        let negative = value_um < 0;
        let mut hundredths = value_um.unsigned_abs() / 10;
        let mut idx = 0;

        // 0.01 mm and 0.1 mm
        self.back[idx] = decimal(hundredths);
        hundredths /= 10;
        idx += 1;
        self.back[idx] = decimal(hundredths);
        hundredths /= 10;
        idx += 1;

        // whole millimetres, with the decimal point
        self.back[idx] = decimal(hundredths) | SEG_DP;
        hundredths /= 10;
        idx += 1;

        while idx < DIGITS && hundredths != 0 {
            self.back[idx] = decimal(hundredths);
            hundredths /= 10;
            idx += 1;
        }

        if negative {
            if idx < DIGITS {
                self.back[idx] = MINUS;
            } else {
                self.back[idx - 1] = MINUS;
            }
        }

        if hundredths != 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("display: {} um does not fit", value_um);
            self.back = [MINUS; DIGITS];
        }

        self.dirty = true;
    }

    /// Hex dump of a raw caliper frame (capture order bytes)
    ///
    /// Slot 0 shows bits 0..3, slot 5 shows bits 20..23.
    pub fn show_raw_hex(&mut self, raw: &[u8; 3]) {
        let value = raw[0] as u32 | (raw[1] as u32) << 8 | (raw[2] as u32) << 16;
        self.show_raw_value(value);
    }

    /// Hex dump of the low 24 bits of `raw`
    pub fn show_raw_value(&mut self, raw: u32) {
        for (slot, segments) in self.back.iter_mut().enumerate() {
            let nibble = (raw >> (4 * slot)) & 0x0F;
            *segments = Glyph::Hex(nibble as u8).pattern();
        }
        self.dirty = true;
    }

    /// Publish the back buffer if it changed
    ///
    /// Returns whether a copy happened.
    pub fn refresh_if_needed(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.front = self.back;
        self.dirty = false;
        true
    }

    /// Refresh and, if anything changed, push the front buffer out
    ///
    /// The dirty flag is cleared even if transmission fails; the caller
    /// decides whether to retry with [`front_buffer`](Self::front_buffer).
    pub fn flush<B: SegmentBackend>(&mut self, backend: &mut B) -> Result<bool, DisplayError> {
        if !self.refresh_if_needed() {
            return Ok(false);
        }
        backend.write_digits(&self.front)?;
        Ok(true)
    }

    /// The published image
    pub fn front_buffer(&self) -> &[u8; DIGITS] {
        &self.front
    }

    /// The image being composed
    pub fn back_buffer(&self) -> &[u8; DIGITS] {
        &self.back
    }

    /// True when a refresh is pending
    pub fn needs_update(&self) -> bool {
        self.dirty
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SegmentScreen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "SegmentScreen[front={=[u8]:x}, dirty={}]",
            &self.front[..],
            self.dirty
        );
    }
}
