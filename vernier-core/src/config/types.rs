//! Configuration type definitions

use vernier_display::SignPlacement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clock silence that marks a lost frame, in microseconds
///
/// Frames arrive every ~8 ms and a frame's bits are clocked in well under
/// a millisecond, so a 3 ms gap can only mean the link stalled mid-frame.
pub const DEFAULT_SYNC_TIMEOUT_US: u32 = 3_000;

/// Display refresh period in milliseconds
pub const DEFAULT_REFRESH_PERIOD_MS: u32 = 20;

/// Ambient sensor polling period in milliseconds
pub const DEFAULT_SENSOR_PERIOD_MS: u32 = 2_000;

/// What the readout shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ViewMode {
    /// Decoded reading in millimetres
    #[default]
    Measurement,
    /// Hex dump of each raw frame
    RawHex,
    /// Uptime clock; frames are still decoded but not drawn
    Clock,
}

/// Readout configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadoutConfig {
    /// Active view
    pub view: ViewMode,
    /// Minus sign layout for raw integers
    pub sign_placement: SignPlacement,
    /// Clock silence before a partial frame is discarded (µs)
    pub sync_timeout_us: u32,
    /// Display refresh period (ms)
    pub refresh_period_ms: u32,
    /// Ambient sensor polling period (ms)
    pub sensor_period_ms: u32,
    /// Data line passes through an inverting level shifter
    pub invert_data: bool,
}

impl Default for ReadoutConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ReadoutConfig {
    /// Default configuration, usable in `const` context
    pub const DEFAULT: Self = Self {
        view: ViewMode::Measurement,
        sign_placement: SignPlacement::Edge,
        sync_timeout_us: DEFAULT_SYNC_TIMEOUT_US,
        refresh_period_ms: DEFAULT_REFRESH_PERIOD_MS,
        sensor_period_ms: DEFAULT_SENSOR_PERIOD_MS,
        invert_data: false,
    };

    /// Check that every period is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync_timeout_us == 0 || self.refresh_period_ms == 0 || self.sensor_period_ms == 0
        {
            return Err(ConfigError::Invalid);
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A value is out of its usable range
    Invalid,
    /// Encoding failed
    Serialize,
    /// Stored bytes could not be decoded
    Deserialize,
    /// Stored config was written by an incompatible version
    VersionMismatch,
    /// Output buffer too small for the encoded config
    BufferTooSmall,
}
