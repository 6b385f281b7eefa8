//! Binary config encoding
//!
//! Layout: one version byte followed by the postcard encoding of
//! [`ReadoutConfig`]. Postcard is not self-describing, so any change to
//! the struct must bump [`CONFIG_VERSION`].

use super::types::{ConfigError, ReadoutConfig};

/// Current encoding version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound on the encoded size
pub const MAX_CONFIG_SIZE: usize = 32;

impl ReadoutConfig {
    /// Encode into `buf`, returning the number of bytes written
    pub fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ConfigError> {
        let (version, body) = buf.split_first_mut().ok_or(ConfigError::BufferTooSmall)?;
        *version = CONFIG_VERSION;

        let used = postcard::to_slice(self, body).map_err(|e| match e {
            postcard::Error::SerializeBufferFull => ConfigError::BufferTooSmall,
            _ => ConfigError::Serialize,
        })?;

        Ok(1 + used.len())
    }

    /// Decode and validate a stored config
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let (&version, body) = bytes.split_first().ok_or(ConfigError::Deserialize)?;
        if version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }

        let config: Self = postcard::from_bytes(body).map_err(|_| ConfigError::Deserialize)?;
        config.validate()?;
        Ok(config)
    }
}
