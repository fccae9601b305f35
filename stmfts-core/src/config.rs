//! Touch controller configuration
//!
//! Configuration can be persisted as postcard binary data when the
//! `serde` feature is enabled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default 7-bit I2C address of the FTS controller
pub const DEFAULT_I2C_ADDRESS: u8 = 0x49;

/// Normal, palm and wet contacts enabled
pub const DEFAULT_TOUCH_TYPE_MASK: u16 = 0x0061;

/// Active contacts above which a multi-touch burst is counted
pub const DEFAULT_MULTI_TOUCH_THRESHOLD: u16 = 4;

/// Touch controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// 7-bit I2C address
    pub i2c_address: u8,
    /// Touch types the controller should report (bit n = type n)
    pub touch_type_mask: u16,
    /// A burst starts when more than this many contacts are active
    pub multi_touch_threshold: u16,
    /// Settling time after supplies come up (ms)
    pub power_on_delay_ms: u32,
    /// Settling time after a system reset command (ms)
    pub reset_delay_ms: u32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_I2C_ADDRESS,
            touch_type_mask: DEFAULT_TOUCH_TYPE_MASK,
            multi_touch_threshold: DEFAULT_MULTI_TOUCH_THRESHOLD,
            power_on_delay_ms: 20,
            reset_delay_ms: 20,
        }
    }
}

/// Errors from encoding or decoding a stored configuration
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Buffer too small or value not representable
    Serialize,
    /// Stored bytes are not a valid configuration
    Deserialize,
}

#[cfg(feature = "serde")]
impl TouchConfig {
    /// Maximum encoded size in bytes
    pub const MAX_ENCODED_SIZE: usize = 24;

    /// Encode into `buf`, returning the used prefix
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Decode a configuration previously written by [`TouchConfig::encode`]
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
    }
}
