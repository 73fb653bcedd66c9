//! Codec configuration.
//!
//! Both ends of a link must agree on the configuration; nothing here is carried
//! on the wire.

use crate::error::{Error, Result};

/// The reserved frame terminator of standard COBS.
pub const TERMINATOR: u8 = 0x00;

/// Largest overhead-byte value of standard COBS (254 data bytes per section).
pub const DEFAULT_MAX_SECTION_LENGTH: u8 = 0xFF;

/// Smallest usable maximum; anything lower could never carry a data byte.
pub const MIN_MAX_SECTION_LENGTH: u8 = 2;

/// Construction-time settings for a [`Cobs`](crate::Cobs) codec.
///
/// `max_section_length` is the largest overhead-byte value a frame may contain.
/// Each section therefore carries at most `max_section_length - 1` data bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CobsConfig {
    pub max_section_length: u8,
    pub terminator: u8,
}

impl CobsConfig {
    /// Standard COBS: terminator `0x00`, overhead bytes `1..=255`.
    pub const fn new() -> Self {
        Self {
            max_section_length: DEFAULT_MAX_SECTION_LENGTH,
            terminator: TERMINATOR,
        }
    }

    pub const fn with_max_section_length(mut self, max_section_length: u8) -> Self {
        self.max_section_length = max_section_length;
        self
    }

    /// Reserve a different byte as the frame terminator.
    pub const fn with_terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    /// Checks the configuration, returning `Error::InvalidConfig` when unusable.
    pub fn validate(&self) -> Result<()> {
        if self.max_section_length < MIN_MAX_SECTION_LENGTH {
            return Err(Error::invalid_config(format!(
                "max_section_length must be at least {MIN_MAX_SECTION_LENGTH}, got {}",
                self.max_section_length
            )));
        }
        Ok(())
    }

    /// Largest number of data bytes a single section can hold.
    pub const fn max_data_len(&self) -> usize {
        (self.max_section_length as usize).saturating_sub(1)
    }
}

impl Default for CobsConfig {
    fn default() -> Self {
        Self::new()
    }
}
