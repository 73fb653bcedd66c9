use thiserror::Error;

/// Custom error types for the cobstream library.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O errors from std::io operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An overhead byte declares more section bytes than remain before the frame terminator.
    #[error("Truncated section at offset {offset}: declared {declared} bytes, {available} available")]
    TruncatedSection {
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// A terminator byte was found inside the body of a frame.
    #[error("Unexpected terminator at offset {offset}")]
    UnexpectedTerminator { offset: usize },

    /// The input does not end with a terminator byte.
    #[error("Missing frame terminator at offset {offset}")]
    MissingTerminator { offset: usize },

    /// An overhead byte is larger than the configured maximum section length.
    #[error("Invalid overhead byte {value:#04x} at offset {offset} (max {max})")]
    InvalidOverhead { offset: usize, value: u8, max: u8 },

    /// A codec configuration was rejected at construction time.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A payload exceeded the limit of a bounded encoder.
    #[error("Payload length {len} exceeds configured limit {limit}")]
    PayloadTooLarge { len: usize, limit: usize },

    /// An encoded frame exceeded the limit of a bounded decoder.
    #[error("Frame length {len} exceeds configured limit {limit}")]
    FrameTooLarge { len: usize, limit: usize },
}

impl Error {
    /// Create a new `InvalidConfig` error with a descriptive message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new `TruncatedSection` error.
    pub fn truncated_section(offset: usize, declared: usize, available: usize) -> Self {
        Self::TruncatedSection {
            offset,
            declared,
            available,
        }
    }

    /// Byte offset at which a malformed frame was detected, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::TruncatedSection { offset, .. }
            | Self::UnexpectedTerminator { offset }
            | Self::MissingTerminator { offset }
            | Self::InvalidOverhead { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Returns true for errors describing a malformed encoded frame.
    ///
    /// Callers typically discard the frame and resynchronise on the next terminator.
    pub fn is_malformed_frame(&self) -> bool {
        matches!(
            self,
            Self::TruncatedSection { .. }
                | Self::UnexpectedTerminator { .. }
                | Self::MissingTerminator { .. }
                | Self::InvalidOverhead { .. }
        )
    }
}

/// Result type alias for the library operations.
pub type Result<T> = std::result::Result<T, Error>;
