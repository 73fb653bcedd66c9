//! # cobstream
//!
//! Consistent Overhead Byte Stuffing (COBS) for Rust.
//!
//! ## Overview
//!
//! COBS turns an arbitrary byte payload into a frame that contains no
//! terminator byte (`0x00` by default) except a single one at the very end. The
//! cost is at most one byte for every 254 payload bytes, plus the terminator,
//! whatever the payload contains. Frames can then be concatenated and split
//! again unambiguously on the terminator.
//!
//! ## Key Features
//!
//! * **Typed Errors**: Malformed frames are reported with the byte offset of the fault
//! * **Configurable**: Maximum section length and terminator byte are bound per codec, never global
//! * **Composable Architecture**: `FrameEncoder`/`FrameDecoder` strategies with bounded and observer adapters
//! * **Buffer Reuse**: `encode_into`/`decode_into` append to caller-owned buffers
//! * **Thread Safe**: Codecs are plain `Copy` values with no shared state
//!
//! ## Quick Start
//!
//! ```rust
//! use cobstream::{decode, encode};
//!
//! let frame = encode(&[0x11, 0x00, 0x22]);
//! assert_eq!(frame, [0x02, 0x11, 0x02, 0x22, 0x00]);
//! assert_eq!(decode(&frame)?, [0x11, 0x00, 0x22]);
//! # Ok::<(), cobstream::Error>(())
//! ```
//!
//! ## Streams of Frames
//!
//! ```rust
//! use cobstream::{Cobs, FrameReader, FrameWriter};
//!
//! let mut writer = FrameWriter::new(Vec::new(), Cobs::default());
//! writer.write_frame(b"hello")?;
//! writer.write_frame(&[0, 0, 0])?;
//! let data = writer.into_inner();
//!
//! let mut reader = FrameReader::new(&data, Cobs::default());
//! reader.process_all(|payload| {
//!     println!("Frame: {} bytes", payload.len());
//!     Ok(())
//! })?;
//! # Ok::<(), cobstream::Error>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod framing;
pub mod reader;
pub mod segment;
pub mod writer;

// Re-export the main public API for user convenience.
pub use codec::Cobs;
pub use config::{CobsConfig, DEFAULT_MAX_SECTION_LENGTH, TERMINATOR};
pub use error::{Error, Result};
pub use framing::{
    BoundedDecoder, BoundedEncoder, FrameDecoder, FrameDecoderExt, FrameEncoder, FrameEncoderExt,
    ObserverDecoder, ObserverEncoder,
};
pub use reader::{FrameReader, Frames};
pub use segment::{Boundary, Section, Sections};
pub use writer::FrameWriter;

/// Encodes `payload` with standard COBS (terminator `0x00`, 254-byte sections).
pub fn encode(payload: &[u8]) -> Vec<u8> {
    Cobs::default().encode(payload)
}

/// Decodes one standard COBS frame, terminator included.
pub fn decode(frame: &[u8]) -> Result<Vec<u8>> {
    Cobs::default().decode(frame)
}
