//! Encoding and decoding strategies, plus composable adapters.

use crate::codec::Cobs;
use crate::config::TERMINATOR;
use crate::error::{Error, Result};

//--- Strategy Traits ---

/// A trait that defines how a raw payload is turned into an encoded frame.
///
/// Purpose: Let `FrameWriter` and callers compose limits and observers around the codec
/// without knowing its configuration.
pub trait FrameEncoder {
    /// Appends the encoded frame for `payload` to `out`.
    fn encode_frame(&self, payload: &[u8], out: &mut Vec<u8>) -> Result<()>;
}

/// A trait that defines how one encoded frame is turned back into its payload.
pub trait FrameDecoder {
    /// Appends the payload decoded from `frame` to `out`. `frame` includes its terminator.
    ///
    /// On error `out` must be left as it was.
    fn decode_frame(&self, frame: &[u8], out: &mut Vec<u8>) -> Result<()>;

    /// The byte that closes each frame. `FrameReader` splits its input on it.
    fn terminator(&self) -> u8 {
        TERMINATOR
    }
}

impl FrameEncoder for Cobs {
    fn encode_frame(&self, payload: &[u8], out: &mut Vec<u8>) -> Result<()> {
        self.encode_into(payload, out);
        Ok(())
    }
}

impl FrameDecoder for Cobs {
    fn decode_frame(&self, frame: &[u8], out: &mut Vec<u8>) -> Result<()> {
        self.decode_into(frame, out)
    }

    fn terminator(&self) -> u8 {
        self.config().terminator
    }
}

//--- Bounded Adapters ---

/// A composable adapter that enforces a maximum payload length for any encoder.
///
/// Failure semantics: Returns `Error::PayloadTooLarge` before anything is written to `out`.
pub struct BoundedEncoder<E: FrameEncoder> {
    inner: E,
    max_len: usize,
}

impl<E: FrameEncoder> BoundedEncoder<E> {
    pub fn new(inner: E, max_len: usize) -> Self {
        Self { inner, max_len }
    }
}

impl<E: FrameEncoder> FrameEncoder for BoundedEncoder<E> {
    fn encode_frame(&self, payload: &[u8], out: &mut Vec<u8>) -> Result<()> {
        if payload.len() > self.max_len {
            return Err(Error::PayloadTooLarge {
                len: payload.len(),
                limit: self.max_len,
            });
        }
        self.inner.encode_frame(payload, out)
    }
}

/// A composable adapter that rejects oversized encoded frames before decoding them.
///
/// Failure semantics: Returns `Error::FrameTooLarge`; the frame is not inspected.
pub struct BoundedDecoder<D: FrameDecoder> {
    inner: D,
    max: usize,
}

impl<D: FrameDecoder> BoundedDecoder<D> {
    pub fn new(inner: D, max: usize) -> Self {
        Self { inner, max }
    }
}

impl<D: FrameDecoder> FrameDecoder for BoundedDecoder<D> {
    fn decode_frame(&self, frame: &[u8], out: &mut Vec<u8>) -> Result<()> {
        if frame.len() > self.max {
            return Err(Error::FrameTooLarge {
                len: frame.len(),
                limit: self.max,
            });
        }
        self.inner.decode_frame(frame, out)
    }

    fn terminator(&self) -> u8 {
        self.inner.terminator()
    }
}

//--- Observer Adapters ---

/// An adapter that allows observing payloads on the encode path without copying or mutating.
///
/// Callback timing: Invoked exactly once per payload, before delegating to the inner encoder.
pub struct ObserverEncoder<E: FrameEncoder, C: Fn(&[u8])> {
    inner: E,
    callback: C,
}

impl<E: FrameEncoder, C: Fn(&[u8])> ObserverEncoder<E, C> {
    pub fn new(inner: E, callback: C) -> Self {
        Self { inner, callback }
    }
}

impl<E: FrameEncoder, C: Fn(&[u8])> FrameEncoder for ObserverEncoder<E, C> {
    fn encode_frame(&self, payload: &[u8], out: &mut Vec<u8>) -> Result<()> {
        (self.callback)(payload);
        self.inner.encode_frame(payload, out)
    }
}

/// An adapter that allows observing decoded payloads without copying or mutating.
///
/// Callback timing: Invoked exactly once per frame, after inner decoding succeeds.
pub struct ObserverDecoder<D: FrameDecoder, C: Fn(&[u8])> {
    inner: D,
    callback: C,
}

impl<D: FrameDecoder, C: Fn(&[u8])> ObserverDecoder<D, C> {
    pub fn new(inner: D, callback: C) -> Self {
        Self { inner, callback }
    }
}

impl<D: FrameDecoder, C: Fn(&[u8])> FrameDecoder for ObserverDecoder<D, C> {
    fn decode_frame(&self, frame: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let start = out.len();
        self.inner.decode_frame(frame, out)?;
        (self.callback)(&out[start..]);
        Ok(())
    }

    fn terminator(&self) -> u8 {
        self.inner.terminator()
    }
}

//--- Fluent Extension Traits ---

/// Extension methods for encoders to enable fluent composition without importing adapter types.
pub trait FrameEncoderExt: FrameEncoder + Sized {
    /// Enforce a maximum payload length.
    fn bounded_payload(self, max: usize) -> BoundedEncoder<Self> {
        BoundedEncoder::new(self, max)
    }

    /// Observe payloads on the encode path without copying. Useful for metrics/logging.
    fn observe_payloads<C: Fn(&[u8])>(self, callback: C) -> ObserverEncoder<Self, C> {
        ObserverEncoder::new(self, callback)
    }
}

impl<T: FrameEncoder> FrameEncoderExt for T {}

/// Extension methods for decoders to enable fluent composition without importing adapter types.
pub trait FrameDecoderExt: FrameDecoder + Sized {
    /// Enforce a maximum encoded frame length.
    fn bounded_frame(self, max: usize) -> BoundedDecoder<Self> {
        BoundedDecoder::new(self, max)
    }

    /// Observe decoded payloads without copying. Useful for metrics/logging.
    fn observe_decoded<C: Fn(&[u8])>(self, callback: C) -> ObserverDecoder<Self, C> {
        ObserverDecoder::new(self, callback)
    }
}

impl<T: FrameDecoder> FrameDecoderExt for T {}
