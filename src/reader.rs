//! A generic, composable reader for buffers of concatenated frames.

use crate::error::{Error, Result};
use crate::framing::FrameDecoder;

/// A reader that splits an in-memory buffer of back-to-back COBS frames.
///
/// Each frame runs up to and including the next terminator byte. Because the
/// terminator never appears inside a well-formed frame, a corrupt frame only
/// costs that one frame: the reader has already moved past its terminator when
/// the error is returned, so the next call starts on the following frame.
///
/// It provides two APIs:
///
/// 1. **Processor API** (`process_all()`): closure-based processing that stops at the first error
/// 2. **Expert API** (`frames()`): manual iteration, free to continue after a bad frame
///
/// ```rust
/// # use cobstream::{Cobs, FrameReader};
/// let mut data = Vec::new();
/// Cobs::default().encode_into(b"first", &mut data);
/// data.extend_from_slice(&[0x09, 0x41, 0x00]); // corrupt
/// Cobs::default().encode_into(b"third", &mut data);
///
/// let mut reader = FrameReader::new(&data, Cobs::default());
/// let mut frames = reader.frames();
/// assert_eq!(frames.next().unwrap(), Some(&b"first"[..]));
/// assert!(frames.next().is_err());
/// assert_eq!(frames.next().unwrap(), Some(&b"third"[..]));
/// assert_eq!(frames.next().unwrap(), None);
/// ```
pub struct FrameReader<'a, D: FrameDecoder> {
    data: &'a [u8],
    decoder: D,
    pos: usize,
    frame_start: usize,
    // Decoded payloads are written here; the buffer is reused across frames.
    buffer: Vec<u8>,
}

impl<'a, D: FrameDecoder> FrameReader<'a, D> {
    /// Creates a new `FrameReader` over `data` with the given decoding strategy.
    pub fn new(data: &'a [u8], decoder: D) -> Self {
        Self {
            data,
            decoder,
            pos: 0,
            frame_start: 0,
            buffer: Vec::new(),
        }
    }

    /// Decodes the next frame into the internal buffer.
    ///
    /// Returns Ok(Some(payload)) on success, Ok(None) once the buffer is exhausted.
    /// Error offsets are relative to the start of the failing frame, see
    /// [`frame_start`](Self::frame_start). Trailing bytes with no terminator
    /// are reported once as `Error::MissingTerminator`.
    pub fn read_frame(&mut self) -> Result<Option<&[u8]>> {
        if self.pos >= self.data.len() {
            return Ok(None);
        }

        let data = self.data;
        let rest = &data[self.pos..];
        let terminator = self.decoder.terminator();
        let frame = match rest.iter().position(|&b| b == terminator) {
            Some(end) => &rest[..=end],
            None => rest,
        };
        self.frame_start = self.pos;
        self.pos += frame.len();

        self.buffer.clear();
        match self.decoder.decode_frame(frame, &mut self.buffer) {
            Ok(()) => Ok(Some(self.buffer.as_slice())),
            Err(e) => {
                tracing::debug!(
                    frame_start = self.frame_start,
                    frame_len = frame.len(),
                    error = %e,
                    "skipping malformed frame"
                );
                Err(e)
            }
        }
    }

    /// Processes all frames using a closure, stopping at the first error.
    ///
    /// # Arguments
    /// * `processor` - A closure that receives each decoded payload
    ///
    /// # Returns
    /// * `Ok(())` - All frames decoded and processed successfully
    /// * `Err(e)` - A frame was malformed or the closure failed
    pub fn process_all<F>(&mut self, mut processor: F) -> Result<()>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        while let Some(payload) = self.read_frame()? {
            processor(payload)?;
        }
        Ok(())
    }

    /// Processes every well-formed frame, handing malformed-frame errors to `on_error`.
    ///
    /// Errors returned by `processor` still stop processing. Returns the number
    /// of frames that were skipped.
    pub fn process_valid<F, G>(&mut self, mut processor: F, mut on_error: G) -> Result<usize>
    where
        F: FnMut(&[u8]) -> Result<()>,
        G: FnMut(Error),
    {
        let mut skipped = 0;
        loop {
            match self.read_frame() {
                Ok(Some(payload)) => processor(payload)?,
                Ok(None) => return Ok(skipped),
                Err(e) if e.is_malformed_frame() || matches!(e, Error::FrameTooLarge { .. }) => {
                    skipped += 1;
                    on_error(e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Returns an iterator-like object for manual frame processing.
    pub fn frames(&mut self) -> Frames<'_, 'a, D> {
        Frames { reader: self }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Offset at which the most recently read frame started.
    pub fn frame_start(&self) -> usize {
        self.frame_start
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        let data = self.data;
        &data[self.pos..]
    }
}

/// An iterator-like object for manual frame processing.
///
/// It borrows the `FrameReader` mutably; each payload is only valid until the next call.
pub struct Frames<'r, 'a, D: FrameDecoder> {
    reader: &'r mut FrameReader<'a, D>,
}

impl<D: FrameDecoder> Frames<'_, '_, D> {
    /// Returns the next decoded frame.
    ///
    /// # Returns
    /// * `Ok(Some(payload))` - A frame was successfully decoded
    /// * `Ok(None)` - End of buffer reached
    /// * `Err(e)` - The frame was malformed; calling `next` again resumes after it
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<&[u8]>> {
        self.reader.read_frame()
    }
}
