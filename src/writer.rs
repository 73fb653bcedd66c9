//! A generic, composable frame writer.

use crate::error::Result;
use crate::framing::FrameEncoder;
use std::io::Write;

/// A writer that encodes payloads and writes the resulting frames to a sink.
///
/// This writer is generic over a `FrameEncoder` strategy, so limits and
/// observers compose with the codec before any byte reaches the sink. Frames
/// are assembled in an internal buffer that is reused between writes and then
/// written with a single `write_all`.
pub struct FrameWriter<W: Write, E: FrameEncoder> {
    writer: W,
    encoder: E,
    buffer: Vec<u8>,
    frames_written: u64,
}

impl<W: Write, E: FrameEncoder> FrameWriter<W, E> {
    /// Creates a new `FrameWriter`.
    pub fn new(writer: W, encoder: E) -> Self {
        Self {
            writer,
            encoder,
            buffer: Vec::new(),
            frames_written: 0,
        }
    }

    /// Encodes `payload` and writes the complete frame.
    pub fn write_frame(&mut self, payload: &[u8]) -> Result<()> {
        self.buffer.clear();
        self.encoder.encode_frame(payload, &mut self.buffer)?;
        self.writer.write_all(&self.buffer)?;
        self.frames_written += 1;
        tracing::trace!(
            payload_len = payload.len(),
            frame_len = self.buffer.len(),
            "wrote COBS frame"
        );
        Ok(())
    }

    /// Writes every payload as its own frame, stopping at the first error.
    pub fn write_all_frames<I, P>(&mut self, payloads: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        for payload in payloads {
            self.write_frame(payload.as_ref())?;
        }
        Ok(())
    }

    /// Number of frames successfully written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the writer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
