//! The COBS stuffing and unstuffing algorithms.

use crate::config::{CobsConfig, TERMINATOR};
use crate::error::{Error, Result};
use crate::segment::Sections;

/// A COBS encoder/decoder pair bound to one configuration.
///
/// `Cobs` is a small `Copy` value with no interior state, so independent frames
/// can be encoded and decoded from any number of threads at once.
///
/// ```rust
/// use cobstream::{Cobs, CobsConfig};
///
/// let cobs = Cobs::new(CobsConfig::new().with_max_section_length(5))?;
/// let frame = cobs.encode(&[0xFF, 0x00, 0xAA]);
/// assert_eq!(frame, [0x02, 0xFF, 0x02, 0xAA, 0x00]);
/// assert_eq!(cobs.decode(&frame)?, [0xFF, 0x00, 0xAA]);
/// # Ok::<(), cobstream::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cobs {
    config: CobsConfig,
}

impl Cobs {
    /// Creates a codec, rejecting configurations that cannot frame data.
    pub fn new(config: CobsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CobsConfig {
        &self.config
    }

    /// Splits `payload` into the sections this codec would emit.
    pub fn sections<'a>(&self, payload: &'a [u8]) -> Sections<'a> {
        Sections::new(payload, self.config.max_data_len())
    }

    /// Upper bound on the encoded size of a payload, terminator included.
    pub fn max_encoded_len(&self, payload_len: usize) -> usize {
        payload_len + payload_len.div_ceil(self.config.max_data_len()) + 1
    }

    /// Encodes `payload` into a freshly allocated frame.
    pub fn encode(&self, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.max_encoded_len(payload.len()));
        self.encode_into(payload, &mut out);
        out
    }

    /// Appends the encoded frame for `payload` to `out`.
    ///
    /// Existing contents of `out` are left untouched, so a single buffer can
    /// accumulate several frames back to back.
    pub fn encode_into(&self, payload: &[u8], out: &mut Vec<u8>) {
        let mask = self.config.terminator;
        out.reserve(self.max_encoded_len(payload.len()));

        for section in self.sections(payload) {
            out.push(section.overhead() ^ mask);
            if mask == TERMINATOR {
                out.extend_from_slice(section.data());
            } else {
                out.extend(section.data().iter().map(|b| b ^ mask));
            }
        }

        out.push(mask);
    }

    /// Decodes one terminated frame into a freshly allocated payload.
    pub fn decode(&self, frame: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decode_into(frame, &mut out)?;
        Ok(out)
    }

    /// Appends the payload decoded from `frame` to `out`.
    ///
    /// `frame` must end with the terminator and contain it nowhere else. On
    /// error `out` is restored to its previous length; no partial payload is
    /// ever left behind.
    pub fn decode_into(&self, frame: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let start_len = out.len();
        let result = self.unstuff(frame, out);
        if let Err(e) = &result {
            out.truncate(start_len);
            tracing::debug!(offset = ?e.offset(), frame_len = frame.len(), error = %e, "rejected COBS frame");
        }
        result
    }

    fn unstuff(&self, frame: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let mask = self.config.terminator;
        let max = self.config.max_section_length;

        let end = match frame.last() {
            Some(&last) if last == mask => frame.len() - 1,
            _ => {
                return Err(Error::MissingTerminator {
                    offset: frame.len(),
                })
            }
        };
        out.reserve(end);

        let mut i = 0;
        while i < end {
            let overhead = frame[i] ^ mask;
            if overhead == 0 {
                return Err(Error::UnexpectedTerminator { offset: i });
            }
            if overhead > max {
                return Err(Error::InvalidOverhead {
                    offset: i,
                    value: frame[i],
                    max,
                });
            }

            let start = i + 1;
            let declared = overhead as usize - 1;
            let available = end - start;
            if declared > available {
                return Err(Error::truncated_section(i, declared, available));
            }

            let section = &frame[start..start + declared];
            if let Some(pos) = section.iter().position(|&b| b == mask) {
                return Err(Error::UnexpectedTerminator { offset: start + pos });
            }
            if mask == TERMINATOR {
                out.extend_from_slice(section);
            } else {
                out.extend(section.iter().map(|b| b ^ mask));
            }

            i = start + declared;
            // Short sections stand for a zero, except the last one, which is closed by the frame terminator.
            if overhead < max && i < end {
                out.push(0);
            }
        }

        Ok(())
    }
}
