//! Splits a payload into zero-free sections.
//!
//! Sections borrow from the payload; segmentation never allocates and never
//! looks at encoded output.

use std::iter::FusedIterator;

/// Why a section was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// A zero byte followed the section in the payload. The zero itself is not part of the section.
    Terminator,
    /// The section reached the maximum data length. No zero is implied.
    Full,
    /// The section runs to the end of the payload.
    End,
}

/// A zero-free run of payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    data: &'a [u8],
    boundary: Boundary,
}

impl<'a> Section<'a> {
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The overhead byte that precedes this section on the wire (before terminator masking).
    pub fn overhead(&self) -> u8 {
        // Section lengths never exceed 254, see `Sections::new`.
        (self.data.len() + 1) as u8
    }
}

/// Iterator over the sections of a payload.
///
/// Created with [`Cobs::sections`](crate::Cobs::sections).
///
/// Rules:
/// - an empty payload has no sections;
/// - every zero byte closes the current section, even when it is empty;
/// - a section holding `max_data_len` bytes is closed as [`Boundary::Full`];
/// - the payload tail becomes a final [`Boundary::End`] section, unless the
///   payload ended exactly on a full section.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    payload: &'a [u8],
    pos: usize,
    max_data_len: usize,
    done: bool,
}

impl<'a> Sections<'a> {
    pub(crate) fn new(payload: &'a [u8], max_data_len: usize) -> Self {
        debug_assert!((1..=254).contains(&max_data_len));
        Self {
            payload,
            pos: 0,
            max_data_len,
            done: payload.is_empty(),
        }
    }
}

impl<'a> Iterator for Sections<'a> {
    type Item = Section<'a>;

    fn next(&mut self) -> Option<Section<'a>> {
        if self.done {
            return None;
        }

        let rest = &self.payload[self.pos..];
        let window = &rest[..rest.len().min(self.max_data_len)];

        if let Some(zero) = window.iter().position(|&b| b == 0) {
            self.pos += zero + 1;
            return Some(Section {
                data: &window[..zero],
                boundary: Boundary::Terminator,
            });
        }

        if window.len() == self.max_data_len {
            self.pos += window.len();
            // A payload ending on a full section needs no trailing empty one.
            self.done = self.pos == self.payload.len();
            return Some(Section {
                data: window,
                boundary: Boundary::Full,
            });
        }

        self.done = true;
        Some(Section {
            data: window,
            boundary: Boundary::End,
        })
    }
}

impl FusedIterator for Sections<'_> {}
