//! Packed string column with the engine's offset and padding contract.
//!
//! Rows live back to back in one byte buffer, each followed by a single
//! terminator byte; `offsets[i]` is one past the end of row `i` including
//! that terminator, so row `i` spans
//! `chars[offsets[i-1] .. offsets[i] - 1]`. The buffer always carries
//! [`PAD`] readable bytes past the last offset, which is what lets the
//! readers refill in fixed-size gulps without length checks.

use crate::error::{GramError, Result};
use crate::gram::PAD;

/// A packed byte buffer plus one-past-end row offsets.
///
/// Construction owns the padding guarantee, so every scoring path over a
/// `StringColumn` is in-bounds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringColumn {
    chars: Vec<u8>,
    offsets: Vec<u64>,
}

impl StringColumn {
    /// Build a column from row payloads, appending the terminator byte per
    /// row and the trailing padding.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut chars = Vec::new();
        let mut offsets = Vec::new();
        for row in rows {
            chars.extend_from_slice(row);
            chars.push(0);
            offsets.push(chars.len() as u64);
        }
        let logical = chars.len();
        chars.resize(logical + PAD, 0);
        Self { chars, offsets }
    }

    /// Adopt an engine-produced buffer, validating the offset contract and
    /// appending the padding.
    ///
    /// `chars` holds the packed rows including one terminator byte per
    /// row. Offsets must be strictly increasing (each row occupies at
    /// least its terminator) and must not point past the buffer.
    pub fn from_parts(mut chars: Vec<u8>, offsets: Vec<u64>) -> Result<Self> {
        let mut prev = 0u64;
        for (index, &offset) in offsets.iter().enumerate() {
            if offset <= prev {
                return Err(GramError::InvalidOffsets {
                    index,
                    offset,
                    prev,
                });
            }
            prev = offset;
        }
        if prev as usize > chars.len() {
            return Err(GramError::OffsetsPastBuffer {
                last: prev,
                len: chars.len(),
            });
        }
        let logical = chars.len();
        chars.resize(logical + PAD, 0);
        Ok(Self { chars, offsets })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Byte length of row `i`, excluding the terminator.
    pub fn row_len(&self, i: usize) -> usize {
        let prev = if i == 0 { 0 } else { self.offsets[i - 1] };
        (self.offsets[i] - prev - 1) as usize
    }

    /// Payload bytes of row `i`.
    pub fn row(&self, i: usize) -> &[u8] {
        let prev = if i == 0 { 0 } else { self.offsets[i - 1] as usize };
        &self.chars[prev..prev + self.row_len(i)]
    }

    /// The padded character buffer.
    pub(crate) fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// One-past-end offsets, terminator included.
    pub(crate) fn offsets(&self) -> &[u64] {
        &self.offsets
    }
}
