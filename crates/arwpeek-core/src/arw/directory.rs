//! Directory traversal: a lazy walk over fixed-size entries.

use super::error::ParseError;
use super::reader::{read_u16, read_u32};

/// Size of one directory entry in bytes.
pub const ENTRY_LEN: usize = 12;

/// Type code for RATIONAL. The only type whose value field this parser
/// treats as an out-of-line offset.
pub const TYPE_RATIONAL: u16 = 5;

/// One decoded directory entry.
///
/// Only three of the entry's four fields are decoded. The element count at
/// bytes 4..8 is never interpreted; it contributes to the 12-byte stride
/// and nothing else, since locating the preview does not need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Tag identifier.
    pub tag: u16,
    /// Field type code.
    pub type_code: u16,
    /// Inline value, or out-of-line offset for RATIONAL entries.
    pub value_or_offset: u32,
}

impl DirectoryEntry {
    /// Whether `value_or_offset` holds the value itself rather than an
    /// out-of-line offset.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.type_code != TYPE_RATIONAL
    }
}

/// Decode the 12-byte entry at `pos`, or `None` if any field leaves the
/// buffer.
fn read_entry(data: &[u8], pos: usize) -> Option<DirectoryEntry> {
    let tag = read_u16(data, pos)?;
    let type_code = read_u16(data, pos.checked_add(2)?)?;
    let value_or_offset = read_u32(data, pos.checked_add(8)?)?;
    Some(DirectoryEntry {
        tag,
        type_code,
        value_or_offset,
    })
}

/// Lazy, one-shot iteration over the entries of a single directory.
///
/// Entries decode on demand; nothing is collected up front. The declared
/// entry count bounds the walk, but it is not trusted to fit the buffer:
/// the first read that would leave the buffer yields one
/// `Err(ParseError::TooSmallData)` and the iterator fuses.
#[derive(Debug)]
pub struct Directory<'a> {
    data: &'a [u8],
    /// Offset of the next entry to decode.
    pos: usize,
    remaining: u16,
    failed: bool,
}

impl<'a> Directory<'a> {
    /// Open the directory at `dir_offset` by reading its entry count.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::TooSmallData` if the two count bytes are not
    /// inside the buffer. A header-declared offset pointing past the end of
    /// the file surfaces here.
    pub fn open(data: &'a [u8], dir_offset: u32) -> Result<Self, ParseError> {
        let offset = dir_offset as usize;
        let count = read_u16(data, offset).ok_or(ParseError::TooSmallData)?;
        Ok(Self {
            data,
            pos: offset + 2,
            remaining: count,
            failed: false,
        })
    }

    /// Entries the directory claims to hold, minus those already yielded.
    pub fn remaining(&self) -> u16 {
        self.remaining
    }
}

impl Iterator for Directory<'_> {
    type Item = Result<DirectoryEntry, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }
        match read_entry(self.data, self.pos) {
            Some(entry) => {
                self.remaining -= 1;
                // A successful value read proves pos + ENTRY_LEN is in range.
                self.pos += ENTRY_LEN;
                Some(Ok(entry))
            }
            None => {
                self.failed = true;
                Some(Err(ParseError::TooSmallData))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let upper = self.remaining as usize;
        (upper.min(1), Some(upper))
    }
}
