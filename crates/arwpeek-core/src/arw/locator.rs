//! Preview location within an ARW container.
//!
//! Sony ARW files embed a full JPEG preview image and record where it lives
//! with a pair of directory tags: JpegInterchangeFormat (the byte offset of
//! the JPEG stream) and JpegInterchangeFormatLength (its byte count). This
//! module walks the first directory and reports that pair.
//!
//! # Architecture
//!
//! The walk is a single forward pass. Inline entries feed the two preview
//! tags; RATIONAL entries are validated for offset alignment and otherwise
//! skipped. The length tag terminates the walk on the spot, so at most one
//! directory is ever visited and entries after the length tag are never
//! decoded.

use super::directory::Directory;
use super::error::ParseError;
use super::header::first_ifd_offset;

/// JpegInterchangeFormat: byte offset of the embedded JPEG stream.
pub const TAG_JPEG_OFFSET: u16 = 0x0201;
/// JpegInterchangeFormatLength: byte count of the embedded JPEG stream.
pub const TAG_JPEG_LENGTH: u16 = 0x0202;

/// Byte range of the embedded preview JPEG, as declared by the directory.
///
/// The pair is reported exactly as the container declares it and may lie
/// outside the file; `slice` is the checked way to turn it into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLocation {
    /// Offset of the first JPEG byte from the start of the file.
    pub offset: u32,
    /// Length of the JPEG stream in bytes.
    pub length: u32,
}

impl PreviewLocation {
    /// Borrow the preview bytes out of `data` if the declared range fits.
    ///
    /// Returns `None` when the length is zero or the range leaves the
    /// buffer.
    #[inline]
    pub fn slice<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        let (offset, length) = (self.offset as usize, self.length as usize);
        if length == 0 || offset.checked_add(length)? > data.len() {
            return None;
        }
        Some(&data[offset..offset + length])
    }
}

/// Locate the embedded preview JPEG in an ARW container.
///
/// Validates the header, then walks the first directory looking for the
/// JPEG interchange tags. The walk stops at the first length tag: the
/// result is whatever offset tag came before it, or an offset of 0 when the
/// directory lists the length tag first. That order dependence matches the
/// files Sony cameras write (offset tag first) and is kept deliberately.
///
/// # Arguments
///
/// * `data` - Complete ARW file bytes
///
/// # Returns
///
/// The declared byte range of the preview. The range is not checked
/// against the buffer here; use [`PreviewLocation::slice`] for that.
///
/// # Errors
///
/// - `ParseError::TooSmallData` - input shorter than the header, or the
///   directory runs past the end of the buffer
/// - `ParseError::MissingHeader` - not a little-endian TIFF container
/// - `ParseError::InvalidIfdOffset` - header directory offset is zero or odd
/// - `ParseError::InvalidValueOffset` - any RATIONAL entry with an odd
///   out-of-line offset, whatever its tag
/// - `ParseError::NoPreviewImage` - directory exhausted without a length tag
///
/// # Example
///
/// ```ignore
/// use arwpeek_core::arw::locate_preview;
///
/// let arw_bytes = std::fs::read("photo.ARW")?;
/// let location = locate_preview(&arw_bytes)?;
/// let jpeg = location.slice(&arw_bytes).expect("range inside the file");
/// ```
pub fn locate_preview(data: &[u8]) -> Result<PreviewLocation, ParseError> {
    let dir_offset = first_ifd_offset(data)?;

    let mut start: u32 = 0;
    for entry in Directory::open(data, dir_offset)? {
        let entry = entry?;
        if entry.is_inline() {
            match entry.tag {
                TAG_JPEG_OFFSET => start = entry.value_or_offset,
                TAG_JPEG_LENGTH => {
                    return Ok(PreviewLocation {
                        offset: start,
                        length: entry.value_or_offset,
                    });
                }
                _ => {}
            }
        } else if entry.value_or_offset % 2 != 0 {
            return Err(ParseError::InvalidValueOffset(entry.value_or_offset));
        }
    }

    Err(ParseError::NoPreviewImage)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::arw::header::SIGNATURE;
    use proptest::prelude::*;

    /// Strategy for arbitrary input buffers, biased small.
    fn arbitrary_bytes() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(any::<u8>(), 0..256)
    }

    proptest! {
        /// Property: the locator is total; hostile input classifies, never
        /// panics.
        #[test]
        fn prop_never_panics(bytes in arbitrary_bytes()) {
            let _ = locate_preview(&bytes);
        }

        /// Property: anything under eight bytes is TooSmallData.
        #[test]
        fn prop_short_input_is_too_small(bytes in prop::collection::vec(any::<u8>(), 0..8)) {
            prop_assert_eq!(locate_preview(&bytes), Err(ParseError::TooSmallData));
        }

        /// Property: a wrong signature wins over everything after it.
        #[test]
        fn prop_bad_signature_is_missing_header(bytes in prop::collection::vec(any::<u8>(), 8..64)) {
            prop_assume!(bytes[..4] != SIGNATURE);
            prop_assert_eq!(locate_preview(&bytes), Err(ParseError::MissingHeader));
        }

        /// Property: a well-formed directory reports the declared pair
        /// verbatim, unchecked against the buffer.
        #[test]
        fn prop_declared_pair_round_trips(offset in any::<u32>(), length in any::<u32>()) {
            let mut data = vec![0x49, 0x49, 0x2A, 0x00];
            data.extend_from_slice(&8u32.to_le_bytes());
            data.extend_from_slice(&2u16.to_le_bytes());
            for (tag, value) in [(TAG_JPEG_OFFSET, offset), (TAG_JPEG_LENGTH, length)] {
                data.extend_from_slice(&tag.to_le_bytes());
                data.extend_from_slice(&4u16.to_le_bytes());
                data.extend_from_slice(&1u32.to_le_bytes());
                data.extend_from_slice(&value.to_le_bytes());
            }

            let location = locate_preview(&data);
            prop_assert_eq!(location, Ok(PreviewLocation { offset, length }));
        }

        /// Property: the same buffer always classifies the same way.
        #[test]
        fn prop_idempotent(bytes in arbitrary_bytes()) {
            prop_assert_eq!(locate_preview(&bytes), locate_preview(&bytes));
        }

        /// Property: slice never hands out bytes past the buffer.
        #[test]
        fn prop_slice_stays_in_bounds(
            offset in any::<u32>(),
            length in any::<u32>(),
            data in prop::collection::vec(any::<u8>(), 0..128),
        ) {
            let location = PreviewLocation { offset, length };
            if let Some(bytes) = location.slice(&data) {
                prop_assert_eq!(bytes.len(), length as usize);
                prop_assert!(offset as usize + length as usize <= data.len());
            }
        }
    }
}
