//! ARW container header validation.

use super::error::ParseError;
use super::reader::read_u32;

/// Little-endian TIFF signature: "II" byte order plus magic 42.
pub const SIGNATURE: [u8; 4] = [0x49, 0x49, 0x2A, 0x00];

/// Size of the container header in bytes (signature plus directory offset).
pub const HEADER_LEN: usize = 8;

/// Validate the container header and return the first-directory offset.
///
/// The header is eight bytes: the little-endian TIFF signature followed by
/// a `u32` offset to the first directory. The offset must be nonzero and
/// even (TIFF word alignment). It is not range-checked here; an offset past
/// the end of the buffer surfaces as `TooSmallData` when the directory is
/// opened.
///
/// # Errors
///
/// - `ParseError::TooSmallData` - fewer than eight bytes of input
/// - `ParseError::MissingHeader` - signature mismatch (big-endian `MM`
///   containers land here too, they are not supported)
/// - `ParseError::InvalidIfdOffset` - directory offset is zero or odd
pub fn first_ifd_offset(data: &[u8]) -> Result<u32, ParseError> {
    if data.len() < HEADER_LEN {
        return Err(ParseError::TooSmallData);
    }
    if data[..4] != SIGNATURE {
        return Err(ParseError::MissingHeader);
    }
    let offset = read_u32(data, 4).ok_or(ParseError::TooSmallData)?;
    if offset == 0 || offset % 2 != 0 {
        return Err(ParseError::InvalidIfdOffset(offset));
    }
    Ok(offset)
}

/// Quick sniff for ARW input: checks only the little-endian TIFF signature.
///
/// This does not validate the directory offset; use `first_ifd_offset` for
/// a full header check.
pub fn is_arw(bytes: &[u8]) -> bool {
    bytes.len() >= SIGNATURE.len() && bytes[..SIGNATURE.len()] == SIGNATURE
}
