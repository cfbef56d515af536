//! Bounds-checked little-endian reads over an untrusted byte buffer.
//!
//! Every multi-byte access in the parser goes through these functions, so a
//! truncated or hostile file can never cause a read past the end of the
//! buffer. Offset arithmetic is overflow-checked.

/// Read a little-endian `u16` at `pos`.
///
/// Returns `None` if the two bytes are not fully inside `data`.
#[inline]
pub fn read_u16(data: &[u8], pos: usize) -> Option<u16> {
    let end = pos.checked_add(2)?;
    let bytes = data.get(pos..end)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian `u32` at `pos`.
///
/// Returns `None` if the four bytes are not fully inside `data`.
#[inline]
pub fn read_u32(data: &[u8], pos: usize) -> Option<u32> {
    let end = pos.checked_add(4)?;
    let bytes = data.get(pos..end)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
