//! Error classification for ARW container parsing.

use thiserror::Error;

/// Errors produced while parsing an ARW container.
///
/// Every malformed input maps to exactly one kind, checked in declaration
/// order. All kinds are terminal: the input buffer never changes during a
/// parse, so retrying the same bytes reports the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The buffer is shorter than the 8-byte header, or a read during
    /// directory traversal would run past the end of the buffer.
    #[error("Data too small: a required read runs past the end of the buffer")]
    TooSmallData,

    /// The first four bytes are not the little-endian TIFF signature.
    #[error("Missing header: not a little-endian TIFF container")]
    MissingHeader,

    /// The first-directory offset in the header is zero or odd.
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u32),

    /// A RATIONAL-typed entry carries an odd out-of-line value offset.
    #[error("Invalid value offset: {0}")]
    InvalidValueOffset(u32),

    /// The first directory was exhausted without a preview length tag.
    #[error("No preview image found")]
    NoPreviewImage,
}
