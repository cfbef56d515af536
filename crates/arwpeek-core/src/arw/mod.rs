//! Sony ARW container parsing.
//!
//! This module provides functionality for:
//! - Validating the little-endian TIFF header of an ARW file
//! - Walking the first image file directory (IFD)
//! - Locating the byte range of the embedded JPEG preview
//!
//! # Architecture
//!
//! The parser is a set of pure functions over a borrowed `&[u8]`. It holds
//! no state between calls and performs no I/O; the input buffer is never
//! mutated. Every multi-byte read is bounds-checked, so arbitrary bytes
//! classify into a [`ParseError`] instead of panicking or reading out of
//! bounds.
//!
//! # Container layout
//!
//! ```text
//! offset 0    signature 49 49 2A 00   ("II", magic 42)
//! offset 4    u32 first-directory offset   (nonzero, even)
//! dir + 0     u16 entry count
//! dir + 2     entries, 12 bytes each:
//!             tag u16 | type u16 | count u32 (unused) | value/offset u32
//! ```

mod directory;
mod error;
mod header;
mod locator;
mod reader;

pub use directory::{Directory, DirectoryEntry, ENTRY_LEN, TYPE_RATIONAL};
pub use error::ParseError;
pub use header::{first_ifd_offset, is_arw, HEADER_LEN, SIGNATURE};
pub use locator::{locate_preview, PreviewLocation, TAG_JPEG_LENGTH, TAG_JPEG_OFFSET};
pub use reader::{read_u16, read_u32};
