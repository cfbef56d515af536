//! Arwpeek Core - Sony ARW preview extraction library
//!
//! This crate provides the core functionality for arwpeek: parsing the
//! TIFF-derived ARW container, locating the embedded JPEG preview, decoding
//! it with orientation correction, and loading previews off the caller's
//! thread.

pub mod arw;
pub mod decode;
pub mod loader;

pub use arw::{is_arw, locate_preview, ParseError, PreviewLocation};
pub use decode::{decode_jpeg, DecodeError, DecodedImage, Orientation};
pub use loader::{extract_and_decode, load_preview, LoadedPreview, PreviewError, PreviewTask};
