//! Embedded preview decoding.
//!
//! This module turns the JPEG bytes located by [`crate::arw`] into RGB
//! pixel data:
//! - Decoding the JPEG stream via the `image` crate
//! - Reading the preview's own EXIF orientation tag and applying it, so
//!   portrait shots come out right-side-up
//!
//! Decoding is synchronous and allocation happens once, for the pixel
//! buffer. The container parser never calls into this module; callers wire
//! the two together (see [`crate::loader`]).

mod jpeg;
mod types;

pub use jpeg::{decode_jpeg, get_orientation, is_jpeg_data};
pub use types::{DecodeError, DecodedImage, Orientation};

#[cfg(test)]
pub(crate) use jpeg::MINIMAL_JPEG;
