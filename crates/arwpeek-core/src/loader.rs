//! Preview loading: file I/O, location, extraction and decode in one call.
//!
//! # Architecture
//!
//! [`load_preview`] is the synchronous pipeline: read the file, locate the
//! preview range, check the range against the actual bytes, decode.
//! [`PreviewTask`] runs the same pipeline on a background thread and hands
//! exactly one result back through a bounded channel, so a frontend can
//! keep its event loop responsive while a large file loads.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;
use tracing::debug;

use crate::arw::{locate_preview, ParseError, PreviewLocation};
use crate::decode::{decode_jpeg, get_orientation, DecodeError, DecodedImage, Orientation};

/// Errors from the full load pipeline.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The located JPEG failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The directory declared a preview range that leaves the file.
    #[error("Preview range out of bounds: {length} bytes at offset {offset}, file is {file_len}")]
    RangeOutOfBounds {
        offset: u32,
        length: u32,
        file_len: usize,
    },

    /// The background worker died before delivering a result.
    #[error("Preview worker terminated without a result")]
    WorkerLost,
}

/// A fully loaded preview: the declared location plus the raw JPEG bytes
/// and the decoded pixels.
#[derive(Debug, Clone)]
pub struct LoadedPreview {
    /// Byte range the container declared for the preview.
    pub location: PreviewLocation,
    /// The embedded JPEG stream, verbatim.
    pub jpeg: Vec<u8>,
    /// EXIF orientation declared by the preview itself.
    pub orientation: Orientation,
    /// Decoded, orientation-corrected pixels.
    pub image: DecodedImage,
}

/// Locate, extract and decode the preview from in-memory file bytes.
///
/// The declared range is checked against the buffer before any byte of it
/// is touched; a range that leaves the file reports
/// [`PreviewError::RangeOutOfBounds`] instead of handing short bytes to the
/// decoder.
pub fn extract_and_decode(bytes: &[u8]) -> Result<LoadedPreview, PreviewError> {
    let location = locate_preview(bytes)?;
    debug!(
        "Located preview: {} bytes at offset {}",
        location.length, location.offset
    );

    let jpeg = location
        .slice(bytes)
        .ok_or(PreviewError::RangeOutOfBounds {
            offset: location.offset,
            length: location.length,
            file_len: bytes.len(),
        })?;

    let orientation = get_orientation(jpeg);
    let image = decode_jpeg(jpeg)?;
    debug!(
        "Decoded preview: {}x{}, orientation {:?}",
        image.width, image.height, orientation
    );

    Ok(LoadedPreview {
        location,
        jpeg: jpeg.to_vec(),
        orientation,
        image,
    })
}

/// Load the embedded preview out of an ARW file on disk.
///
/// # Errors
///
/// [`PreviewError::Io`] if the file cannot be read; otherwise whatever
/// [`extract_and_decode`] reports for its contents.
pub fn load_preview(path: impl AsRef<Path>) -> Result<LoadedPreview, PreviewError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    extract_and_decode(&bytes)
}

/// A background preview load with a single-result handoff.
///
/// One producer (the worker thread), one consumer (the caller). The channel
/// holds at most the one result, and the handoff is one-shot: once the
/// result is taken, later polls report the worker gone. A worker that dies
/// without delivering surfaces as [`PreviewError::WorkerLost`], never a
/// hang.
#[derive(Debug)]
pub struct PreviewTask {
    rx: Receiver<Result<LoadedPreview, PreviewError>>,
}

impl PreviewTask {
    /// Spawn a worker thread that loads the preview from `path`.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::sync_channel(1);
        thread::spawn(move || {
            let result = load_preview(&path);
            // The consumer may have dropped the task; nothing to do then.
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// Poll for the result without blocking.
    ///
    /// Returns `None` while the worker is still running.
    pub fn try_wait(&self) -> Option<Result<LoadedPreview, PreviewError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PreviewError::WorkerLost)),
        }
    }

    /// Block until the worker delivers its result.
    pub fn wait(self) -> Result<LoadedPreview, PreviewError> {
        self.rx.recv().unwrap_or(Err(PreviewError::WorkerLost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arw::{TAG_JPEG_LENGTH, TAG_JPEG_OFFSET};
    use crate::decode::MINIMAL_JPEG;

    /// Helper to wrap a JPEG stream in a minimal ARW container.
    fn make_arw_with_preview(jpeg: &[u8]) -> Vec<u8> {
        let jpeg_offset = (8 + 2 + 2 * 12) as u32; // first byte after the directory
        let mut data = vec![0x49, 0x49, 0x2A, 0x00];
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        for (tag, value) in [
            (TAG_JPEG_OFFSET, jpeg_offset),
            (TAG_JPEG_LENGTH, jpeg.len() as u32),
        ] {
            data.extend_from_slice(&tag.to_le_bytes());
            data.extend_from_slice(&4u16.to_le_bytes());
            data.extend_from_slice(&1u32.to_le_bytes());
            data.extend_from_slice(&value.to_le_bytes());
        }
        assert_eq!(data.len(), jpeg_offset as usize);
        data.extend_from_slice(jpeg);
        data
    }

    /// Helper for a unique temp file path per test.
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("arwpeek-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_extract_and_decode_happy_path() {
        let data = make_arw_with_preview(MINIMAL_JPEG);
        let loaded = extract_and_decode(&data).unwrap();

        assert_eq!(loaded.location.offset, 34);
        assert_eq!(loaded.location.length, MINIMAL_JPEG.len() as u32);
        assert_eq!(loaded.jpeg, MINIMAL_JPEG);
        assert_eq!(loaded.orientation, Orientation::Normal);
        assert_eq!(loaded.image.width, 1);
        assert_eq!(loaded.image.height, 1);
    }

    #[test]
    fn test_extract_and_decode_parse_error_passes_through() {
        let result = extract_and_decode(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0]);
        assert!(matches!(
            result,
            Err(PreviewError::Parse(ParseError::MissingHeader))
        ));
    }

    #[test]
    fn test_extract_and_decode_range_past_eof() {
        // Container parses, but the declared range runs past the file.
        let mut data = make_arw_with_preview(MINIMAL_JPEG);
        let original_len = data.len();
        data.truncate(original_len - 10);

        let result = extract_and_decode(&data);
        match result {
            Err(PreviewError::RangeOutOfBounds {
                offset,
                length,
                file_len,
            }) => {
                assert_eq!(offset, 34);
                assert_eq!(length, MINIMAL_JPEG.len() as u32);
                assert_eq!(file_len, data.len());
            }
            other => panic!("Expected RangeOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_and_decode_non_jpeg_preview() {
        // The declared range is inside the file but holds zeros.
        let zeros = vec![0u8; 32];
        let data = make_arw_with_preview(&zeros);
        let result = extract_and_decode(&data);
        assert!(matches!(
            result,
            Err(PreviewError::Decode(DecodeError::NotJpeg))
        ));
    }

    #[test]
    fn test_load_preview_missing_file() {
        let result = load_preview(temp_path("does-not-exist.arw"));
        assert!(matches!(result, Err(PreviewError::Io(_))));
    }

    #[test]
    fn test_load_preview_from_disk() {
        let path = temp_path("roundtrip.arw");
        fs::write(&path, make_arw_with_preview(MINIMAL_JPEG)).unwrap();

        let loaded = load_preview(&path).unwrap();
        assert_eq!(loaded.jpeg, MINIMAL_JPEG);
        assert_eq!(loaded.image.width, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_task_matches_synchronous_load() {
        let path = temp_path("task.arw");
        let data = make_arw_with_preview(MINIMAL_JPEG);
        fs::write(&path, &data).unwrap();

        let task = PreviewTask::spawn(path.clone());
        let from_task = task.wait().unwrap();
        let from_sync = extract_and_decode(&data).unwrap();

        assert_eq!(from_task.location, from_sync.location);
        assert_eq!(from_task.jpeg, from_sync.jpeg);
        assert_eq!(from_task.image.pixels, from_sync.image.pixels);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_task_reports_errors() {
        let task = PreviewTask::spawn(temp_path("missing-task.arw"));
        assert!(matches!(task.wait(), Err(PreviewError::Io(_))));
    }

    #[test]
    fn test_try_wait_eventually_delivers() {
        let path = temp_path("poll.arw");
        fs::write(&path, make_arw_with_preview(MINIMAL_JPEG)).unwrap();

        let task = PreviewTask::spawn(path.clone());
        let mut delivered = None;
        for _ in 0..500 {
            if let Some(result) = task.try_wait() {
                delivered = Some(result);
                break;
            }
            thread::sleep(std::time::Duration::from_millis(2));
        }

        let loaded = delivered.expect("worker did not deliver in time").unwrap();
        assert_eq!(loaded.image.width, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_range_error_display() {
        let err = PreviewError::RangeOutOfBounds {
            offset: 34,
            length: 100,
            file_len: 50,
        };
        assert_eq!(
            err.to_string(),
            "Preview range out of bounds: 100 bytes at offset 34, file is 50"
        );
    }
}
