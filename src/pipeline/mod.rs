//! Copying heterogeneous sources into one expanding file.
//!
//! - [`StreamPipeline`] - Copy engine bound to an open [`ExpandingFile`](crate::ExpandingFile)
//! - [`PumpSource`] - Bytes, a caller-owned handle, or a path
//! - [`ByteRange`] - Optional start/length restriction for file sources
//! - [`PumpResult`] - Where a pump landed and how much it wrote
//! - [`ReadStream`] - Range-limited chunk stream over an async reader

mod pump;
mod stream;

pub use pump::StreamPipeline;
pub use stream::ReadStream;

use std::ops::Range;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs::File;

/// A source for [`StreamPipeline::pump`].
///
/// Strings convert to [`PumpSource::Path`]; use [`Bytes`] or `Vec<u8>` for
/// literal content.
#[derive(Debug)]
pub enum PumpSource<'h> {
    /// In-memory bytes, written in one step.
    Bytes(Bytes),
    /// An open handle owned by the caller. It is read from and left open.
    Handle(&'h mut File),
    /// A path the pipeline opens, reads and closes itself.
    Path(PathBuf),
}

impl From<Bytes> for PumpSource<'_> {
    fn from(bytes: Bytes) -> Self {
        PumpSource::Bytes(bytes)
    }
}

impl From<Vec<u8>> for PumpSource<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        PumpSource::Bytes(bytes.into())
    }
}

impl<'h> From<&'h mut File> for PumpSource<'h> {
    fn from(handle: &'h mut File) -> Self {
        PumpSource::Handle(handle)
    }
}

impl From<PathBuf> for PumpSource<'_> {
    fn from(path: PathBuf) -> Self {
        PumpSource::Path(path)
    }
}

impl From<&Path> for PumpSource<'_> {
    fn from(path: &Path) -> Self {
        PumpSource::Path(path.to_path_buf())
    }
}

impl From<&str> for PumpSource<'_> {
    fn from(path: &str) -> Self {
        PumpSource::Path(path.into())
    }
}

impl From<String> for PumpSource<'_> {
    fn from(path: String) -> Self {
        PumpSource::Path(path.into())
    }
}

/// Restricts which bytes of a file source are pumped.
///
/// `start` is an absolute offset into the source; without it a path is read
/// from its beginning and a handle from its current cursor. `length` caps the
/// bytes read, so the last byte copied is `start + length - 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteRange {
    /// Absolute offset to start reading from.
    pub start: Option<u64>,
    /// Maximum number of bytes to read.
    pub length: Option<u64>,
}

impl ByteRange {
    /// The whole source.
    pub fn full() -> Self {
        Self::default()
    }

    /// `length` bytes starting at `start`.
    pub fn new(start: u64, length: u64) -> Self {
        Self {
            start: Some(start),
            length: Some(length),
        }
    }

    /// Everything from `start` onward.
    pub fn from_start(start: u64) -> Self {
        Self {
            start: Some(start),
            length: None,
        }
    }

    /// The first `length` bytes from the read cursor.
    pub fn with_length(length: u64) -> Self {
        Self {
            start: None,
            length: Some(length),
        }
    }

    /// Inclusive end offset, when both ends are known and representable.
    pub fn end(&self) -> Option<u64> {
        match (self.start, self.length) {
            (Some(start), Some(length)) if length > 0 => start.checked_add(length - 1),
            _ => None,
        }
    }
}

/// Outcome of one pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpResult {
    /// Destination position when the pump began.
    pub offset: u64,
    /// Bytes copied into the destination.
    pub wrote: u64,
}

impl PumpResult {
    /// Destination offset one past the last byte written.
    pub fn end(&self) -> u64 {
        self.offset + self.wrote
    }

    /// The destination byte range this pump filled.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_range_end() {
        assert_eq!(ByteRange::new(5, 4).end(), Some(8));
        assert_eq!(ByteRange::new(5, 0).end(), None);
        assert_eq!(ByteRange::from_start(5).end(), None);
        assert_eq!(ByteRange::full(), ByteRange::default());
    }

    #[test]
    fn test_byte_range_end_overflow() {
        assert_eq!(ByteRange::new(u64::MAX, 1).end(), Some(u64::MAX));
        assert_eq!(ByteRange::new(u64::MAX, 2).end(), None);
        assert_eq!(ByteRange::new(u64::MAX - 1, u64::MAX).end(), None);
    }

    #[test]
    fn test_pump_result_range() {
        let result = PumpResult {
            offset: 10,
            wrote: 4,
        };
        assert_eq!(result.end(), 14);
        assert_eq!(result.range(), 10..14);
    }

    #[test]
    fn test_strings_are_paths() {
        assert!(matches!(PumpSource::from("a/b.bin"), PumpSource::Path(_)));
        assert!(matches!(
            PumpSource::from(b"a/b.bin".to_vec()),
            PumpSource::Bytes(_)
        ));
    }
}
