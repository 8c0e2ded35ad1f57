//! Append-only byte sinks.
//!
//! - [`Expanding`] - The write-append capability
//! - [`WriteInput`] - Everything a write accepts, normalized to bytes
//! - [`ExpandingBuffer`] - Growable in-memory sequence
//! - [`ExpandingFile`] - Append-only file written with positioned writes

mod buffer;
mod file;
mod input;

pub use buffer::ExpandingBuffer;
pub use file::ExpandingFile;
pub use input::WriteInput;

use std::future::Future;

use crate::error::Result;

/// A position-tracked, append-only byte sink.
///
/// `position` is the total number of bytes appended so far, which is also the
/// offset the next write lands at.
pub trait Expanding {
    /// Bytes written so far.
    fn position(&self) -> u64;

    /// Appends `input` and returns the new position.
    fn write(
        &mut self,
        input: impl Into<WriteInput> + Send,
    ) -> impl Future<Output = Result<u64>> + Send;
}
