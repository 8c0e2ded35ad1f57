//! Growable in-memory byte sink.

use std::future::{self, Future};

use bytes::{Bytes, BytesMut};

use super::{Expanding, WriteInput};
use crate::error::Result;

/// An append-only in-memory byte sequence.
///
/// Its position is always its length; it exists alongside
/// [`ExpandingFile`](super::ExpandingFile) so callers of [`Expanding`] can
/// swap one for the other.
///
/// # Example
///
/// ```
/// use bytepump::ExpandingBuffer;
///
/// let mut buf = ExpandingBuffer::new();
/// buf.write("test");
/// assert_eq!(buf.write(b"2"), 5);
/// assert_eq!(buf.as_bytes(), b"test2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpandingBuffer {
    buf: BytesMut,
}

impl ExpandingBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears everything written so far.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Appends `input` and returns the new length.
    pub fn write(&mut self, input: impl Into<WriteInput>) -> u64 {
        self.buf.extend_from_slice(&input.into().into_bytes());
        self.position()
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.buf.len() as u64
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the buffer and returns the accumulated bytes.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Expanding for ExpandingBuffer {
    fn position(&self) -> u64 {
        ExpandingBuffer::position(self)
    }

    fn write(
        &mut self,
        input: impl Into<WriteInput> + Send,
    ) -> impl Future<Output = Result<u64>> + Send {
        future::ready(Ok(ExpandingBuffer::write(self, input)))
    }
}
