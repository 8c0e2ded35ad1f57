//! Read cursor over an in-memory byte sequence.

use std::future::{self, Future};

use bytes::Bytes;

use super::Consumable;
use crate::error::{ResourceError, Result, to_len};

/// A forward-only cursor over a byte sequence supplied at construction.
///
/// Reads hand out zero-copy slices of the original [`Bytes`]. Consumed bytes
/// are not visible again until [`reset`](ConsumableBuffer::reset) or an
/// absolute seek.
///
/// # Example
///
/// ```
/// use bytepump::ConsumableBuffer;
///
/// let mut buf = ConsumableBuffer::new(&b"INDEX"[..]);
/// assert_eq!(&buf.read(1)?[..], b"I");
/// buf.seek(4)?;
/// assert!(buf.read(1).unwrap_err().is_out_of_range());
/// # Ok::<(), bytepump::ResourceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConsumableBuffer {
    original: Bytes,
    buf: Bytes,
}

impl ConsumableBuffer {
    /// Wraps a byte sequence.
    pub fn new(data: impl Into<Bytes>) -> Self {
        let original = data.into();
        Self {
            buf: original.clone(),
            original,
        }
    }

    /// Restores the working sequence to the original.
    pub fn reset(&mut self) {
        self.buf = self.original.clone();
    }

    /// Returns the next `n` bytes and drops them from the front of the
    /// working sequence.
    pub fn read(&mut self, n: u64) -> Result<Bytes> {
        let len = to_len(n)?;
        if len > self.buf.len() {
            return Err(ResourceError::out_of_range(n, self.buf.len() as u64));
        }
        Ok(self.buf.split_to(len))
    }

    /// Skips `n` bytes. Never moves backward.
    pub fn seek(&mut self, n: u64) -> Result<()> {
        self.read(n).map(drop)
    }

    /// Seeks to absolute offset `n` of the original sequence.
    ///
    /// On failure the cursor is left at the start.
    pub fn aseek(&mut self, n: u64) -> Result<()> {
        self.reset();
        self.seek(n)
    }

    /// Bytes consumed since construction or the last reset.
    pub fn position(&self) -> u64 {
        (self.original.len() - self.buf.len()) as u64
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> u64 {
        self.buf.len() as u64
    }

    /// Length of the original sequence.
    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// Returns true if the original sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// The sequence supplied at construction.
    pub fn original(&self) -> &Bytes {
        &self.original
    }
}

impl From<Bytes> for ConsumableBuffer {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl From<Vec<u8>> for ConsumableBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl Consumable for ConsumableBuffer {
    fn position(&self) -> u64 {
        ConsumableBuffer::position(self)
    }

    fn reset(&mut self) {
        ConsumableBuffer::reset(self)
    }

    fn read(&mut self, n: u64) -> impl Future<Output = Result<Bytes>> + Send {
        future::ready(ConsumableBuffer::read(self, n))
    }

    fn seek(&mut self, n: u64) -> impl Future<Output = Result<()>> + Send {
        future::ready(ConsumableBuffer::seek(self, n))
    }

    fn aseek(&mut self, n: u64) -> impl Future<Output = Result<()>> + Send {
        future::ready(ConsumableBuffer::aseek(self, n))
    }
}
