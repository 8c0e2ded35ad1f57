//! Read-forward byte cursors.
//!
//! - [`Consumable`] - The read-cursor capability
//! - [`ConsumableBuffer`] - Cursor over an in-memory byte sequence
//! - [`ConsumableFile`] - Cursor over an on-disk file

mod buffer;
mod file;

pub use buffer::ConsumableBuffer;
pub use file::ConsumableFile;

use std::future::Future;

use bytes::Bytes;

use crate::error::Result;

/// A forward-seekable, resettable source of bytes.
///
/// Implemented by both [`ConsumableBuffer`] and [`ConsumableFile`], so code
/// that only needs to consume bytes can take either.
///
/// # Example
///
/// ```
/// use bytepump::{Consumable, ConsumableBuffer};
///
/// async fn header<C: Consumable>(src: &mut C) -> bytepump::Result<u8> {
///     src.aseek(0).await?;
///     Ok(src.read(1).await?[0])
/// }
///
/// let mut buf = ConsumableBuffer::new(&b"INDEX"[..]);
/// let first = tokio_test::block_on(header(&mut buf))?;
/// assert_eq!(first, b'I');
/// # Ok::<(), bytepump::ResourceError>(())
/// ```
pub trait Consumable {
    /// Current absolute read offset.
    fn position(&self) -> u64;

    /// Rewinds the cursor to the start. Always succeeds.
    fn reset(&mut self);

    /// Reads exactly `n` bytes and advances the cursor by `n`.
    ///
    /// Fails with [`OutOfRange`](crate::ResourceError::OutOfRange) if fewer
    /// than `n` bytes remain, leaving the cursor where it was.
    fn read(&mut self, n: u64) -> impl Future<Output = Result<Bytes>> + Send;

    /// Moves the cursor `n` bytes forward from its current position.
    fn seek(&mut self, n: u64) -> impl Future<Output = Result<()>> + Send;

    /// Moves the cursor to absolute offset `n`.
    fn aseek(&mut self, n: u64) -> impl Future<Output = Result<()>> + Send;
}
