//! Read cursor over an on-disk file.

use std::future::Future;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use bytes::{Bytes, BytesMut};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::debug;

use super::Consumable;
use crate::error::{ResourceError, Result, checked_advance, to_len};

const RESOURCE: &str = "consumable file";

/// State held only while the file is open.
#[derive(Debug)]
struct OpenFile {
    file: File,
    filesize: u64,
}

/// A forward cursor over a file, read with explicitly positioned reads.
///
/// The file size is captured at [`open`](ConsumableFile::open); reads are
/// bounds-checked against it.
///
/// # Example
///
/// ```no_run
/// use bytepump::ConsumableFile;
///
/// # async fn demo() -> bytepump::Result<()> {
/// let mut file = ConsumableFile::new("data.bin");
/// file.open().await?;
/// let magic = file.read(4).await?;
/// file.seek(12).await?;
/// let body = file.read(64).await?;
/// file.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConsumableFile {
    path: PathBuf,
    handle: Option<OpenFile>,
    position: u64,
}

impl ConsumableFile {
    /// Creates a closed cursor for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: None,
            position: 0,
        }
    }

    /// Opens the file for reading, records its size and rewinds to 0.
    ///
    /// Reopening an open cursor replaces its handle.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unreadable`] if the path cannot be opened or
    /// inspected.
    pub async fn open(&mut self) -> Result<()> {
        let unreadable = |source| ResourceError::Unreadable {
            path: self.path.clone(),
            source,
        };
        let file = File::open(&self.path).await.map_err(unreadable)?;
        let filesize = file.metadata().await.map_err(unreadable)?.len();

        debug!(path = %self.path.display(), filesize, "opened consumable file");
        self.handle = Some(OpenFile { file, filesize });
        self.position = 0;
        Ok(())
    }

    /// Releases the handle. A no-op when already closed.
    pub fn close(&mut self) {
        if self.handle.take().is_some() {
            debug!(path = %self.path.display(), "closed consumable file");
        }
        self.position = 0;
    }

    /// Rewinds to offset 0 without touching the handle.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Reads exactly `n` bytes at the current position and advances by `n`.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::NotOpened`] before [`open`](Self::open)
    /// - [`ResourceError::OutOfRange`] if `position + n` exceeds the file size
    /// - [`ResourceError::ShortRead`] if the file yields fewer bytes than its
    ///   recorded size promised
    pub async fn read(&mut self, n: u64) -> Result<Bytes> {
        let open = self
            .handle
            .as_mut()
            .ok_or(ResourceError::NotOpened { resource: RESOURCE })?;
        let len = to_len(n)?;
        if len == 0 {
            return Ok(Bytes::new());
        }

        let end = checked_advance(self.position, n)?;
        if end > open.filesize {
            return Err(ResourceError::out_of_range(
                n,
                open.filesize.saturating_sub(self.position),
            ));
        }

        let data = read_at(&mut open.file, self.position, len).await?;
        self.position = end;
        Ok(data)
    }

    /// Moves `n` bytes forward; same as `aseek(position + n)`.
    pub async fn seek(&mut self, n: u64) -> Result<()> {
        let target = checked_advance(self.position, n)?;
        self.aseek(target).await
    }

    /// Moves the cursor to absolute offset `n`.
    ///
    /// The target itself is not bounds-checked: seeking past the end
    /// succeeds and the next [`read`](Self::read) reports out-of-range. The
    /// check that does run is on the current position, which is only past the
    /// end after such a seek.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::NotOpened`] before [`open`](Self::open)
    /// - [`ResourceError::OutOfRange`] if the current position is already
    ///   beyond the file size
    pub async fn aseek(&mut self, n: u64) -> Result<()> {
        let open = self
            .handle
            .as_ref()
            .ok_or(ResourceError::NotOpened { resource: RESOURCE })?;
        if self.position > open.filesize {
            return Err(ResourceError::out_of_range(self.position, open.filesize));
        }
        self.position = n;
        Ok(())
    }

    /// The path given at construction.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true while a handle is held.
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// File size captured at open, or `None` when closed.
    pub fn filesize(&self) -> Option<u64> {
        self.handle.as_ref().map(|open| open.filesize)
    }

    /// Current absolute read offset.
    pub fn position(&self) -> u64 {
        self.position
    }
}

/// Positioned read of exactly `len` bytes.
async fn read_at(file: &mut File, offset: u64, len: usize) -> Result<Bytes> {
    file.seek(SeekFrom::Start(offset)).await?;

    let mut data = BytesMut::zeroed(len);
    let mut filled = 0;
    while filled < len {
        let n = file.read(&mut data[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    if filled < len {
        return Err(ResourceError::ShortRead {
            expected: len,
            actual: filled,
        });
    }
    Ok(data.freeze())
}

impl Consumable for ConsumableFile {
    fn position(&self) -> u64 {
        self.position
    }

    fn reset(&mut self) {
        ConsumableFile::reset(self)
    }

    fn read(&mut self, n: u64) -> impl Future<Output = Result<Bytes>> + Send {
        ConsumableFile::read(self, n)
    }

    fn seek(&mut self, n: u64) -> impl Future<Output = Result<()>> + Send {
        ConsumableFile::seek(self, n)
    }

    fn aseek(&mut self, n: u64) -> impl Future<Output = Result<()>> + Send {
        ConsumableFile::aseek(self, n)
    }
}
