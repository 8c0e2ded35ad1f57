//! Append-only byte sink backed by a file.

use std::future::Future;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

use super::{Expanding, WriteInput};
use crate::error::{ResourceError, Result};

const RESOURCE: &str = "expanding file";

/// An append-only file.
///
/// Each write is positioned explicitly at [`position`](Self::position), the
/// count of bytes written since [`open`](Self::open). The file is assumed to
/// be exclusively owned for the whole open session.
///
/// # Example
///
/// ```no_run
/// use bytepump::ExpandingFile;
///
/// # async fn demo() -> bytepump::Result<()> {
/// let mut out = ExpandingFile::new("out.bin");
/// out.open().await?;
/// out.write("test").await?;
/// assert_eq!(out.write("test2").await?, 9);
/// out.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExpandingFile {
    path: PathBuf,
    handle: Option<File>,
    position: u64,
}

impl ExpandingFile {
    /// Creates a closed sink for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: None,
            position: 0,
        }
    }

    /// Creates or truncates the file and rewinds to 0.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Uncreatable`] if the file cannot be created.
    pub async fn open(&mut self) -> Result<()> {
        let file = File::create(&self.path)
            .await
            .map_err(|source| ResourceError::Uncreatable {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), "opened expanding file");
        self.handle = Some(file);
        self.position = 0;
        Ok(())
    }

    /// Flushes pending writes and releases the handle. A no-op when closed.
    ///
    /// The handle is released and the position zeroed even if the flush
    /// fails.
    pub async fn close(&mut self) -> Result<()> {
        let written = std::mem::take(&mut self.position);
        if let Some(mut file) = self.handle.take() {
            file.flush().await?;
            debug!(path = %self.path.display(), written, "closed expanding file");
        }
        Ok(())
    }

    /// Appends `input` at the current position and returns the new position.
    ///
    /// The position advances by the bytes the OS accepted, which under normal
    /// conditions is the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotOpened`] before [`open`](Self::open).
    pub async fn write(&mut self, input: impl Into<WriteInput>) -> Result<u64> {
        let position = self.position;
        let file = self.handle_mut()?;
        let data = input.into().into_bytes();

        file.seek(SeekFrom::Start(position)).await?;
        let mut written = 0;
        while written < data.len() {
            let n = file.write(&data[written..]).await?;
            if n == 0 {
                break;
            }
            written += n;
        }

        self.position += written as u64;
        Ok(self.position)
    }

    /// Pushes buffered writes through to the OS.
    pub async fn flush(&mut self) -> Result<()> {
        self.handle_mut()?.flush().await?;
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

    /// Bytes written since open.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub(crate) fn handle_mut(&mut self) -> Result<&mut File> {
        self.handle
            .as_mut()
            .ok_or(ResourceError::NotOpened { resource: RESOURCE })
    }

    pub(crate) fn advance(&mut self, n: u64) {
        self.position += n;
    }
}

impl Expanding for ExpandingFile {
    fn position(&self) -> u64 {
        self.position
    }

    fn write(
        &mut self,
        input: impl Into<WriteInput> + Send,
    ) -> impl Future<Output = Result<u64>> + Send {
        ExpandingFile::write(self, input)
    }
}
