//! The copy engine.

use std::io::SeekFrom;
use std::path::Path;

use bytes::Bytes;
use futures_io::AsyncRead;
use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, warn};

use super::{ByteRange, PumpResult, PumpSource, ReadStream};
use crate::config::StreamConfig;
use crate::error::{ResourceError, Result};
use crate::expanding::ExpandingFile;

/// What the copy primitive writes: one buffer, or a stream of chunks.
enum CopySource<R> {
    Bytes(Bytes),
    Stream(ReadStream<R>),
}

/// Copies bytes from buffers, handles and paths into one open
/// [`ExpandingFile`].
///
/// The pipeline borrows the destination for its whole session, so pumps run
/// one at a time and every [`PumpResult`] offset is exact. Dropping the
/// pipeline ends the session; the destination stays open and is closed by
/// its owner.
///
/// # Example
///
/// ```no_run
/// use bytepump::{ByteRange, ExpandingFile, StreamPipeline};
///
/// # async fn demo() -> bytepump::Result<()> {
/// let mut out = ExpandingFile::new("bundle.bin");
/// out.open().await?;
///
/// let mut pipeline = StreamPipeline::load(&mut out)?;
/// pipeline.pump_bytes(&b"HEAD"[..]).await?;
/// let body = pipeline.pump_path("body.bin", ByteRange::full()).await?;
/// println!("body at {} ({} bytes)", body.offset, body.wrote);
/// drop(pipeline);
///
/// out.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StreamPipeline<'a> {
    destination: &'a mut ExpandingFile,
    config: StreamConfig,
}

impl<'a> StreamPipeline<'a> {
    /// Binds a pipeline to an open destination with the default config.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotOpened`] if `destination` is not open.
    pub fn load(destination: &'a mut ExpandingFile) -> Result<Self> {
        Self::load_with_config(destination, StreamConfig::default())
    }

    /// Binds a pipeline to an open destination.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InvalidConfig`] if `config` does not validate
    /// - [`ResourceError::NotOpened`] if `destination` is not open
    pub fn load_with_config(
        destination: &'a mut ExpandingFile,
        config: StreamConfig,
    ) -> Result<Self> {
        config.validate()?;
        if !destination.is_open() {
            return Err(ResourceError::NotOpened {
                resource: "pipeline destination",
            });
        }

        debug!(
            path = %destination.path().display(),
            position = destination.position(),
            "loaded stream pipeline"
        );
        Ok(Self {
            destination,
            config,
        })
    }

    /// Copies `source` into the destination.
    ///
    /// `range` applies to handle and path sources and is ignored for bytes.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Unreadable`] if a path source cannot be opened
    /// - [`ResourceError::InvalidHandle`] if a handle fails its liveness check
    /// - [`ResourceError::Io`] for any error raised while reading the source
    ///   or writing the destination; the destination is truncated back to its
    ///   position, which is unchanged
    pub async fn pump(
        &mut self,
        source: PumpSource<'_>,
        range: ByteRange,
    ) -> Result<PumpResult> {
        match source {
            PumpSource::Bytes(bytes) => self.pump_bytes(bytes).await,
            PumpSource::Handle(handle) => self.pump_handle(handle, range).await,
            PumpSource::Path(path) => self.pump_path(path, range).await,
        }
    }

    /// Copies an in-memory buffer.
    pub async fn pump_bytes(&mut self, bytes: impl Into<Bytes>) -> Result<PumpResult> {
        self.copy(CopySource::<&[u8]>::Bytes(bytes.into())).await
    }

    /// Opens `path`, copies the selected range and closes it again.
    ///
    /// The handle is released whether or not the copy succeeds.
    pub async fn pump_path(
        &mut self,
        path: impl AsRef<Path>,
        range: ByteRange,
    ) -> Result<PumpResult> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .await
            .map_err(|source| ResourceError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(start) = range.start {
            file.seek(SeekFrom::Start(start)).await?;
        }

        let stream = ReadStream::new(file.compat(), self.config.chunk_size(), range.length);
        let result = self.copy(CopySource::Stream(stream)).await;
        debug!(path = %path.display(), ok = result.is_ok(), "released pump source");
        result
    }

    /// Copies from a caller-owned handle, leaving it open.
    ///
    /// Without `range.start` the copy begins at the handle's current cursor.
    pub async fn pump_handle(
        &mut self,
        handle: &mut File,
        range: ByteRange,
    ) -> Result<PumpResult> {
        handle
            .metadata()
            .await
            .map_err(|source| ResourceError::InvalidHandle { source })?;
        if let Some(start) = range.start {
            handle.seek(SeekFrom::Start(start)).await?;
        }

        let stream = ReadStream::new(handle.compat(), self.config.chunk_size(), range.length);
        self.copy(CopySource::Stream(stream)).await
    }

    /// Copies everything `reader` yields until EOF.
    pub async fn pump_reader<R: AsyncRead + Unpin>(&mut self, reader: R) -> Result<PumpResult> {
        let stream = ReadStream::new(reader, self.config.chunk_size(), None);
        self.copy(CopySource::Stream(stream)).await
    }

    /// The destination's current position.
    pub fn position(&self) -> u64 {
        self.destination.position()
    }

    /// The active configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Writes one source at the destination position and advances it once
    /// the whole source has landed.
    ///
    /// On failure the destination is truncated back to the starting offset,
    /// so the file never holds a partial pump.
    async fn copy<R: AsyncRead + Unpin>(&mut self, source: CopySource<R>) -> Result<PumpResult> {
        let offset = self.destination.position();
        let flush = self.config.flush_each_pump();
        let file = self.destination.handle_mut()?;

        let copied = match write_source(file, offset, source).await {
            Ok(wrote) if flush => file.flush().await.map(|()| wrote).map_err(Into::into),
            other => other,
        };
        let wrote = match copied {
            Ok(wrote) => wrote,
            Err(e) => {
                warn!(offset, error = %e, "pump failed, truncating destination");
                if let Err(truncate) = file.set_len(offset).await {
                    warn!(offset, error = %truncate, "could not truncate destination");
                }
                return Err(e);
            }
        };
        self.destination.advance(wrote);

        debug!(offset, wrote, "pumped");
        Ok(PumpResult { offset, wrote })
    }
}

/// Writes `source` at `offset` and returns the bytes copied.
async fn write_source<R: AsyncRead + Unpin>(
    file: &mut File,
    offset: u64,
    source: CopySource<R>,
) -> Result<u64> {
    file.seek(SeekFrom::Start(offset)).await?;

    match source {
        CopySource::Bytes(bytes) => {
            file.write_all(&bytes).await?;
            Ok(bytes.len() as u64)
        }
        CopySource::Stream(mut stream) => {
            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(chunk) => file.write_all(&chunk).await?,
                    Err(e) => {
                        warn!(offset, consumed = stream.consumed(), error = %e, "pump source failed");
                        return Err(e.into());
                    }
                }
            }
            Ok(stream.consumed())
        }
    }
}
