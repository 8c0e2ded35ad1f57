//! Range-limited byte stream over an async reader.
//!
//! Uses `futures_io::AsyncRead`, so any runtime's reader works; tokio files
//! are adapted with `tokio_util::compat`.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::trace;

use crate::buffer::Buffer;

pin_project! {
    /// A stream of byte chunks read from an async reader.
    ///
    /// Each item holds at most `chunk_size` bytes. The stream ends at EOF or
    /// once `limit` bytes have been yielded, and after ending or failing it
    /// only ever yields `None`.
    pub struct ReadStream<R> {
        #[pin]
        reader: R,
        buffer: Buffer,
        remaining: Option<u64>,
        consumed: u64,
        finished: bool,
    }
}

impl<R> ReadStream<R> {
    /// Creates a stream reading `reader` in steps of `chunk_size`, stopping
    /// after `limit` bytes when one is given.
    pub fn new(reader: R, chunk_size: usize, limit: Option<u64>) -> Self {
        Self {
            reader,
            buffer: Buffer::take(chunk_size),
            remaining: limit,
            consumed: 0,
            finished: false,
        }
    }

    /// Bytes yielded so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl<R: AsyncRead> Stream for ReadStream<R> {
    type Item = std::io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        let want = match *this.remaining {
            Some(0) => {
                *this.finished = true;
                return Poll::Ready(None);
            }
            Some(left) => left.min(this.buffer.len() as u64) as usize,
            None => this.buffer.len(),
        };

        match this.reader.poll_read(cx, &mut this.buffer.as_mut_slice()[..want]) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Err(e)) => {
                *this.finished = true;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(Ok(0)) => {
                *this.finished = true;
                Poll::Ready(None)
            }
            Poll::Ready(Ok(n)) => {
                if let Some(left) = this.remaining.as_mut() {
                    *left -= n as u64;
                }
                *this.consumed += n as u64;
                trace!(bytes = n, consumed = *this.consumed, "stream chunk");
                Poll::Ready(Some(Ok(Bytes::copy_from_slice(this.buffer.filled(n)))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_stream_empty() {
        let reader: &[u8] = &[];
        let stream = ReadStream::new(reader, 16, None);
        let chunks: Vec<_> = stream.collect().await;
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_stream_chunk_size() {
        let data: Vec<u8> = (0..100).collect();
        let reader: &[u8] = &data;
        let stream = ReadStream::new(reader, 32, None);

        let chunks: Vec<Bytes> = stream
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        let lens: Vec<usize> = chunks.iter().map(Bytes::len).collect();
        assert_eq!(lens, vec![32, 32, 32, 4]);
        assert_eq!(chunks.concat(), data);
    }

    #[tokio::test]
    async fn test_stream_limit() {
        let data = b"0123456789";
        let reader: &[u8] = data;
        let mut stream = ReadStream::new(reader, 3, Some(5));

        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(out, b"01234");
        assert_eq!(stream.consumed(), 5);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_limit_past_eof() {
        let reader: &[u8] = b"abc";
        let stream = ReadStream::new(reader, 8, Some(100));
        let chunks: Vec<_> = stream.collect().await;
        assert_eq!(chunks.len(), 1);
    }

    struct FailingReader;

    impl AsyncRead for FailingReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut [u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::other("boom")))
        }
    }

    #[tokio::test]
    async fn test_stream_error_settles_once() {
        let mut stream = ReadStream::new(FailingReader, 8, None);
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }
}
