//! bytepump
//!
//! Byte-level sequential access over in-memory buffers and files.
//!
//! `bytepump` provides two small capabilities and a copy engine built on them:
//!
//! - [`Consumable`] - read-forward, seekable cursors
//!   ([`ConsumableBuffer`], [`ConsumableFile`])
//! - [`Expanding`] - position-tracked, append-only sinks
//!   ([`ExpandingBuffer`], [`ExpandingFile`])
//! - [`StreamPipeline`] - copies buffers, open handles and paths into one
//!   [`ExpandingFile`], reporting where each piece landed
//!
//! The crate intentionally:
//! - does NOT buffer, compress or encrypt
//! - does NOT frame its output (a file is the plain concatenation of writes)
//! - does NOT share a resource between concurrent users
//!
//! # Reading
//!
//! ```
//! use bytepump::ConsumableBuffer;
//!
//! let mut buf = ConsumableBuffer::new(&b"INDEX"[..]);
//! assert_eq!(&buf.read(1)?[..], b"I");
//! buf.aseek(3)?;
//! assert_eq!(&buf.read(2)?[..], b"EX");
//! # Ok::<(), bytepump::ResourceError>(())
//! ```
//!
//! # Assembling a file
//!
//! ```no_run
//! use bytepump::{ByteRange, ExpandingFile, StreamPipeline};
//!
//! # async fn demo() -> bytepump::Result<()> {
//! let mut out = ExpandingFile::new("archive.bin");
//! out.open().await?;
//!
//! let mut pipeline = StreamPipeline::load(&mut out)?;
//! pipeline.pump_bytes(&b"Start test"[..]).await?;
//! let entry = pipeline.pump_path("entry.bin", ByteRange::full()).await?;
//! pipeline.pump_path("other.bin", ByteRange::new(5, 4)).await?;
//! pipeline.pump_bytes(&b"End test"[..]).await?;
//! println!("entry stored at {:?}", entry.range());
//! drop(pipeline);
//!
//! out.close().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod consumable;
mod error;
mod expanding;
mod pipeline;

mod buffer; // internal (thread-local reuse)

//
// Public surface
//

pub use config::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, StreamConfig};
pub use consumable::{Consumable, ConsumableBuffer, ConsumableFile};
pub use error::{ResourceError, Result};
pub use expanding::{Expanding, ExpandingBuffer, ExpandingFile, WriteInput};
pub use pipeline::{ByteRange, PumpResult, PumpSource, ReadStream, StreamPipeline};
