//! Error types for bytepump.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, writing or pumping bytes.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The operation needs an open handle and the resource is closed.
    #[error("{resource} is not opened")]
    NotOpened {
        /// Which kind of resource was used.
        resource: &'static str,
    },

    /// A byte count cannot be represented or overflows the cursor.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The request extends past the end of the available data.
    #[error("read beyond end: requested {requested} bytes, {available} available")]
    OutOfRange {
        /// Bytes the caller asked for.
        requested: u64,
        /// Bytes left between the cursor and the end.
        available: u64,
    },

    /// The underlying read returned fewer bytes than the bounds check promised.
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Bytes requested.
        expected: usize,
        /// Bytes actually read.
        actual: usize,
    },

    /// A path could not be opened for reading.
    #[error("{} is not readable: {source}", path.display())]
    Unreadable {
        /// The offending path.
        path: PathBuf,
        /// The error reported by the filesystem.
        source: std::io::Error,
    },

    /// A path could not be created or truncated for writing.
    #[error("{} cannot be created: {source}", path.display())]
    Uncreatable {
        /// The offending path.
        path: PathBuf,
        /// The error reported by the filesystem.
        source: std::io::Error,
    },

    /// A supplied file handle failed its liveness check.
    #[error("invalid file handle: {source}")]
    InvalidHandle {
        /// The error returned by the liveness check.
        source: std::io::Error,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// An I/O error surfaced by the platform, forwarded unchanged.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResourceError {
    /// Returns true for [`ResourceError::NotOpened`].
    pub fn is_not_opened(&self) -> bool {
        matches!(self, ResourceError::NotOpened { .. })
    }

    /// Returns true for [`ResourceError::OutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ResourceError::OutOfRange { .. })
    }

    /// Returns true for [`ResourceError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ResourceError::InvalidArgument { .. })
    }

    /// Returns true for [`ResourceError::ShortRead`].
    pub fn is_short_read(&self) -> bool {
        matches!(self, ResourceError::ShortRead { .. })
    }

    pub(crate) fn out_of_range(requested: u64, available: u64) -> Self {
        ResourceError::OutOfRange {
            requested,
            available,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Converts a public `u64` count into a `usize` length.
pub(crate) fn to_len(n: u64) -> Result<usize> {
    usize::try_from(n).map_err(|_| ResourceError::InvalidArgument {
        message: "byte count does not fit in memory",
    })
}

/// Adds a count to a cursor, rejecting overflow.
pub(crate) fn checked_advance(position: u64, n: u64) -> Result<u64> {
    position
        .checked_add(n)
        .ok_or(ResourceError::InvalidArgument {
            message: "byte count overflows the cursor",
        })
}
