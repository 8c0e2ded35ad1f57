//! Configuration for the stream pipeline.
//!
//! - [`StreamConfig`] - Read step size and flush behavior of each pump
//!
//! # Example
//!
//! ```
//! use bytepump::StreamConfig;
//!
//! let config = StreamConfig::new(8192)?;
//! assert_eq!(config.chunk_size(), 8192);
//!
//! let config = StreamConfig::default().with_flush_each_pump(false);
//! assert!(!config.flush_each_pump());
//! # Ok::<(), bytepump::ResourceError>(())
//! ```

use crate::error::ResourceError;

/// Default stream read step (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Largest accepted stream read step (16 MiB).
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Configuration for how a [`StreamPipeline`](crate::StreamPipeline) copies
/// stream sources.
///
/// # Constraints
///
/// `chunk_size` must be non-zero and at most [`MAX_CHUNK_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamConfig {
    /// Bytes requested from the source per read step.
    chunk_size: usize,

    /// Flush the destination handle when a pump completes.
    flush_each_pump: bool,
}

impl StreamConfig {
    /// Creates a configuration with the given read step.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidConfig`] if `chunk_size` is zero or
    /// larger than [`MAX_CHUNK_SIZE`].
    pub fn new(chunk_size: usize) -> Result<Self, ResourceError> {
        let config = Self {
            chunk_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the read step.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`StreamConfig::validate`] to check it.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets whether each pump flushes the destination when it completes.
    pub fn with_flush_each_pump(mut self, flush: bool) -> Self {
        self.flush_each_pump = flush;
        self
    }

    /// Returns the read step in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns whether each pump flushes the destination.
    pub fn flush_each_pump(&self) -> bool {
        self.flush_each_pump
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidConfig`] if the read step is out of
    /// bounds.
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.chunk_size == 0 {
            return Err(ResourceError::InvalidConfig {
                message: "chunk_size must be non-zero",
            });
        }

        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ResourceError::InvalidConfig {
                message: "chunk_size exceeds MAX_CHUNK_SIZE",
            });
        }

        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            flush_each_pump: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert!(config.flush_each_pump());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            StreamConfig::new(0),
            Err(ResourceError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_new_rejects_oversized() {
        assert!(StreamConfig::new(MAX_CHUNK_SIZE).is_ok());
        assert!(StreamConfig::new(MAX_CHUNK_SIZE + 1).is_err());
    }

    #[test]
    fn test_builder_is_unvalidated() {
        let config = StreamConfig::default().with_chunk_size(0);
        assert!(config.validate().is_err());
    }
}
