//! Thread-local scratch buffer pool.

use std::cell::RefCell;

use crate::config::DEFAULT_CHUNK_SIZE;

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable, zero-initialized read buffer.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer of exactly `len` bytes from the thread-local pool, or
    /// allocates one.
    pub fn take(len: usize) -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_default();
        data.resize(len, 0);
        Self { data }
    }

    /// Length of the usable region.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Mutable view of the whole buffer.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The first `n` bytes.
    pub fn filled(&self, n: usize) -> &[u8] {
        &self.data[..n]
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        // Oversized buffers are freed rather than pinned in the pool.
        if self.data.capacity() <= DEFAULT_CHUNK_SIZE * 2 {
            self.data.clear();
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
