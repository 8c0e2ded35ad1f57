//! Internal scratch buffers for stream copies.
//!
//! Each pump reads its source through a scratch buffer taken from a
//! thread-local pool, so back-to-back pumps reuse the same allocation. This
//! is an implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
