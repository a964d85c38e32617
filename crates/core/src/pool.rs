//! Per-call scratch pool for serialized byte buffers
//!
//! Values routed through a serializer land in a buffer taken from a
//! [`ScratchPool`]. Each conversion call gets its own pool, so the converter
//! shares no mutable state between threads. A pool has a fixed capacity of
//! live buffers; taking one past the capacity is a `ClientInternal` error.
//!
//! A [`ScratchBuf`] gives its slot back when dropped. `live()` therefore
//! returns to its baseline once every value produced by a failed conversion
//! has been released, which is how the release-on-error paths are tested.

use crate::error::{Error, Result};
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Default number of live buffers a pool hands out
pub const DEFAULT_POOL_CAPACITY: usize = 4096;

#[derive(Debug)]
struct PoolState {
    capacity: usize,
    live: AtomicUsize,
    taken: AtomicUsize,
}

/// Working set of scratch buffers for one conversion call
#[derive(Debug)]
pub struct ScratchPool {
    state: Arc<PoolState>,
}

impl ScratchPool {
    /// Create a pool with [`DEFAULT_POOL_CAPACITY`]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Create a pool that allows at most `capacity` live buffers
    pub fn with_capacity(capacity: usize) -> Self {
        ScratchPool {
            state: Arc::new(PoolState {
                capacity,
                live: AtomicUsize::new(0),
                taken: AtomicUsize::new(0),
            }),
        }
    }

    /// Move `data` into a pooled buffer
    ///
    /// Fails with `ClientInternal` when the pool is at capacity.
    pub fn take(&self, data: Vec<u8>) -> Result<ScratchBuf> {
        let prev = self.state.live.fetch_add(1, Ordering::AcqRel);
        if prev >= self.state.capacity {
            self.state.live.fetch_sub(1, Ordering::AcqRel);
            warn!(
                capacity = self.state.capacity,
                "scratch pool exhausted"
            );
            return Err(Error::client(format!(
                "cannot allocate bytes: scratch pool of {} buffers exhausted",
                self.state.capacity
            )));
        }
        self.state.taken.fetch_add(1, Ordering::Relaxed);
        Ok(ScratchBuf {
            data,
            state: Arc::clone(&self.state),
        })
    }

    /// Buffers currently alive
    pub fn live(&self) -> usize {
        self.state.live.load(Ordering::Acquire)
    }

    /// Buffers handed out over the pool's lifetime
    pub fn taken(&self) -> usize {
        self.state.taken.load(Ordering::Relaxed)
    }

    /// Maximum number of live buffers
    pub fn capacity(&self) -> usize {
        self.state.capacity
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A byte buffer occupying one pool slot until dropped
pub struct ScratchBuf {
    data: Vec<u8>,
    state: Arc<PoolState>,
}

impl ScratchBuf {
    /// The buffered bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Deref for ScratchBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl Drop for ScratchBuf {
    fn drop(&mut self) {
        self.state.live.fetch_sub(1, Ordering::AcqRel);
    }
}

impl fmt::Debug for ScratchBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScratchBuf")
            .field("len", &self.data.len())
            .finish()
    }
}
