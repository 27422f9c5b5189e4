//! Reusable scratch space for assembling log lines.
//!
//! Each write borrows one [`Scratch`] from a [`BufferPool`], uses it alone, and
//! hands it back on drop. Returned scratch is cleared before it goes back on
//! the free list and again when it is handed out; scratch that grew past the
//! retention limit is released instead of pooled.

use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

use crate::config::LogConfig;
use crate::field::FieldSpan;

static SHARED: LazyLock<Arc<BufferPool>> =
    LazyLock::new(|| Arc::new(BufferPool::from_config(&LogConfig::default())));

/// Buffers used while assembling one line.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    /// The line being written.
    pub(crate) line: String,
    /// Encoded call fields, addressed by `spans`.
    pub(crate) arena: String,
    pub(crate) spans: Vec<FieldSpan>,
}

impl Scratch {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            line: String::with_capacity(capacity),
            arena: String::with_capacity(capacity),
            spans: Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.line.clear();
        self.arena.clear();
        self.spans.clear();
    }

    /// Largest allocation held, in bytes.
    fn retained(&self) -> usize {
        let spans = self.spans.capacity().saturating_mul(mem::size_of::<FieldSpan>());
        self.line.capacity().max(self.arena.capacity()).max(spans)
    }
}

/// A bounded free list of line-assembly buffers.
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<Scratch>>,
    buffer_capacity: usize,
    max_pooled: usize,
    max_retained_capacity: usize,
}

impl BufferPool {
    /// Creates an empty pool.
    ///
    /// New buffers start with `buffer_capacity` bytes; at most `max_pooled`
    /// idle buffers are kept; buffers that grew beyond
    /// `max_retained_capacity` are dropped when released.
    #[must_use]
    pub const fn new(buffer_capacity: usize, max_pooled: usize, max_retained_capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            buffer_capacity,
            max_pooled,
            max_retained_capacity,
        }
    }

    /// Creates a pool sized by `config`.
    #[must_use]
    pub const fn from_config(config: &LogConfig) -> Self {
        Self::new(
            config.buffer_capacity,
            config.max_pooled_buffers,
            config.max_retained_capacity,
        )
    }

    /// The process-wide pool used by loggers that were not built from a
    /// configuration.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Number of idle buffers currently pooled.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    pub(crate) fn acquire(&self) -> PooledScratch<'_> {
        let pooled = self.free.lock().pop();
        let mut scratch = pooled.unwrap_or_else(|| Scratch::with_capacity(self.buffer_capacity));
        scratch.clear();
        PooledScratch {
            pool: self,
            scratch,
        }
    }

    fn release(&self, mut scratch: Scratch) {
        if scratch.retained() > self.max_retained_capacity {
            return;
        }
        scratch.clear();
        let mut free = self.free.lock();
        if free.len() < self.max_pooled {
            free.push(scratch);
        }
    }
}

/// Scratch on loan from a [`BufferPool`], returned when dropped.
#[must_use = "dropping returns the scratch to its pool"]
pub(crate) struct PooledScratch<'a> {
    pool: &'a BufferPool,
    scratch: Scratch,
}

impl Deref for PooledScratch<'_> {
    type Target = Scratch;

    fn deref(&self) -> &Scratch {
        &self.scratch
    }
}

impl DerefMut for PooledScratch<'_> {
    fn deref_mut(&mut self) -> &mut Scratch {
        &mut self.scratch
    }
}

impl Drop for PooledScratch<'_> {
    fn drop(&mut self) {
        self.pool.release(mem::take(&mut self.scratch));
    }
}
