//! Reusable writers
//!
//! Encoding a message should not allocate. A [`WriterPool`] keeps idle
//! writers around and hands them out through a [`PooledWriter`] guard that
//! puts the writer back when dropped. Every writer is reset on acquire, so a
//! lease never sees bytes from a previous message.

use core::fmt;
use core::ops::{Deref, DerefMut};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::trace;

use crate::config::Limits;
use crate::writer::Writer;
use crate::DEFAULT_POOL_SIZE;

/// Pool of idle writers sharing one set of limits
pub struct WriterPool {
    idle: Mutex<Vec<Writer>>,
    limits: Limits,
    max_idle: usize,
}

impl WriterPool {
    /// Create a pool that keeps at most `max_idle` writers around
    pub fn new(limits: Limits, max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            limits,
            max_idle,
        }
    }

    /// Limits given to every writer this pool creates
    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Take a writer, reusing an idle one when available
    pub fn acquire(&self) -> PooledWriter<'_> {
        let reused = self.idle.lock().pop();
        let writer = match reused {
            Some(mut writer) => {
                writer.reset();
                trace!(capacity = writer.capacity(), "reusing pooled writer");
                writer
            }
            None => {
                trace!("pool empty, allocating writer");
                Writer::with_limits(self.limits)
            }
        };
        PooledWriter {
            pool: self,
            writer: Some(writer),
        }
    }

    /// Writers currently waiting for reuse
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, writer: Writer) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(writer);
            trace!(idle = idle.len(), "writer returned to pool");
        } else {
            trace!("pool full, dropping writer");
        }
    }
}

impl Default for WriterPool {
    fn default() -> Self {
        Self::new(Limits::default(), DEFAULT_POOL_SIZE)
    }
}

impl fmt::Debug for WriterPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterPool")
            .field("idle", &self.idle_count())
            .field("max_idle", &self.max_idle)
            .field("limits", &self.limits)
            .finish()
    }
}

/// A writer leased from a [`WriterPool`]; returned on drop
pub struct PooledWriter<'a> {
    pool: &'a WriterPool,
    writer: Option<Writer>,
}

impl PooledWriter<'_> {
    /// Keep the writer instead of returning it to the pool
    pub fn detach(mut self) -> Writer {
        self.writer.take().unwrap_or_else(|| Writer::with_limits(self.pool.limits))
    }
}

impl Deref for PooledWriter<'_> {
    type Target = Writer;

    fn deref(&self) -> &Writer {
        // Only `detach` and `drop` take the writer, and both consume the guard
        self.writer.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl DerefMut for PooledWriter<'_> {
    fn deref_mut(&mut self) -> &mut Writer {
        self.writer.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl Drop for PooledWriter<'_> {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            self.pool.release(writer);
        }
    }
}

impl fmt::Debug for PooledWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledWriter").field(&self.writer).finish()
    }
}

static GLOBAL: Lazy<WriterPool> = Lazy::new(WriterPool::default);

/// Process-wide pool with default limits
pub fn global() -> &'static WriterPool {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_resets_reused_writer() {
        let pool = WriterPool::new(Limits::default(), 4);
        {
            let mut writer = pool.acquire();
            writer.write_str("secret").unwrap();
            assert!(!writer.is_empty());
        }
        assert_eq!(pool.idle_count(), 1);

        let writer = pool.acquire();
        assert!(writer.is_empty());
        assert_eq!(writer.position(), 0);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn test_capacity_survives_reuse() {
        let pool = WriterPool::new(Limits::new().with_initial_capacity(8), 1);
        {
            let mut writer = pool.acquire();
            writer.write_raw(&[7u8; 4096]);
        }
        let writer = pool.acquire();
        assert!(writer.capacity() >= 4096);
    }

    #[test]
    fn test_max_idle() {
        let pool = WriterPool::new(Limits::default(), 2);
        let leases: Vec<_> = (0..5).map(|_| pool.acquire()).collect();
        drop(leases);
        assert_eq!(pool.idle_count(), 2);
    }

    #[test]
    fn test_detach_keeps_writer() {
        let pool = WriterPool::new(Limits::default(), 2);
        let mut lease = pool.acquire();
        lease.write_u32(9);
        let writer = lease.detach();
        assert_eq!(writer.as_slice(), &[9, 0, 0, 0]);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn test_global_pool() {
        let mut writer = global().acquire();
        writer.write_bool(true);
        assert_eq!(writer.as_slice(), &[1]);
        assert_eq!(global().limits(), &Limits::default());
    }
}
