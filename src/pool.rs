//! Defines a pool of reusable byte buffers shared by all invocations
//! in the same process, to amortize allocation across encodes.

use crossbeam::queue::SegQueue;

/// Buffers that grew beyond this capacity are dropped on release
/// instead of pooled, bounding worst-case pool memory.
const MAX_POOLED_CAPACITY: usize = 10 * 1024 * 1024;

/// A lock-free pool of encode buffers. Any pooled buffer may satisfy
/// any request; an acquired buffer is exclusively owned by its
/// acquirer until released.
pub struct BufferPool {
    buffers: SegQueue<Vec<u8>>,
}

impl BufferPool {
    pub fn new() -> Self {
        BufferPool {
            buffers: SegQueue::new(),
        }
    }

    /// Take a zero-length buffer from the pool, allocating a fresh
    /// one if the pool is empty.
    pub fn acquire(&self) -> Vec<u8> {
        let mut buffer = self.buffers.pop().unwrap_or_default();
        buffer.clear();
        buffer
    }

    /// Return a buffer to the pool. Oversized buffers are dropped.
    pub fn release(&self, mut buffer: Vec<u8>) {
        if buffer.capacity() > MAX_POOLED_CAPACITY {
            return;
        }
        buffer.clear();
        self.buffers.push(buffer);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn acquired_buffers_are_empty() {
        let pool = BufferPool::new();
        let mut buffer = pool.acquire();
        buffer.extend_from_slice(b"leftover content");
        pool.release(buffer);
        assert!(pool.acquire().is_empty());
    }

    #[test]
    fn recycles_released_buffers() {
        let pool = BufferPool::new();
        let mut buffer = pool.acquire();
        buffer.reserve(4096);
        pool.release(buffer);
        assert!(pool.acquire().capacity() >= 4096);
    }

    #[test]
    fn drops_oversized_buffers() {
        let pool = BufferPool::new();
        let buffer = Vec::with_capacity(MAX_POOLED_CAPACITY + 1);
        pool.release(buffer);
        assert_eq!(pool.acquire().capacity(), 0);
    }

    #[test]
    fn concurrent_use_never_cross_contaminates() {
        let pool = Arc::new(BufferPool::new());
        let handles: Vec<_> = (0u8..8)
            .map(|id| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let mut buffer = pool.acquire();
                        assert!(
                            buffer.is_empty(),
                            "acquired a buffer still holding another writer's bytes"
                        );
                        buffer.resize(128, id);
                        assert!(buffer.iter().all(|b| *b == id));
                        pool.release(buffer);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
