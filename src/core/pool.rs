//! Thread-safe pool of reusable log entries.
//!
//! Entries are pushed when released and popped when acquired. An empty pool
//! allocates a fresh entry; a full pool drops the released one. Release goes
//! through [`PooledEntry`]'s `Drop`, so an entry is reset and returned even
//! when formatting or the sink write fails, or when the caller unwinds.

use super::log_entry::Entry;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct EntryPool {
    entries: Mutex<Vec<Entry>>,
    max_entries: usize,
    allocated: AtomicU64,
}

impl EntryPool {
    /// Create a pool that retains at most `max_entries` idle entries
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::with_capacity(max_entries)),
            max_entries,
            allocated: AtomicU64::new(0),
        }
    }

    /// Take an entry, allocating one if the pool is empty.
    #[must_use]
    pub fn acquire(&self) -> PooledEntry<'_> {
        let entry = self.entries.lock().pop().unwrap_or_else(|| {
            self.allocated.fetch_add(1, Ordering::Relaxed);
            Entry::new()
        });

        PooledEntry {
            entry: Some(entry),
            pool: self,
        }
    }

    fn release(&self, mut entry: Entry) {
        entry.reset();

        let mut entries = self.entries.lock();
        if entries.len() < self.max_entries {
            entries.push(entry);
        }
    }

    /// Number of idle entries
    #[must_use]
    pub fn available(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Entries allocated because the pool was empty
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }
}

impl Default for EntryPool {
    /// Capacity follows available parallelism.
    fn default() -> Self {
        let max_entries = std::thread::available_parallelism()
            .map(|p| p.get() * 2)
            .unwrap_or(8);
        Self::new(max_entries)
    }
}

/// Exclusive handle on an entry for the duration of one log call
pub struct PooledEntry<'a> {
    entry: Option<Entry>,
    pool: &'a EntryPool,
}

impl Deref for PooledEntry<'_> {
    type Target = Entry;

    fn deref(&self) -> &Entry {
        // Only `Drop` takes the entry out
        self.entry.as_ref().unwrap_or_else(|| unreachable!("entry taken before drop"))
    }
}

impl DerefMut for PooledEntry<'_> {
    fn deref_mut(&mut self) -> &mut Entry {
        self.entry.as_mut().unwrap_or_else(|| unreachable!("entry taken before drop"))
    }
}

impl Drop for PooledEntry<'_> {
    fn drop(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.pool.release(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_acquire_allocates_when_empty() {
        let pool = EntryPool::new(2);
        assert_eq!(pool.available(), 0);

        let entry = pool.acquire();
        assert!(entry.is_reset());
        assert_eq!(pool.allocated(), 1);
        drop(entry);

        assert_eq!(pool.available(), 1);
        let _entry = pool.acquire();
        assert_eq!(pool.allocated(), 1);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_release_resets_entry() {
        let pool = EntryPool::new(1);
        {
            let mut entry = pool.acquire();
            entry.level = LogLevel::Error;
            entry.format.push_str("{}");
            entry.args.push("leak".into());
            entry.buffer.extend_from_slice(b"leak");
            entry.fields.insert("message".into(), "leak".into());
        }

        let entry = pool.acquire();
        assert!(entry.is_reset());
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_full_pool_drops_extra_entries() {
        let pool = EntryPool::new(1);
        let first = pool.acquire();
        let second = pool.acquire();
        drop(first);
        drop(second);
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.allocated(), 2);
    }

    #[test]
    fn test_released_on_unwind() {
        let pool = EntryPool::new(1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut entry = pool.acquire();
            entry.buffer.extend_from_slice(b"partial");
            panic!("formatter blew up");
        }));
        assert!(result.is_err());
        assert_eq!(pool.available(), 1);
        assert!(pool.acquire().is_reset());
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool = std::sync::Arc::new(EntryPool::new(4));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = std::sync::Arc::clone(&pool);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let mut entry = pool.acquire();
                        assert!(entry.is_reset());
                        entry.buffer.extend_from_slice(b"x");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(pool.available() <= 4);
    }
}
