//! Pooled allocation of buffer backing stores.
//!
//! - [`Allocation`] - A shared, zero-filled, fixed-size byte store
//! - [`PoolAllocator`] - Bump allocator that carves small requests out
//!   of one pool and hands large requests a dedicated store
//!
//! Small reservations are aligned to 8 bytes inside the pool, so many
//! short-lived buffers share one allocation instead of hitting the
//! allocator each time. A reservation of at least half the pool
//! capacity bypasses the pool entirely. When the pool cannot fit a
//! small request, the current backing store is abandoned (outstanding
//! handles keep it alive) and a fresh pool is started.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Default pool capacity (8 KiB).
pub const DEFAULT_POOL_SIZE: usize = 8 * 1024;

/// A shared, fixed-size, mutable byte store.
///
/// Cloning an `Allocation` is cheap and shares the same bytes; the
/// store is freed when the last handle drops. Contents start zeroed.
/// The `Rc` backing keeps `Allocation` off `Send` and `Sync`.
#[derive(Clone)]
pub struct Allocation {
    bytes: Rc<[Cell<u8>]>,
}

impl Allocation {
    /// Creates a dedicated store of exactly `size` zeroed bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: std::iter::repeat_with(|| Cell::new(0)).take(size).collect(),
        }
    }

    /// Total size of the store in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the store holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if both handles refer to the same store.
    pub fn ptr_eq(&self, other: &Allocation) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }

    pub(crate) fn get(&self, index: usize) -> u8 {
        self.bytes[index].get()
    }

    pub(crate) fn set(&self, index: usize, value: u8) {
        self.bytes[index].set(value);
    }
}

impl std::fmt::Debug for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocation").field("len", &self.len()).finish()
    }
}

/// Bump allocator over a shared pool of bytes.
///
/// `reserve` returns the backing [`Allocation`] plus the start offset
/// of the reserved range. Offsets issued from the pool are always
/// multiples of 8.
///
/// # Example
///
/// ```
/// use wirebuf::PoolAllocator;
///
/// let mut pool = PoolAllocator::default();
/// let (first, a) = pool.reserve(5);
/// let (second, b) = pool.reserve(3);
///
/// assert_eq!(a, 0);
/// assert_eq!(b, 8);
/// assert!(first.ptr_eq(&second));
/// ```
#[derive(Debug)]
pub struct PoolAllocator {
    capacity: usize,
    backing: Option<Allocation>,
    cursor: usize,
}

impl PoolAllocator {
    /// Creates a pool that issues from stores of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            backing: None,
            cursor: 0,
        }
    }

    /// Pool capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current bump cursor. Never exceeds the capacity.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reserves `size` bytes and returns the store plus the offset at
    /// which the reserved range starts.
    ///
    /// A request of at least half the capacity gets a dedicated store
    /// of exactly `size` bytes at offset 0 and leaves the pool
    /// untouched. Otherwise the range is carved from the current pool,
    /// starting a fresh pool first when the remaining space is too
    /// small. After carving, the cursor advances past the range and
    /// rounds up to the next multiple of 8.
    pub fn reserve(&mut self, size: usize) -> (Allocation, usize) {
        if size >= self.capacity / 2 {
            return (Allocation::new(size), 0);
        }

        let backing = match &self.backing {
            Some(backing) if size <= self.capacity - self.cursor => backing.clone(),
            _ => {
                self.cursor = 0;
                self.backing.insert(Allocation::new(self.capacity)).clone()
            }
        };

        let start = self.cursor;
        self.cursor = align_up_8(start + size).min(self.capacity);
        (backing, start)
    }
}

impl Default for PoolAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

fn align_up_8(value: usize) -> usize {
    (value + 7) & !7
}

// Thread-local pool behind the pooled Buffer constructors.
thread_local! {
    static DEFAULT_POOL: RefCell<PoolAllocator> = const {
        RefCell::new(PoolAllocator {
            capacity: DEFAULT_POOL_SIZE,
            backing: None,
            cursor: 0,
        })
    };
}

pub(crate) fn with_default_pool<T>(f: impl FnOnce(&mut PoolAllocator) -> T) -> T {
    DEFAULT_POOL.with(|pool| f(&mut pool.borrow_mut()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_starts_zeroed() {
        let alloc = Allocation::new(16);
        assert_eq!(alloc.len(), 16);
        for i in 0..16 {
            assert_eq!(alloc.get(i), 0);
        }
    }

    #[test]
    fn test_allocation_shared_through_clone() {
        let alloc = Allocation::new(4);
        let view = alloc.clone();
        view.set(2, 0xAB);
        assert_eq!(alloc.get(2), 0xAB);
        assert!(alloc.ptr_eq(&view));
    }

    #[test]
    fn test_reserve_offsets_are_aligned() {
        let mut pool = PoolAllocator::new(DEFAULT_POOL_SIZE);
        let (_, a) = pool.reserve(5);
        let (_, b) = pool.reserve(3);
        let (_, c) = pool.reserve(9);

        assert_eq!(a, 0);
        assert_eq!(b, 8, "5-byte reserve should advance the cursor to 8");
        assert_eq!(c, 16, "3-byte reserve should advance the cursor to 16");
    }

    #[test]
    fn test_small_reserves_share_backing() {
        let mut pool = PoolAllocator::default();
        let (first, _) = pool.reserve(10);
        let (second, _) = pool.reserve(10);
        assert!(first.ptr_eq(&second));
        assert_eq!(first.len(), DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_large_reserve_bypasses_pool() {
        let mut pool = PoolAllocator::default();
        let (_, _) = pool.reserve(8);
        let cursor_before = pool.cursor();

        let (alloc, offset) = pool.reserve(DEFAULT_POOL_SIZE / 2);
        assert_eq!(offset, 0);
        assert_eq!(alloc.len(), DEFAULT_POOL_SIZE / 2, "dedicated store is exactly sized");
        assert_eq!(pool.cursor(), cursor_before, "bypass must not move the cursor");
    }

    #[test]
    fn test_exhaustion_starts_fresh_pool() {
        let mut pool = PoolAllocator::new(64);
        let (old, _) = pool.reserve(24);
        pool.reserve(24);
        assert_eq!(pool.cursor(), 48);

        // 24 > 64 - 48, so the old pool is abandoned.
        let (fresh, offset) = pool.reserve(24);
        assert_eq!(offset, 0);
        assert!(!fresh.ptr_eq(&old));
        // The abandoned store is still alive and intact for its holders.
        assert_eq!(old.len(), 64);
    }

    #[test]
    fn test_reserved_ranges_do_not_overlap() {
        let mut pool = PoolAllocator::default();
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for size in [1, 7, 8, 9, 31] {
            let (_, offset) = pool.reserve(size);
            for &(start, len) in &ranges {
                assert!(
                    offset >= start + len || offset + size <= start,
                    "range at {} overlaps range at {}",
                    offset,
                    start
                );
            }
            ranges.push((offset, size));
        }
    }

    #[test]
    fn test_cursor_never_exceeds_capacity() {
        let mut pool = PoolAllocator::new(40);
        for _ in 0..100 {
            pool.reserve(13);
            assert!(pool.cursor() <= pool.capacity());
        }
    }

    #[test]
    fn test_zero_size_reserve() {
        let mut pool = PoolAllocator::default();
        pool.reserve(3);
        let (_, offset) = pool.reserve(0);
        assert_eq!(offset, 8);
        assert_eq!(pool.cursor(), 8, "empty reserve must not advance the cursor");
    }

    #[test]
    fn test_align_up_8() {
        assert_eq!(align_up_8(0), 0);
        assert_eq!(align_up_8(1), 8);
        assert_eq!(align_up_8(8), 8);
        assert_eq!(align_up_8(9), 16);
    }
}
