//! Thread-local object pooling.
//!
//! Kernel calls on the same worker thread pick up the working state left by
//! earlier calls, whose scratch buffer keeps its capacity. Pools are strictly
//! per-thread, so no numeric state is ever shared between workers.

use std::cell::RefCell;

/// Acquire an object from a thread-local pool.
///
/// If the pool has an object, it is popped and `reset` is called on it.
/// Otherwise a new object is created via `factory`.
#[inline]
pub fn tl_acquire<T>(pool: &RefCell<Vec<T>>, factory: fn() -> T, reset: fn(&mut T)) -> T {
    let mut pool = pool.borrow_mut();
    match pool.pop() {
        Some(mut item) => {
            reset(&mut item);
            item
        }
        None => factory(),
    }
}

/// Return an object to a thread-local pool.
///
/// If the pool has reached `max` capacity, the object is dropped.
#[inline]
pub fn tl_release<T>(pool: &RefCell<Vec<T>>, max: usize, item: T) {
    let mut pool = pool.borrow_mut();
    if pool.len() < max {
        pool.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_creates_new_when_empty() {
        let pool: RefCell<Vec<Vec<u64>>> = RefCell::new(Vec::new());
        let v = tl_acquire(&pool, || vec![7], Vec::clear);
        assert_eq!(v, vec![7]);
        assert!(pool.borrow().is_empty());
    }

    #[test]
    fn acquire_resets_reused_item_but_keeps_capacity() {
        let pool: RefCell<Vec<Vec<u64>>> = RefCell::new(Vec::new());
        let mut big = Vec::with_capacity(1024);
        big.extend(0..1024);
        tl_release(&pool, 4, big);

        let v = tl_acquire(&pool, Vec::new, Vec::clear);
        assert!(v.is_empty());
        assert!(v.capacity() >= 1024);
    }

    #[test]
    fn release_respects_max() {
        let pool: RefCell<Vec<u32>> = RefCell::new(Vec::new());
        tl_release(&pool, 2, 1);
        tl_release(&pool, 2, 2);
        tl_release(&pool, 2, 3);
        assert_eq!(pool.borrow().len(), 2);
    }
}
