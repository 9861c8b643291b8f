use std::collections::VecDeque;
use std::fmt;

/// Fixed-capacity FIFO. Pushing into a full queue evicts the oldest item.
pub struct CircularQueue<T> {
    deque: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> Clone for CircularQueue<T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.deque.fmt(f)
    }
}

impl<T> CircularQueue<T> {
    /// A zero capacity is bumped to one so the queue can always hold the newest item.
    /// Storage grows on demand, so `cap` only bounds the length.
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            deque: VecDeque::new(),
            capacity: cap.max(1),
        }
    }

    /// Appends `item` as the newest element and returns the evicted oldest one, if any.
    #[inline]
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.deque.pop_front()
        } else {
            None
        };

        self.deque.push_back(item);

        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.deque.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.deque.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn newest(&self) -> Option<&T> {
        self.deque.back()
    }

    /// Oldest to newest.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'_ T> {
        self.deque.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut q = CircularQueue::with_capacity(3);

        assert_eq!(q.push(1), None);
        assert_eq!(q.push(2), None);
        assert_eq!(q.push(3), None);
        assert!(q.is_full());
        assert_eq!(q.push(4), Some(1));

        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(q.newest(), Some(&4));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut q = CircularQueue::with_capacity(0);
        q.push('a');
        assert_eq!(q.push('b'), Some('a'));
        assert_eq!(q.capacity(), 1);
    }

    #[test]
    fn huge_capacity_allocates_lazily() {
        let mut q = CircularQueue::with_capacity(usize::MAX);
        q.push(1u8);
        q.push(2u8);
        assert_eq!(q.len(), 2);
        assert!(!q.is_full());
    }
}
