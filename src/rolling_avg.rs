use crate::circular_queue::CircularQueue;
use num_traits::Float;

/// Arithmetic mean over the most recent `window` samples.
#[derive(Debug, Clone)]
pub struct RollingAvg<T> {
    history: CircularQueue<T>,
}

impl<T: Float> RollingAvg<T> {
    pub fn new(window: usize) -> Self {
        Self {
            history: CircularQueue::with_capacity(window),
        }
    }

    /// Starts a window already holding `first`.
    pub fn with_first(window: usize, first: T) -> Self {
        let mut avg = Self::new(window);
        avg.push(first);
        avg
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.history.push(value);
    }

    /// `None` for an empty window.
    pub fn mean(&self) -> Option<T> {
        if self.history.is_empty() {
            return None;
        }

        let sum = self.history.iter().fold(T::zero(), |acc, &x| acc + x);
        let n = T::from(self.history.len())?;

        Some(sum / n)
    }

    #[inline]
    pub fn last(&self) -> Option<T> {
        self.history.newest().copied()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.history.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn mean_over_window() {
        let mut avg = RollingAvg::new(3);
        assert_eq!(avg.mean(), None);

        for x in [1.0f32, 2.0, 3.0, 10.0] {
            avg.push(x);
        }

        assert_eq!(avg.len(), 3);
        assert_approx_eq!(avg.mean().unwrap(), 5.0);
        assert_eq!(avg.last(), Some(10.0));
    }
}
