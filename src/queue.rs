//! Per-output buffer used by the broadcast core
//!
//! Each tee output owns exactly one `TeeQueue`. The publisher appends to every
//! live queue; only the owning output pops from it.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Unbounded FIFO of elements published upstream but not yet delivered to one output
#[derive(Debug)]
pub struct TeeQueue<T> {
    output: usize,
    items: Mutex<VecDeque<T>>,
    high_watermark: Option<usize>,
    lagging: AtomicBool,
}

impl<T> TeeQueue<T> {
    /// Create the queue for output `output`
    pub fn new(output: usize, capacity: usize, high_watermark: Option<usize>) -> Self {
        Self {
            output,
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            high_watermark,
            lagging: AtomicBool::new(false),
        }
    }

    /// Index of the output this queue belongs to
    pub fn output(&self) -> usize {
        self.output
    }

    fn items(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an element to the back of the queue
    pub fn push(&self, item: T) {
        let len = {
            let mut items = self.items();
            items.push_back(item);
            items.len()
        };

        if let Some(watermark) = self.high_watermark {
            if len > watermark && !self.lagging.swap(true, Ordering::Relaxed) {
                log::warn!(
                    "tee output {} is lagging: {} buffered elements (high watermark {})",
                    self.output,
                    len,
                    watermark
                );
            }
        }
    }

    /// Remove and return the front element, if any
    pub fn pop(&self) -> Option<T> {
        let (item, len) = {
            let mut items = self.items();
            let item = items.pop_front();
            (item, items.len())
        };

        if let Some(watermark) = self.high_watermark {
            if len <= watermark {
                self.lagging.store(false, Ordering::Relaxed);
            }
        }

        item
    }

    /// Number of buffered elements
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Whether the queue is currently above its high watermark
    pub fn is_lagging(&self) -> bool {
        self.lagging.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = TeeQueue::new(0, 4, None);
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_grows_past_initial_capacity() {
        let queue = TeeQueue::new(1, 1, None);
        for i in 0..1000 {
            queue.push(i);
        }
        assert_eq!(queue.len(), 1000);
        assert_eq!(queue.output(), 1);
    }

    #[test]
    fn test_lagging_flag_rearms() {
        let queue = TeeQueue::new(0, 0, Some(2));
        queue.push('a');
        queue.push('b');
        assert!(!queue.is_lagging());

        queue.push('c');
        assert!(queue.is_lagging());

        assert_eq!(queue.pop(), Some('a'));
        assert!(!queue.is_lagging());

        queue.push('d');
        assert!(queue.is_lagging());
    }
}
